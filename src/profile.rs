//! Profile selection and per-event protection configuration.
//!
//! [`End2EndEventProtectionProps`] is the flat per-event configuration the
//! surrounding binding loads from its deployment model and hands over fully
//! formed; this crate validates it (see [`crate::frame`]) and consumes it,
//! it never parses configuration itself.

/// E2E profile selecting the header layout and algorithm variant.
///
/// Immutable once chosen for an event; determines the fixed header size and
/// which fields of [`End2EndEventProtectionProps`] are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Profile {
    /// In-data header, 8-bit CRC, 4-bit counter, Data ID folded per mode
    Profile01 = 0,
    /// 12 byte header, 32-bit AUTOSAR CRC, 16-bit counter, 32-bit Data ID
    Profile04 = 1,
    /// 3 byte header, 16-bit CRC, 8-bit counter
    Profile05 = 2,
    /// 5 byte header, 16-bit CRC, 8-bit counter, dynamic length
    Profile06 = 3,
    /// 20 byte header, 64-bit CRC, 32-bit counter, 32-bit Data ID
    Profile07 = 4,
    /// 2 byte header, 8-bit CRC, 4-bit counter, Data ID list
    Profile22 = 5,
    /// Profile 04 layout with Ethernet CRC-32
    Profile44 = 6,
    /// OEM variant of the Profile 01 layout with relaxed constraints
    Proprietary = 7,
}

impl Profile {
    /// Fixed E2E header size of the profile, in bytes.
    ///
    /// Profiles 01 and Proprietary place their fields inside the data at
    /// configured bit offsets and reserve no dedicated header region.
    pub const fn header_size(self) -> usize {
        match self {
            Profile::Profile01 => 0,
            Profile::Profile04 => 12,
            Profile::Profile05 => 3,
            Profile::Profile06 => 5,
            Profile::Profile07 => 20,
            Profile::Profile22 => 2,
            Profile::Profile44 => 12,
            Profile::Proprietary => 0,
        }
    }
}

/// Encoding scheme folding the 16-bit logical Data ID into the 8-bit CRC of
/// the Profile 01 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataIdMode {
    /// Both bytes enter the CRC, low byte first
    Both,
    /// Low byte on even counters, high byte on odd counters
    Alt,
    /// Only the low byte enters the CRC
    Low,
    /// Low byte enters the CRC, high nibble is transmitted explicitly
    Nibble,
}

/// Per-event E2E protection configuration.
///
/// All offsets and lengths are in bits, field widths are interpreted per
/// profile. The struct is supplied fully formed by the configuration layer
/// of the binding; [`crate::ProfileFrame`] validates it once at
/// construction against the profile's legality table.
#[derive(Debug, Clone)]
pub struct End2EndEventProtectionProps {
    /// A unique identifier for protection against masquerading
    pub data_id: u32,
    /// Per-counter Data IDs (Profile 22)
    pub data_id_list: [u8; 16],
    /// How the Data ID is folded into the CRC (Profile 01 family)
    pub data_id_mode: DataIdMode,
    /// Bit offset of the E2E header from the beginning of the data
    pub offset: u32,
    /// Fixed length of data in bits (fixed-length profiles)
    pub data_length: u32,
    /// Minimal length of data in bits (variable-length profiles)
    pub min_data_length: u32,
    /// Maximal length of data in bits (variable-length profiles)
    pub max_data_length: u32,
    /// Bit offset of the counter (Profile 01 family)
    pub counter_offset: u32,
    /// Bit offset of the CRC (Profile 01 family)
    pub crc_offset: u32,
    /// Bit offset of the explicit Data ID nibble (Profile 01, Nibble mode)
    pub data_id_nibble_offset: u32,
    /// Maximum allowed delta between consecutive counters
    pub max_delta_counter: u32,
    /// Consecutive missing/repeated samples tolerated before a
    /// resynchronization is forced (Profile 01 family)
    pub max_no_new_or_repeated_data: u32,
    /// Number of in-sequence samples required to resynchronize after a
    /// sequence loss (Profile 01 family)
    pub sync_counter_init: u32,
}

impl Default for End2EndEventProtectionProps {
    fn default() -> Self {
        Self {
            data_id: 0x0a0b0c0d,
            data_id_list: [
                0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
                0x0e, 0x0f, 0x10,
            ],
            data_id_mode: DataIdMode::Both,
            offset: 0,
            data_length: 64,        // 8 bytes
            min_data_length: 96,    // 12 bytes
            max_data_length: 32768, // 4096 bytes
            counter_offset: 8,
            crc_offset: 0,
            data_id_nibble_offset: 12,
            max_delta_counter: 1,
            max_no_new_or_repeated_data: 15,
            sync_counter_init: 0,
        }
    }
}
