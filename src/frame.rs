//! Construction-time validation of a profile/configuration pairing.
//!
//! A [`ProfileFrame`] is built once per configured event, before the
//! checker or protector it backs. Violated constraints are deployment or
//! code-generation mismatches, not runtime conditions: construction logs
//! the diagnostic and aborts instead of continuing with an undefined
//! header layout.

use crate::common::validation;
use crate::profile::{DataIdMode, End2EndEventProtectionProps, Profile};
use crate::{E2EError, E2EResult};

const MAX_PAYLOAD_BITS: u32 = 4096 * 8;
const PROFILE01_MAX_DATA_BITS: u32 = 240;

/// Validated profile layout for one configured event.
#[derive(Debug, Clone, Copy)]
pub struct ProfileFrame {
    profile: Profile,
    header_size: usize,
}

impl ProfileFrame {
    /// Validate the configuration against the profile's legality table.
    ///
    /// # Panics
    /// Construction is a hard precondition check: any violated constraint
    /// terminates the process with a diagnostic.
    pub fn new(profile: Profile, props: &End2EndEventProtectionProps) -> Self {
        match Self::validate(profile, props) {
            Ok(()) => Self {
                profile,
                header_size: profile.header_size(),
            },
            Err(err) => {
                tracing::error!(?profile, %err, "invalid E2E protection configuration");
                panic!("invalid E2E protection configuration for {profile:?}: {err}");
            }
        }
    }

    /// Profile this frame was validated for.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Fixed E2E header size in bytes.
    pub fn header_size(&self) -> usize {
        self.header_size
    }

    pub(crate) fn validate(
        profile: Profile,
        props: &End2EndEventProtectionProps,
    ) -> E2EResult<()> {
        match profile {
            Profile::Profile01 => {
                validation::validate_min_data_length(
                    props.data_length,
                    2 * 8,
                    PROFILE01_MAX_DATA_BITS,
                )?;
                Self::validate_in_data_fields(props)
            }
            Profile::Proprietary => {
                // OEM variant of the Profile 01 layout without the short
                // frame length ceiling.
                validation::validate_min_data_length(props.data_length, 2 * 8, MAX_PAYLOAD_BITS)?;
                Self::validate_in_data_fields(props)
            }
            Profile::Profile04 | Profile::Profile44 => {
                validation::validate_min_data_length(
                    props.min_data_length,
                    12 * 8,
                    MAX_PAYLOAD_BITS,
                )?;
                validation::validate_max_data_length(
                    props.max_data_length,
                    props.min_data_length,
                    MAX_PAYLOAD_BITS,
                )?;
                validation::validate_bit_alignment(props.offset, 8, "Offset")?;
                validation::validate_offset_within_data(
                    props.offset,
                    props.min_data_length,
                    12 * 8,
                )?;
                validation::validate_max_delta_counter(props.max_delta_counter, 0xFFFE)
            }
            Profile::Profile05 => {
                validation::validate_multiple_of_8(props.data_length, "Data length")?;
                validation::validate_min_data_length(props.data_length, 3 * 8, MAX_PAYLOAD_BITS)?;
                validation::validate_bit_alignment(props.offset, 8, "Offset")?;
                validation::validate_offset_within_data(props.offset, props.data_length, 3 * 8)?;
                validation::validate_max_delta_counter(props.max_delta_counter, 0xFE)
            }
            Profile::Profile06 => {
                validation::validate_min_data_length(
                    props.min_data_length,
                    5 * 8,
                    MAX_PAYLOAD_BITS,
                )?;
                validation::validate_max_data_length(
                    props.max_data_length,
                    props.min_data_length,
                    MAX_PAYLOAD_BITS,
                )?;
                validation::validate_bit_alignment(props.offset, 8, "Offset")?;
                validation::validate_offset_within_data(
                    props.offset,
                    props.min_data_length,
                    5 * 8,
                )?;
                validation::validate_max_delta_counter(props.max_delta_counter, 0xFE)
            }
            Profile::Profile07 => {
                validation::validate_min_data_length(props.min_data_length, 20 * 8, u32::MAX)?;
                validation::validate_max_data_length(
                    props.max_data_length,
                    props.min_data_length,
                    u32::MAX,
                )?;
                validation::validate_bit_alignment(props.offset, 8, "Offset")?;
                validation::validate_offset_within_data(
                    props.offset,
                    props.min_data_length,
                    20 * 8,
                )?;
                validation::validate_max_delta_counter(props.max_delta_counter, 0xFFFF_FFFE)
            }
            Profile::Profile22 => {
                validation::validate_multiple_of_8(props.data_length, "Data length")?;
                validation::validate_bit_alignment(props.offset, 8, "Offset")?;
                validation::validate_offset_within_data(props.offset, props.data_length, 2 * 8)?;
                validation::validate_max_delta_counter(props.max_delta_counter, 15)
            }
        }
    }

    /// Field placement rules shared by Profile 01 and the proprietary
    /// variant: CRC, counter and optional ID nibble live inside the data at
    /// configured bit offsets.
    fn validate_in_data_fields(props: &End2EndEventProtectionProps) -> E2EResult<()> {
        validation::validate_multiple_of_8(props.data_length, "Data length")?;
        validation::validate_bit_alignment(props.crc_offset, 8, "Crc offset")?;
        validation::validate_bit_alignment(props.counter_offset, 4, "Counter offset")?;
        validation::validate_field_within_data(
            props.crc_offset,
            8,
            props.data_length,
            "Crc offset",
        )?;
        validation::validate_field_within_data(
            props.counter_offset,
            4,
            props.data_length,
            "Counter offset",
        )?;
        if props.data_id > 0xFFFF {
            return Err(E2EError::InvalidConfiguration(
                "Data ID shall fit into 16 bits".into(),
            ));
        }
        if props.data_id_mode == DataIdMode::Nibble {
            validation::validate_bit_alignment(
                props.data_id_nibble_offset,
                4,
                "Data ID nibble offset",
            )?;
            validation::validate_field_within_data(
                props.data_id_nibble_offset,
                4,
                props.data_length,
                "Data ID nibble offset",
            )?;
            if props.data_id & 0xF000 != 0 {
                return Err(E2EError::InvalidConfiguration(
                    "High nibble of Data ID shall be zero in Nibble mode".into(),
                ));
            }
        }
        validation::validate_max_delta_counter(props.max_delta_counter, 15)
    }
}
