//! Header field access at byte and nibble granularity.
//!
//! Callers are responsible for bounds: the profile engines only reach here
//! after the buffer length has been validated against the configured layout.

pub(crate) fn read_be_u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn read_be_u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

pub(crate) fn read_be_u64_at(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_be_bytes(bytes)
}

pub(crate) fn read_le_u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn write_be_u16_at(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_be_u32_at(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_be_u64_at(data: &mut [u8], offset: usize, value: u64) {
    data[offset..offset + 8].copy_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_le_u16_at(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

/// Byte index of a bit offset (bit offsets are validated to byte or nibble
/// alignment at construction).
pub(crate) fn offset_bytes(bit_offset: u32) -> usize {
    (bit_offset / 8) as usize
}

/// Write a nibble at a 4-bit-aligned bit offset, LSB-first within the byte.
pub(crate) fn write_nibble_at(data: &mut [u8], bit_offset: u32, value: u8) {
    let byte_idx = (bit_offset >> 3) as usize;
    let shift = (bit_offset & 0x07) as u8;
    let mask = !(0x0F << shift);
    data[byte_idx] = (data[byte_idx] & mask) | ((value & 0x0F) << shift);
}

pub(crate) fn read_nibble_at(data: &[u8], bit_offset: u32) -> u8 {
    let byte_idx = (bit_offset >> 3) as usize;
    let shift = (bit_offset & 0x07) as u8;
    (data[byte_idx] >> shift) & 0x0F
}
