//! Configuration legality checks used by `ProfileFrame` at construction.
//!
//! All values are in bits unless a name says otherwise. Violations are
//! configuration errors; the frame turns them into a fatal abort.

use crate::{E2EError, E2EResult};

pub(crate) fn validate_bit_alignment(offset: u32, align: u32, field: &str) -> E2EResult<()> {
    if offset % align != 0 {
        return Err(E2EError::InvalidConfiguration(format!(
            "{} shall be a multiple of {} bits",
            field, align
        )));
    }
    Ok(())
}

pub(crate) fn validate_multiple_of_8(data_length: u32, field: &str) -> E2EResult<()> {
    validate_bit_alignment(data_length, 8, field)
}

pub(crate) fn validate_min_data_length(data_length: u32, min: u32, max: u32) -> E2EResult<()> {
    if data_length < min || data_length > max {
        return Err(E2EError::InvalidConfiguration(format!(
            "Data length must be between {}B and {}B",
            min / 8,
            max / 8
        )));
    }
    Ok(())
}

pub(crate) fn validate_max_data_length(
    max_data_length: u32,
    min_data_length: u32,
    ceiling: u32,
) -> E2EResult<()> {
    if max_data_length < min_data_length || max_data_length > ceiling {
        return Err(E2EError::InvalidConfiguration(format!(
            "Maximum Data length shall be between MinDataLength and {}B",
            ceiling / 8
        )));
    }
    Ok(())
}

pub(crate) fn validate_max_delta_counter(max_delta_counter: u32, ceiling: u32) -> E2EResult<()> {
    if max_delta_counter == 0 || max_delta_counter > ceiling {
        return Err(E2EError::InvalidConfiguration(format!(
            "Max delta counter must be between 1 and {}",
            ceiling
        )));
    }
    Ok(())
}

/// Header placement: the configured header region must fit into the
/// smallest admissible buffer.
pub(crate) fn validate_offset_within_data(
    offset: u32,
    data_length: u32,
    header_bits: u32,
) -> E2EResult<()> {
    if data_length < header_bits || offset > data_length - header_bits {
        return Err(E2EError::InvalidConfiguration(format!(
            "Offset shall be between 0 and data length - {}B",
            header_bits / 8
        )));
    }
    Ok(())
}

/// Bit-field placement for the in-data header family: the field of the
/// given width must end inside the configured data length.
pub(crate) fn validate_field_within_data(
    field_offset: u32,
    field_bits: u32,
    data_length: u32,
    field: &str,
) -> E2EResult<()> {
    if field_offset + field_bits > data_length {
        return Err(E2EError::InvalidConfiguration(format!(
            "{} shall lie within the configured data length",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_alignment() {
        assert!(validate_bit_alignment(12, 4, "Counter offset").is_ok());
        assert!(validate_bit_alignment(13, 4, "Counter offset").is_err());
        assert!(validate_multiple_of_8(64, "Data length").is_ok());
        assert!(validate_multiple_of_8(63, "Data length").is_err());
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_min_data_length(96, 96, 32768).is_ok());
        assert!(validate_min_data_length(95, 96, 32768).is_err());
        assert!(validate_max_data_length(96, 96, 32768).is_ok());
        assert!(validate_max_data_length(64, 96, 32768).is_err());
        assert!(validate_max_data_length(40000, 96, 32768).is_err());
    }

    #[test]
    fn test_max_delta_bounds() {
        assert!(validate_max_delta_counter(1, 15).is_ok());
        assert!(validate_max_delta_counter(15, 15).is_ok());
        assert!(validate_max_delta_counter(0, 15).is_err());
        assert!(validate_max_delta_counter(16, 15).is_err());
    }

    #[test]
    fn test_field_placement() {
        assert!(validate_offset_within_data(64, 128, 24).is_ok());
        assert!(validate_offset_within_data(112, 128, 24).is_err());
        assert!(validate_field_within_data(56, 8, 64, "CRC offset").is_ok());
        assert!(validate_field_within_data(60, 8, 64, "CRC offset").is_err());
    }
}
