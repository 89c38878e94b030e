use crc::Algorithm;

/// Profile 01 uses CRC-8-SAE-J1850 with zero init/xorout, unreflected.
///
/// Not in the `crc` catalog; the catalog `CRC_8_SAE_J1850` applies the
/// 0xFF init and xorout the E2E profile omits.
pub(crate) const CRC8_PROFILE01: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x1d,
    init: 0x00,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0x37,
    residue: 0xc4,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crc::Crc;

    #[test]
    fn test_crc8_profile01_check_value() {
        // The algorithm's `check` field is by definition the CRC of the
        // ASCII string "123456789".
        let crc = Crc::<u8>::new(&CRC8_PROFILE01);
        assert_eq!(crc.checksum(b"123456789"), CRC8_PROFILE01.check);
    }
}
