//! # E2E Profile 44 engine
//!
//! Profile 44 shares the Profile 04 header layout
//! [LENGTH(2B) | COUNTER(2B) | ID(4B) | CRC(4B)] but computes the CRC with
//! the ISO-HDLC (Ethernet) polynomial instead of the AUTOSAR one. The
//! engine is a thin wrapper over the Profile 04 implementation with the
//! algorithm swapped out.

use crate::profile::End2EndEventProtectionProps;
use crate::profiles::profile04;
use crate::{E2EResult, ProfileCheckStatus};
use crc::CRC_32_ISO_HDLC;

pub(crate) struct Protector {
    inner: profile04::Protector,
}

impl Protector {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            inner: profile04::Protector::with_algorithm(props, &CRC_32_ISO_HDLC),
        }
    }

    pub(crate) fn protect(&mut self, data: &mut [u8]) -> E2EResult<()> {
        self.inner.protect(data)
    }
}

pub(crate) struct Checker {
    inner: profile04::Checker,
}

impl Checker {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            inner: profile04::Checker::with_algorithm(props, &CRC_32_ISO_HDLC),
        }
    }

    pub(crate) fn check(&mut self, data: &[u8]) -> ProfileCheckStatus {
        self.inner.check(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> End2EndEventProtectionProps {
        End2EndEventProtectionProps {
            min_data_length: 96,
            max_data_length: 32768,
            max_delta_counter: 1,
            offset: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_and_header_fields() {
        let mut tx = Protector::new(&props());
        let mut rx = Checker::new(&props());

        let mut data = vec![0x00; 16];
        tx.protect(&mut data).unwrap();
        assert_eq!(&data[0..2], &[0x00, 0x10]);
        assert_eq!(&data[2..4], &[0x00, 0x00]);
        assert_eq!(&data[4..8], &[0x0a, 0x0b, 0x0c, 0x0d]);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);

        tx.protect(&mut data).unwrap();
        assert_eq!(&data[2..4], &[0x00, 0x01]);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_crc_differs_from_profile04() {
        let mut tx44 = Protector::new(&props());
        let mut tx04 = profile04::Protector::new(&props());

        let mut frame44 = vec![0x00; 16];
        let mut frame04 = vec![0x00; 16];
        tx44.protect(&mut frame44).unwrap();
        tx04.protect(&mut frame04).unwrap();
        // same layout, different polynomial
        assert_eq!(&frame44[0..8], &frame04[0..8]);
        assert_ne!(&frame44[8..12], &frame04[8..12]);

        let mut rx44 = Checker::new(&props());
        assert_eq!(rx44.check(&frame04), ProfileCheckStatus::CrcError);
    }

    #[test]
    fn test_crc_corruption_detected() {
        let mut tx = Protector::new(&props());
        let mut rx = Checker::new(&props());

        let mut data = vec![0x00; 16];
        tx.protect(&mut data).unwrap();
        data[10] ^= 0x04;
        assert_eq!(rx.check(&data), ProfileCheckStatus::CrcError);
    }
}
