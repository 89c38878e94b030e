//! # E2E Profile 05 engine
//!
//! Protects fixed-length frames with:
//! - 16-bit CRC (IBM 3740) for data integrity, transmitted little-endian
//! - 8-bit counter for sequence checking
//! - 16-bit Data ID folded into the CRC, little-endian
//!
//! # Data layout
//! [DATA ... | CRC(2B LE) | COUNTER(1B) | DATA ...]

use crate::common::{counter, field_ops};
use crate::profile::End2EndEventProtectionProps;
use crate::{E2EError, E2EResult, ProfileCheckStatus};
use crc::{Crc, CRC_16_IBM_3740};

const COUNTER_MODULO: u64 = 0x100;

#[derive(Clone)]
struct Layout {
    offset: usize,
    data_length_bytes: usize,
    data_id: u16,
    max_delta_counter: u8,
}

impl Layout {
    fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            offset: field_ops::offset_bytes(props.offset),
            data_length_bytes: (props.data_length / 8) as usize,
            data_id: props.data_id as u16,
            max_delta_counter: props.max_delta_counter as u8,
        }
    }

    /// CRC over everything except the CRC field, with the Data ID folded
    /// in after the data.
    fn compute_crc(&self, data: &[u8]) -> u16 {
        let crc = Crc::<u16>::new(&CRC_16_IBM_3740);
        let mut digest = crc.digest();
        digest.update(&data[..self.offset]);
        digest.update(&data[self.offset + 2..]);
        digest.update(&self.data_id.to_le_bytes());
        digest.finalize()
    }
}

pub(crate) struct Protector {
    layout: Layout,
    counter: u8,
}

impl Protector {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            layout: Layout::new(props),
            counter: 0,
        }
    }

    pub(crate) fn protect(&mut self, data: &mut [u8]) -> E2EResult<()> {
        if data.len() != self.layout.data_length_bytes {
            return Err(E2EError::WrongInput(format!(
                "Expected {} bytes, got {} bytes",
                self.layout.data_length_bytes,
                data.len()
            )));
        }
        data[self.layout.offset + 2] = self.counter;
        let calculated_crc = self.layout.compute_crc(data);
        field_ops::write_le_u16_at(data, self.layout.offset, calculated_crc);
        self.counter = (self.counter as u16 + 1) as u8;
        Ok(())
    }
}

pub(crate) struct Checker {
    layout: Layout,
    counter: u8,
    initialized: bool,
}

impl Checker {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            layout: Layout::new(props),
            counter: 0,
            initialized: false,
        }
    }

    pub(crate) fn check(&mut self, data: &[u8]) -> ProfileCheckStatus {
        if data.is_empty() {
            return ProfileCheckStatus::NoNewData;
        }
        if data.len() != self.layout.data_length_bytes {
            return ProfileCheckStatus::CrcError;
        }
        let rx_crc = field_ops::read_le_u16_at(data, self.layout.offset);
        if self.layout.compute_crc(data) != rx_crc {
            return ProfileCheckStatus::CrcError;
        }
        let rx_counter = data[self.layout.offset + 2];
        let status = counter::classify_delta(
            counter::wrapping_delta(self.counter as u64, rx_counter as u64, COUNTER_MODULO),
            self.layout.max_delta_counter as u64,
            self.initialized,
        );
        self.counter = rx_counter;
        if matches!(status, ProfileCheckStatus::Ok | ProfileCheckStatus::OkSomeLost) {
            self.initialized = true;
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> End2EndEventProtectionProps {
        End2EndEventProtectionProps {
            data_id: 0x1234,
            data_length: 64,
            max_delta_counter: 1,
            offset: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let mut tx = Protector::new(&props());
        let mut rx = Checker::new(&props());

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(data[2], 0x00);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);

        tx.protect(&mut data).unwrap();
        assert_eq!(data[2], 0x01);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_round_trip_with_offset() {
        let shifted = End2EndEventProtectionProps {
            offset: 64,
            data_length: 128,
            ..props()
        };
        let mut tx = Protector::new(&shifted);
        let mut rx = Checker::new(&shifted);

        let mut data = vec![0x00; 16];
        tx.protect(&mut data).unwrap();
        assert_eq!(data[10], 0x00);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_data_id_mismatch_fails_crc() {
        // The ID is only implicit in the CRC for this profile.
        let mut tx = Protector::new(&props());
        let mut rx = Checker::new(&End2EndEventProtectionProps {
            data_id: 0x4321,
            ..props()
        });

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::CrcError);
    }

    #[test]
    fn test_counter_wraparound() {
        let mut tx = Protector::new(&props());
        let mut rx = Checker::new(&props());

        let mut data = vec![0x00; 8];
        for cycle in 0..=256u16 {
            tx.protect(&mut data).unwrap();
            assert_eq!(data[2], (cycle % 256) as u8);
            assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
        }
    }

    #[test]
    fn test_undersized_buffer_is_crc_error() {
        let mut rx = Checker::new(&props());
        assert_eq!(rx.check(&[0x00; 2]), ProfileCheckStatus::CrcError);
    }

    #[test]
    fn test_protect_rejects_wrong_size() {
        let mut tx = Protector::new(&props());
        let mut long = vec![0x00; 9];
        assert!(matches!(tx.protect(&mut long), Err(E2EError::WrongInput(_))));
    }
}
