//! # E2E Profile 01 engine
//!
//! Protects small fixed-length frames with:
//! - 8-bit CRC (SAE-J1850 polynomial, zero init/xorout)
//! - 4-bit counter at a configurable nibble offset
//! - implicit 16-bit Data ID folded into the CRC per [`DataIdMode`],
//!   with an optional explicit high nibble in Nibble mode
//!
//! The header has no dedicated region; CRC byte, counter nibble and ID
//! nibble live inside the data at configured bit offsets. The proprietary
//! profile runs the same engine with a relaxed validation table.
//!
//! Beyond the plain counter check the engine tracks two resynchronization
//! quantities: consecutive missing/repeated samples
//! (`max_no_new_or_repeated_data`) and the number of in-sequence samples
//! required after a sequence loss (`sync_counter_init`). While the latter
//! is draining, passing samples classify as `Sync` rather than `Ok`.

use crate::common::{counter, crc_ops, field_ops};
use crate::profile::{DataIdMode, End2EndEventProtectionProps};
use crate::{E2EError, E2EResult, ProfileCheckStatus};
use crc::Crc;

const COUNTER_MODULO: u64 = 16;

/// Field placement and CRC folding shared by checker and protector.
#[derive(Clone)]
struct Layout {
    data_length_bytes: usize,
    counter_offset: u32,
    crc_offset: u32,
    nibble_offset: u32,
    data_id: u16,
    mode: DataIdMode,
    max_delta_counter: u8,
}

impl Layout {
    fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            data_length_bytes: (props.data_length / 8) as usize,
            counter_offset: props.counter_offset,
            crc_offset: props.crc_offset,
            nibble_offset: props.data_id_nibble_offset,
            data_id: props.data_id as u16,
            mode: props.data_id_mode,
            max_delta_counter: props.max_delta_counter as u8,
        }
    }

    fn crc_byte(&self) -> usize {
        field_ops::offset_bytes(self.crc_offset)
    }

    /// CRC over the folded Data ID followed by all data bytes except the
    /// CRC byte itself. Alt mode folds the low ID byte on even counters and
    /// the high byte on odd ones, so the transmitted counter is an input.
    fn compute_crc(&self, counter: u8, data: &[u8]) -> u8 {
        let crc = Crc::<u8>::new(&crc_ops::CRC8_PROFILE01);
        let mut digest = crc.digest();
        let id = self.data_id.to_le_bytes();
        match self.mode {
            DataIdMode::Both => digest.update(&id),
            DataIdMode::Low => digest.update(&[id[0]]),
            DataIdMode::Nibble => digest.update(&[id[0], 0x00]),
            DataIdMode::Alt => {
                if counter % 2 == 0 {
                    digest.update(&[id[0]]);
                } else {
                    digest.update(&[id[1]]);
                }
            }
        }
        let crc_byte = self.crc_byte();
        digest.update(&data[..crc_byte]);
        digest.update(&data[crc_byte + 1..]);
        digest.finalize()
    }

    fn id_nibble(&self) -> u8 {
        ((self.data_id >> 8) & 0x0F) as u8
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
        if self.layout.mode == DataIdMode::Nibble {
            field_ops::write_nibble_at(data, self.layout.nibble_offset, self.layout.id_nibble());
        }
        field_ops::write_nibble_at(data, self.layout.counter_offset, self.counter);
        let calculated_crc = self.layout.compute_crc(self.counter, data);
        data[self.layout.crc_byte()] = calculated_crc;
        self.counter = (self.counter + 1) % COUNTER_MODULO as u8;
        Ok(())
    }
}

pub(crate) struct Checker {
    layout: Layout,
    counter: u8,
    initialized: bool,
    no_new_or_repeated: u32,
    sync: u32,
    max_no_new_or_repeated: u32,
    sync_counter_init: u32,
}

impl Checker {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            layout: Layout::new(props),
            counter: 0,
            initialized: false,
            no_new_or_repeated: 0,
            sync: 0,
            max_no_new_or_repeated: props.max_no_new_or_repeated_data,
            sync_counter_init: props.sync_counter_init,
        }
    }

    pub(crate) fn check(&mut self, data: &[u8]) -> ProfileCheckStatus {
        if data.is_empty() {
            self.no_new_or_repeated = self.no_new_or_repeated.saturating_add(1);
            return ProfileCheckStatus::NoNewData;
        }
        // A buffer that does not match the configured length substitutes
        // the wrong-CRC status for what would otherwise be an
        // out-of-bounds access.
        if data.len() != self.layout.data_length_bytes {
            return ProfileCheckStatus::CrcError;
        }
        let rx_counter = field_ops::read_nibble_at(data, self.layout.counter_offset);
        let rx_crc = data[self.layout.crc_byte()];
        if self.layout.compute_crc(rx_counter, data) != rx_crc {
            return ProfileCheckStatus::CrcError;
        }
        if self.layout.mode == DataIdMode::Nibble
            && field_ops::read_nibble_at(data, self.layout.nibble_offset) != self.layout.id_nibble()
        {
            return ProfileCheckStatus::DataIdError;
        }
        let delta =
            counter::wrapping_delta(self.counter as u64, rx_counter as u64, COUNTER_MODULO);
        if delta == 0 && self.initialized {
            self.no_new_or_repeated = self.no_new_or_repeated.saturating_add(1);
            return ProfileCheckStatus::Repeated;
        }
        self.counter = rx_counter;
        self.initialized = true;
        if delta > self.layout.max_delta_counter as u64 {
            self.no_new_or_repeated = 0;
            self.sync = self.sync_counter_init;
            return ProfileCheckStatus::WrongSequence;
        }
        self.accept(delta)
    }

    /// Sample is in sequence; decide between Ok, OkSomeLost and the
    /// resynchronization verdict.
    fn accept(&mut self, delta: u64) -> ProfileCheckStatus {
        if self.no_new_or_repeated > self.max_no_new_or_repeated {
            self.sync = self.sync_counter_init;
        }
        self.no_new_or_repeated = 0;
        if self.sync > 0 {
            self.sync -= 1;
            return ProfileCheckStatus::Sync;
        }
        if delta > 1 {
            ProfileCheckStatus::OkSomeLost
        } else {
            ProfileCheckStatus::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nibble_props() -> End2EndEventProtectionProps {
        End2EndEventProtectionProps {
            data_id: 0x123,
            data_id_mode: DataIdMode::Nibble,
            data_length: 64,
            counter_offset: 8,
            crc_offset: 0,
            data_id_nibble_offset: 12,
            max_delta_counter: 1,
            sync_counter_init: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_nibble_mode() {
        let props = nibble_props();
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        // counter 0 in the low nibble, ID nibble 1 in the high nibble
        assert_eq!(data[1], 0x10);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);

        tx.protect(&mut data).unwrap();
        assert_eq!(data[1], 0x11);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_round_trip_both_mode() {
        let props = End2EndEventProtectionProps {
            data_id_mode: DataIdMode::Both,
            data_id: 0x1234,
            ..nibble_props()
        };
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0xA5; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_round_trip_low_mode() {
        let props = End2EndEventProtectionProps {
            data_id_mode: DataIdMode::Low,
            data_id: 0x1234,
            ..nibble_props()
        };
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x11; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_round_trip_alt_mode_even_and_odd_counters() {
        let props = End2EndEventProtectionProps {
            data_id_mode: DataIdMode::Alt,
            data_id: 0x1234,
            ..nibble_props()
        };
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        for _ in 0..3 {
            tx.protect(&mut data).unwrap();
            assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
        }
    }

    #[test]
    fn test_crc_corruption_detected() {
        let props = nibble_props();
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        data[5] ^= 0xFF;
        assert_eq!(rx.check(&data), ProfileCheckStatus::CrcError);
    }

    #[test]
    fn test_nibble_mismatch_is_data_id_error() {
        // Same low ID byte keeps the CRC intact; only the explicit nibble
        // differs between sender and receiver.
        let mut tx = Protector::new(&nibble_props());
        let mut rx = Checker::new(&End2EndEventProtectionProps {
            data_id: 0x523,
            ..nibble_props()
        });

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::DataIdError);
    }

    #[test]
    fn test_counter_wraps_fifteen_to_zero() {
        let props = nibble_props();
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        for cycle in 0..18u8 {
            tx.protect(&mut data).unwrap();
            assert_eq!(data[1] & 0x0F, cycle % 16);
            assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
        }
    }

    #[test]
    fn test_repeated_sample() {
        let props = nibble_props();
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Repeated);
    }

    #[test]
    fn test_some_lost_within_delta() {
        let props = End2EndEventProtectionProps {
            max_delta_counter: 3,
            ..nibble_props()
        };
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        rx.check(&data);
        let mut lost = vec![0x00; 8];
        tx.protect(&mut lost).unwrap();
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::OkSomeLost);
    }

    #[test]
    fn test_wrong_sequence_then_sync_recovery() {
        let props = End2EndEventProtectionProps {
            sync_counter_init: 2,
            ..nibble_props()
        };
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);

        // Drop two samples: delta 3 exceeds max_delta_counter 1.
        let mut scratch = vec![0x00; 8];
        tx.protect(&mut scratch).unwrap();
        tx.protect(&mut scratch).unwrap();
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::WrongSequence);

        // Two in-sequence samples drain the sync counter before Ok resumes.
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Sync);
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Sync);
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_missing_samples_force_resync() {
        let props = End2EndEventProtectionProps {
            max_no_new_or_repeated_data: 1,
            sync_counter_init: 1,
            ..nibble_props()
        };
        let mut tx = Protector::new(&props);
        let mut rx = Checker::new(&props);

        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);

        // Two empty cycles exceed the tolerated single missing sample.
        assert_eq!(rx.check(&[]), ProfileCheckStatus::NoNewData);
        assert_eq!(rx.check(&[]), ProfileCheckStatus::NoNewData);

        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Sync);
        tx.protect(&mut data).unwrap();
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }

    #[test]
    fn test_undersized_buffer_is_crc_error() {
        let mut rx = Checker::new(&nibble_props());
        assert_eq!(rx.check(&[0x00; 4]), ProfileCheckStatus::CrcError);
    }

    #[test]
    fn test_protect_rejects_wrong_size() {
        let mut tx = Protector::new(&nibble_props());
        let mut short = vec![0x00; 4];
        assert!(matches!(
            tx.protect(&mut short),
            Err(E2EError::WrongInput(_))
        ));

        // Counter is untouched by the failed call.
        let props = nibble_props();
        let mut rx = Checker::new(&props);
        let mut data = vec![0x00; 8];
        tx.protect(&mut data).unwrap();
        assert_eq!(data[1] & 0x0F, 0);
        assert_eq!(rx.check(&data), ProfileCheckStatus::Ok);
    }
}
