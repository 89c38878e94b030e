//! # E2E Profile 22 engine
//!
//! Protects small fixed-length data with minimal overhead:
//! - 8-bit CRC (AUTOSAR polynomial) for data integrity
//! - 4-bit counter for sequence checking
//! - counter-indexed Data ID list for masquerade prevention
//!
//! # Data layout
//! [DATA ... | CRC(1B) | HDR(1B) | DATA ...]
//! - HDR (bits 3..0) : counter

use crate::common::{counter, field_ops};
use crate::profile::End2EndEventProtectionProps;
use crate::{E2EError, E2EResult, ProfileCheckStatus};
use crc::{Crc, CRC_8_AUTOSAR};

const COUNTER_MASK: u8 = 0x0F;
const COUNTER_MODULO: u64 = 16;

#[derive(Clone)]
struct Layout {
    offset: usize,
    data_length_bytes: usize,
    data_id_list: [u8; 16],
    max_delta_counter: u8,
}

impl Layout {
    fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            offset: field_ops::offset_bytes(props.offset),
            data_length_bytes: (props.data_length / 8) as usize,
            data_id_list: props.data_id_list,
            max_delta_counter: props.max_delta_counter as u8,
        }
    }

    fn read_counter(&self, data: &[u8]) -> u8 {
        data[self.offset + 1] & COUNTER_MASK
    }

    /// CRC over everything except the CRC byte, with the Data ID selected by
    /// the counter already present in the header.
    fn compute_crc(&self, data: &[u8]) -> u8 {
        let crc = Crc::<u8>::new(&CRC_8_AUTOSAR);
        let mut digest = crc.digest();
        digest.update(&data[..self.offset]);
        digest.update(&data[self.offset + 1..]);
        digest.update(&[self.data_id_list[self.read_counter(data) as usize]]);
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
        let offset = self.layout.offset;
        data[offset + 1] = (data[offset + 1] & !COUNTER_MASK) | self.counter;
        data[offset] = self.layout.compute_crc(data);
        self.counter = (self.counter + 1) % COUNTER_MODULO as u8;
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
        if self.layout.compute_crc(data) != data[self.layout.offset] {
            return ProfileCheckStatus::CrcError;
        }
        let rx_counter = self.layout.read_counter(data);
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
