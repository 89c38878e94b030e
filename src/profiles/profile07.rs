//! # E2E Profile 07 engine
//!
//! Protects large variable-length frames with:
//! - 64-bit CRC (XZ polynomial) for data integrity
//! - 32-bit counter for sequence checking
//! - 32-bit Data ID for masquerade prevention
//! - 32-bit length field for dynamic size data
//!
//! # Data layout
//! [DATA ... | CRC(8B) | LENGTH(4B) | COUNTER(4B) | ID(4B) | DATA ...]

use crate::common::{counter, field_ops};
use crate::profile::End2EndEventProtectionProps;
use crate::{E2EError, E2EResult, ProfileCheckStatus};
use crc::{Crc, CRC_64_XZ};

const COUNTER_MODULO: u64 = 0x1_0000_0000;

#[derive(Clone)]
struct Layout {
    offset: usize,
    min_bytes: usize,
    max_bytes: usize,
    data_id: u32,
    max_delta_counter: u32,
}

impl Layout {
    fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            offset: field_ops::offset_bytes(props.offset),
            min_bytes: (props.min_data_length / 8) as usize,
            max_bytes: (props.max_data_length / 8) as usize,
            data_id: props.data_id,
            max_delta_counter: props.max_delta_counter,
        }
    }

    fn length_acceptable(&self, len: usize) -> bool {
        len >= self.min_bytes && len <= self.max_bytes
    }

    /// CRC over everything except the CRC field itself; length, counter and
    /// ID fields are covered.
    fn compute_crc(&self, data: &[u8]) -> u64 {
        let crc = Crc::<u64>::new(&CRC_64_XZ);
        let mut digest = crc.digest();
        digest.update(&data[..self.offset]);
        digest.update(&data[self.offset + 8..]);
        digest.finalize()
    }
}

pub(crate) struct Protector {
    layout: Layout,
    counter: u32,
}

impl Protector {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            layout: Layout::new(props),
            counter: 0,
        }
    }

    pub(crate) fn protect(&mut self, data: &mut [u8]) -> E2EResult<()> {
        if !self.layout.length_acceptable(data.len()) {
            return Err(E2EError::WrongInput(format!(
                "Expected {} - {} bytes, got {} bytes",
                self.layout.min_bytes,
                self.layout.max_bytes,
                data.len()
            )));
        }
        let offset = self.layout.offset;
        field_ops::write_be_u32_at(data, offset + 8, data.len() as u32);
        field_ops::write_be_u32_at(data, offset + 12, self.counter);
        field_ops::write_be_u32_at(data, offset + 16, self.layout.data_id);
        let calculated_crc = self.layout.compute_crc(data);
        field_ops::write_be_u64_at(data, offset, calculated_crc);
        self.counter = (self.counter as u64 + 1) as u32;
        Ok(())
    }
}

pub(crate) struct Checker {
    layout: Layout,
    counter: u32,
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
        if !self.layout.length_acceptable(data.len()) {
            return ProfileCheckStatus::CrcError;
        }
        let offset = self.layout.offset;
        let rx_crc = field_ops::read_be_u64_at(data, offset);
        if self.layout.compute_crc(data) != rx_crc {
            return ProfileCheckStatus::CrcError;
        }
        if field_ops::read_be_u32_at(data, offset + 16) != self.layout.data_id {
            return ProfileCheckStatus::DataIdError;
        }
        if field_ops::read_be_u32_at(data, offset + 8) as usize != data.len() {
            return ProfileCheckStatus::DataLengthError;
        }
        let rx_counter = field_ops::read_be_u32_at(data, offset + 12);
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
