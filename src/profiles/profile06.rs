//! # E2E Profile 06 engine
//!
//! Protects variable-length frames with:
//! - 16-bit CRC (IBM 3740) for data integrity
//! - 8-bit counter for sequence checking
//! - 16-bit Data ID folded into the CRC, big-endian
//! - 16-bit length field for dynamic size data
//!
//! # Data layout
//! [DATA ... | CRC(2B) | LENGTH(2B) | COUNTER(1B) | DATA ...]

use crate::common::{counter, field_ops};
use crate::profile::End2EndEventProtectionProps;
use crate::{E2EError, E2EResult, ProfileCheckStatus};
use crc::{Crc, CRC_16_IBM_3740};

const COUNTER_MODULO: u64 = 0x100;

#[derive(Clone)]
struct Layout {
    offset: usize,
    min_bytes: usize,
    max_bytes: usize,
    data_id: u16,
    max_delta_counter: u8,
}

impl Layout {
    fn new(props: &End2EndEventProtectionProps) -> Self {
        Self {
            offset: field_ops::offset_bytes(props.offset),
            min_bytes: (props.min_data_length / 8) as usize,
            max_bytes: (props.max_data_length / 8) as usize,
            data_id: props.data_id as u16,
            max_delta_counter: props.max_delta_counter as u8,
        }
    }

    fn length_acceptable(&self, len: usize) -> bool {
        len >= self.min_bytes && len <= self.max_bytes
    }

    /// CRC over everything except the CRC field, Data ID folded in
    /// big-endian after the data.
    fn compute_crc(&self, data: &[u8]) -> u16 {
        let crc = Crc::<u16>::new(&CRC_16_IBM_3740);
        let mut digest = crc.digest();
        digest.update(&data[..self.offset]);
        digest.update(&data[self.offset + 2..]);
        digest.update(&self.data_id.to_be_bytes());
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
        if !self.layout.length_acceptable(data.len()) {
            return Err(E2EError::WrongInput(format!(
                "Expected {} - {} bytes, got {} bytes",
                self.layout.min_bytes,
                self.layout.max_bytes,
                data.len()
            )));
        }
        let offset = self.layout.offset;
        field_ops::write_be_u16_at(data, offset + 2, data.len() as u16);
        data[offset + 4] = self.counter;
        let calculated_crc = self.layout.compute_crc(data);
        field_ops::write_be_u16_at(data, offset, calculated_crc);
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
        if !self.layout.length_acceptable(data.len()) {
            return ProfileCheckStatus::CrcError;
        }
        let offset = self.layout.offset;
        let rx_crc = field_ops::read_be_u16_at(data, offset);
        if self.layout.compute_crc(data) != rx_crc {
            return ProfileCheckStatus::CrcError;
        }
        if field_ops::read_be_u16_at(data, offset + 2) as usize != data.len() {
            return ProfileCheckStatus::DataLengthError;
        }
        let rx_counter = data[offset + 4];
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
