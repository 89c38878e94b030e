//! # E2E Profile 04 engine
//!
//! Protects variable-length frames with:
//! - 32-bit CRC (AUTOSAR polynomial) for data integrity
//! - 16-bit counter for sequence checking
//! - 32-bit Data ID for masquerade prevention
//! - 16-bit length field for dynamic size data
//!
//! # Data layout
//! [DATA ... | LENGTH(2B) | COUNTER(2B) | ID(4B) | CRC(4B) | DATA ...]
//!
//! Profile 44 uses the identical layout with the Ethernet CRC-32 and is
//! built on this engine via [`Checker::with_algorithm`] /
//! [`Protector::with_algorithm`].

use crate::common::{counter, field_ops};
use crate::profile::End2EndEventProtectionProps;
use crate::{E2EError, E2EResult, ProfileCheckStatus};
use crc::{Algorithm, Crc, CRC_32_AUTOSAR};

const COUNTER_MODULO: u64 = 0x10000;
const HEADER_BYTES: usize = 12;

#[derive(Clone)]
struct Layout {
    offset: usize,
    min_bytes: usize,
    max_bytes: usize,
    data_id: u32,
    max_delta_counter: u16,
    algorithm: &'static Algorithm<u32>,
}

impl Layout {
    fn new(props: &End2EndEventProtectionProps, algorithm: &'static Algorithm<u32>) -> Self {
        Self {
            offset: field_ops::offset_bytes(props.offset),
            min_bytes: (props.min_data_length / 8) as usize,
            max_bytes: (props.max_data_length / 8) as usize,
            data_id: props.data_id,
            max_delta_counter: props.max_delta_counter as u16,
            algorithm,
        }
    }

    fn length_acceptable(&self, len: usize) -> bool {
        len >= self.min_bytes && len <= self.max_bytes
    }

    /// CRC over everything except the CRC field itself.
    fn compute_crc(&self, data: &[u8]) -> u32 {
        let crc = Crc::<u32>::new(self.algorithm);
        let mut digest = crc.digest();
        digest.update(&data[..self.offset + 8]);
        digest.update(&data[self.offset + HEADER_BYTES..]);
        digest.finalize()
    }
}

pub(crate) struct Protector {
    layout: Layout,
    counter: u16,
}

impl Protector {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self::with_algorithm(props, &CRC_32_AUTOSAR)
    }

    pub(crate) fn with_algorithm(
        props: &End2EndEventProtectionProps,
        algorithm: &'static Algorithm<u32>,
    ) -> Self {
        Self {
            layout: Layout::new(props, algorithm),
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
        field_ops::write_be_u16_at(data, offset, data.len() as u16);
        field_ops::write_be_u16_at(data, offset + 2, self.counter);
        field_ops::write_be_u32_at(data, offset + 4, self.layout.data_id);
        let calculated_crc = self.layout.compute_crc(data);
        field_ops::write_be_u32_at(data, offset + 8, calculated_crc);
        self.counter = (self.counter as u32 + 1) as u16;
        Ok(())
    }
}

pub(crate) struct Checker {
    layout: Layout,
    counter: u16,
    initialized: bool,
}

impl Checker {
    pub(crate) fn new(props: &End2EndEventProtectionProps) -> Self {
        Self::with_algorithm(props, &CRC_32_AUTOSAR)
    }

    pub(crate) fn with_algorithm(
        props: &End2EndEventProtectionProps,
        algorithm: &'static Algorithm<u32>,
    ) -> Self {
        Self {
            layout: Layout::new(props, algorithm),
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
        let rx_crc = field_ops::read_be_u32_at(data, offset + 8);
        if self.layout.compute_crc(data) != rx_crc {
            return ProfileCheckStatus::CrcError;
        }
        if field_ops::read_be_u32_at(data, offset + 4) != self.layout.data_id {
            return ProfileCheckStatus::DataIdError;
        }
        if field_ops::read_be_u16_at(data, offset) as usize != data.len() {
            return ProfileCheckStatus::DataLengthError;
        }
        let rx_counter = field_ops::read_be_u16_at(data, offset + 2);
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
