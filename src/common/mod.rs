//! Shared low-level building blocks of the profile engines.

pub(crate) mod counter;
pub(crate) mod crc_ops;
pub(crate) mod field_ops;
pub(crate) mod validation;
