//! Per-profile bit-level engines.
//!
//! One module per profile family; each exposes a `Checker` and a
//! `Protector` consumed through the closed dispatch in
//! [`crate::checker`] / [`crate::protector`]. The proprietary profile
//! shares the Profile 01 engine, Profile 44 shares the Profile 04 engine
//! with a different CRC algorithm.

pub(crate) mod profile01;
pub(crate) mod profile04;
pub(crate) mod profile05;
pub(crate) mod profile06;
pub(crate) mod profile07;
pub(crate) mod profile22;
pub(crate) mod profile44;
