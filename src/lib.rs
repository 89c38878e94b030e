//! # SOME/IP E2E Protection Core
//!
//! End-to-End (E2E) data protection for serialized event payloads exchanged
//! through a SOME/IP binding. The crate provides the three pieces a binding
//! composes per configured event:
//!
//! - a [`ProfileProtector`] that finalizes the reserved E2E header region of
//!   an outgoing buffer (counter, Data ID, CRC),
//! - a [`ProfileChecker`] that classifies a received buffer into a
//!   profile-native [`ProfileCheckStatus`], mapped into the generic
//!   six-valued [`CheckStatus`],
//! - a windowed [`StateMachine`] that debounces the per-sample verdicts into
//!   the externally visible [`E2EState`].
//!
//! [`ClientSideTransformer`] and [`ServerSideTransformer`] bundle these into
//! the single `check()`/`protect()` entry points the binding's deserializer
//! and serializer call.
//!
//! Supported profiles: 01, 04, 05, 06, 07, 22, 44 and a proprietary variant
//! of the Profile 01 layout. Configuration errors are fatal at construction;
//! anomalies in received data are never errors, only status values.
//!
//! ## Example
//!
//! ```rust
//! use someip_e2e::{
//!     CheckStatus, ClientSideTransformer, E2EProfileConfiguration, E2EState,
//!     End2EndEventProtectionProps, Profile, ServerSideTransformer,
//! };
//!
//! let props = End2EndEventProtectionProps {
//!     data_id: 0x1234,
//!     data_length: 64, // bits
//!     max_delta_counter: 1,
//!     offset: 0,
//!     ..Default::default()
//! };
//!
//! let mut server = ServerSideTransformer::new(Profile::Profile05, &props);
//! let mut client = ClientSideTransformer::new(
//!     Profile::Profile05,
//!     &props,
//!     E2EProfileConfiguration::default(),
//! );
//!
//! // 3 byte header region reserved at the front, payload behind it.
//! let mut sample = vec![0u8; 8];
//! server.protect(&mut sample, 0)?;
//!
//! let result = client.check(&sample, 0);
//! assert_eq!(result.check_status, CheckStatus::Ok);
//! assert_eq!(result.state, E2EState::Valid);
//! # Ok::<(), someip_e2e::E2EError>(())
//! ```

use thiserror::Error;

mod common;
mod profiles;

pub mod checker;
pub mod frame;
pub mod profile;
pub mod protector;
pub mod state_machine;
pub mod transformer;

pub use checker::ProfileChecker;
pub use frame::ProfileFrame;
pub use profile::{DataIdMode, End2EndEventProtectionProps, Profile};
pub use protector::ProfileProtector;
pub use state_machine::{E2EProfileConfiguration, E2EState, StateMachine};
pub use transformer::{CheckResult, ClientSideTransformer, ServerSideTransformer};

/// Result type for E2E operations
pub type E2EResult<T> = Result<T, E2EError>;

/// Profile-native result of a single check cycle.
///
/// Produced by [`ProfileChecker::check`]; the exact subset a profile can
/// return depends on its header fields (only length-bearing profiles
/// produce `DataLengthError`, only Profile 01 produces `Sync`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCheckStatus {
    /// The checks of the data in this cycle were successful
    Ok,
    /// Counter advanced by more than one but within the configured delta
    OkSomeLost,
    /// Checks passed but the receiver is still resynchronizing after a
    /// sequence loss (Profile 01)
    Sync,
    /// CRC check failed - data corruption detected
    CrcError,
    /// Data ID check failed - incorrect addressing
    DataIdError,
    /// Length field does not match the received buffer size
    DataLengthError,
    /// Counter did not advance - same sample as previous cycle
    Repeated,
    /// Counter jumped outside the allowed delta window
    WrongSequence,
    /// No sample was received in this cycle
    NoNewData,
    /// No check has been executed in this cycle
    NotAvailable,
}

/// Generic six-valued check outcome consumed by the [`StateMachine`].
///
/// This is the universal vocabulary independent of the profile; the mapping
/// from [`ProfileCheckStatus`] is a pure total function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Sample passed all checks
    Ok,
    /// Sample failed a CRC, Data ID or length check
    Error,
    /// Counter did not advance
    RepeatedData,
    /// Counter jumped out of the allowed delta window
    WrongSequence,
    /// No sample received this cycle
    NoNewData,
    /// No check executed this cycle
    NotAvailable,
}

impl From<ProfileCheckStatus> for CheckStatus {
    fn from(status: ProfileCheckStatus) -> Self {
        match status {
            ProfileCheckStatus::Ok | ProfileCheckStatus::OkSomeLost => CheckStatus::Ok,
            ProfileCheckStatus::CrcError
            | ProfileCheckStatus::DataIdError
            | ProfileCheckStatus::DataLengthError => CheckStatus::Error,
            ProfileCheckStatus::Repeated => CheckStatus::RepeatedData,
            ProfileCheckStatus::WrongSequence | ProfileCheckStatus::Sync => {
                CheckStatus::WrongSequence
            }
            ProfileCheckStatus::NoNewData => CheckStatus::NoNewData,
            ProfileCheckStatus::NotAvailable => CheckStatus::NotAvailable,
        }
    }
}

/// E2E Error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum E2EError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Buffer handed to Protect() does not match the configured layout
    #[error("Wrong input: {0}")]
    WrongInput(String),
}
