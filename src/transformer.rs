//! One call surface per direction.
//!
//! [`ServerSideTransformer`] and [`ClientSideTransformer`] bundle the
//! protector, checker and state machine into the single entry point the
//! binding's serializer and deserializer call per sample. They hold no
//! state beyond their components; ordering is fixed (the profile check
//! runs to completion before the state machine sees the verdict).

use crate::checker::ProfileChecker;
use crate::profile::{End2EndEventProtectionProps, Profile};
use crate::protector::ProfileProtector;
use crate::state_machine::{E2EProfileConfiguration, E2EState, StateMachine};
use crate::{CheckStatus, E2EError, E2EResult};

/// Combined outcome of one client-side check cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// Generic verdict of this sample
    pub check_status: CheckStatus,
    /// Debounced communication state after this sample
    pub state: E2EState,
}

/// Receive path: profile check, status mapping and state-machine update.
pub struct ClientSideTransformer {
    checker: ProfileChecker,
    state_machine: StateMachine,
}

impl ClientSideTransformer {
    /// Panics if `props` is invalid for `profile`, see
    /// [`crate::ProfileFrame::new`].
    pub fn new(
        profile: Profile,
        props: &End2EndEventProtectionProps,
        sm_config: E2EProfileConfiguration,
    ) -> Self {
        Self {
            checker: ProfileChecker::new(profile, props),
            state_machine: StateMachine::new(sm_config),
        }
    }

    /// Checks the protected region starting at `non_checked_offset` bytes
    /// into the buffer and feeds the verdict into the state machine.
    ///
    /// An offset at or past the end of the buffer degrades to the empty
    /// slice, which the checker reports as NoNewData.
    pub fn check(&mut self, buffer: &[u8], non_checked_offset: usize) -> CheckResult {
        let protected = buffer.get(non_checked_offset..).unwrap_or(&[]);
        let check_status = CheckStatus::from(self.checker.check(protected));
        let state = self.state_machine.check(check_status);
        CheckResult {
            check_status,
            state,
        }
    }

    pub fn state(&self) -> E2EState {
        self.state_machine.state()
    }

    /// Size of the protection header in bytes.
    pub fn header_size(&self) -> usize {
        self.checker.header_size()
    }
}

/// Send path: thin delegation to the protector.
pub struct ServerSideTransformer {
    protector: ProfileProtector,
}

impl ServerSideTransformer {
    /// Panics if `props` is invalid for `profile`, see
    /// [`crate::ProfileFrame::new`].
    pub fn new(profile: Profile, props: &End2EndEventProtectionProps) -> Self {
        Self {
            protector: ProfileProtector::new(profile, props),
        }
    }

    /// Protects the region starting at `protected_offset` bytes into the
    /// buffer. The payload region must be finalized before this call; the
    /// header fields are written last.
    pub fn protect(&mut self, buffer: &mut [u8], protected_offset: usize) -> E2EResult<()> {
        let protected = buffer.get_mut(protected_offset..).ok_or_else(|| {
            E2EError::WrongInput(format!(
                "protected offset {protected_offset} out of range"
            ))
        })?;
        self.protector.protect(protected)
    }

    /// Size of the protection header in bytes.
    pub fn header_size(&self) -> usize {
        self.protector.header_size()
    }
}
