//! Send-side protection.
//!
//! [`ProfileProtector`] mirrors the dispatch of [`crate::checker`] on the
//! transmit path: it writes counter, Data ID and CRC fields in place and
//! advances the send counter only after a successful write.

use crate::frame::ProfileFrame;
use crate::profile::{End2EndEventProtectionProps, Profile};
use crate::profiles::{
    profile01, profile04, profile05, profile06, profile07, profile22, profile44,
};
use crate::E2EResult;

enum Engine {
    P01(profile01::Protector),
    P04(profile04::Protector),
    P05(profile05::Protector),
    P06(profile06::Protector),
    P07(profile07::Protector),
    P22(profile22::Protector),
    P44(profile44::Protector),
}

/// Stateful protector for one protected event.
pub struct ProfileProtector {
    frame: ProfileFrame,
    engine: Engine,
}

impl ProfileProtector {
    /// Builds a protector for the given profile.
    ///
    /// Panics if the configuration is invalid for the profile, see
    /// [`ProfileFrame::new`].
    pub fn new(profile: Profile, props: &End2EndEventProtectionProps) -> Self {
        let frame = ProfileFrame::new(profile, props);
        let engine = match profile {
            Profile::Profile01 | Profile::Proprietary => {
                Engine::P01(profile01::Protector::new(props))
            }
            Profile::Profile04 => Engine::P04(profile04::Protector::new(props)),
            Profile::Profile05 => Engine::P05(profile05::Protector::new(props)),
            Profile::Profile06 => Engine::P06(profile06::Protector::new(props)),
            Profile::Profile07 => Engine::P07(profile07::Protector::new(props)),
            Profile::Profile22 => Engine::P22(profile22::Protector::new(props)),
            Profile::Profile44 => Engine::P44(profile44::Protector::new(props)),
        };
        Self { frame, engine }
    }

    /// Writes the protection fields into `data` and advances the counter.
    ///
    /// Fails with [`crate::E2EError::WrongInput`] when the buffer does not
    /// satisfy the configured length constraints; the counter is left
    /// untouched in that case.
    pub fn protect(&mut self, data: &mut [u8]) -> E2EResult<()> {
        match &mut self.engine {
            Engine::P01(protector) => protector.protect(data),
            Engine::P04(protector) => protector.protect(data),
            Engine::P05(protector) => protector.protect(data),
            Engine::P06(protector) => protector.protect(data),
            Engine::P07(protector) => protector.protect(data),
            Engine::P22(protector) => protector.protect(data),
            Engine::P44(protector) => protector.protect(data),
        }
    }

    pub fn profile(&self) -> Profile {
        self.frame.profile()
    }

    /// Size of the protection header in bytes.
    pub fn header_size(&self) -> usize {
        self.frame.header_size()
    }
}
