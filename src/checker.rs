//! Receive-side protection checking.
//!
//! [`ProfileChecker`] binds a validated [`ProfileFrame`] to the matching
//! per-profile engine and evaluates received byte slices against the
//! protection header. Checking never fails: every wire-data anomaly maps
//! to a [`ProfileCheckStatus`] value.

use crate::frame::ProfileFrame;
use crate::profile::{End2EndEventProtectionProps, Profile};
use crate::profiles::{
    profile01, profile04, profile05, profile06, profile07, profile22, profile44,
};
use crate::ProfileCheckStatus;

enum Engine {
    P01(profile01::Checker),
    P04(profile04::Checker),
    P05(profile05::Checker),
    P06(profile06::Checker),
    P07(profile07::Checker),
    P22(profile22::Checker),
    P44(profile44::Checker),
}

/// Stateful checker for one protected event.
///
/// Holds the receive counter state between calls, so one instance must be
/// used per event stream.
pub struct ProfileChecker {
    frame: ProfileFrame,
    engine: Engine,
}

impl ProfileChecker {
    /// Builds a checker for the given profile.
    ///
    /// Panics if the configuration is invalid for the profile, see
    /// [`ProfileFrame::new`].
    pub fn new(profile: Profile, props: &End2EndEventProtectionProps) -> Self {
        let frame = ProfileFrame::new(profile, props);
        let engine = match profile {
            // the proprietary profile relaxes Profile 01 length limits only
            Profile::Profile01 | Profile::Proprietary => {
                Engine::P01(profile01::Checker::new(props))
            }
            Profile::Profile04 => Engine::P04(profile04::Checker::new(props)),
            Profile::Profile05 => Engine::P05(profile05::Checker::new(props)),
            Profile::Profile06 => Engine::P06(profile06::Checker::new(props)),
            Profile::Profile07 => Engine::P07(profile07::Checker::new(props)),
            Profile::Profile22 => Engine::P22(profile22::Checker::new(props)),
            Profile::Profile44 => Engine::P44(profile44::Checker::new(props)),
        };
        Self { frame, engine }
    }

    /// Evaluates one received sample. An empty slice means no sample
    /// arrived in this cycle.
    pub fn check(&mut self, data: &[u8]) -> ProfileCheckStatus {
        match &mut self.engine {
            Engine::P01(checker) => checker.check(data),
            Engine::P04(checker) => checker.check(data),
            Engine::P05(checker) => checker.check(data),
            Engine::P06(checker) => checker.check(data),
            Engine::P07(checker) => checker.check(data),
            Engine::P22(checker) => checker.check(data),
            Engine::P44(checker) => checker.check(data),
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
