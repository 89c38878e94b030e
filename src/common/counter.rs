//! Counter delta computation and classification shared by the profiles.
//!
//! Every profile carries a sequence counter of some width; the wrap-around
//! delta and its classification into the native status values are identical
//! across widths, so they are computed here in `u64` and cast by the caller.

use crate::ProfileCheckStatus;

/// Wrap-around distance from `current` to `received` for a counter with the
/// given modulo.
pub(crate) fn wrapping_delta(current: u64, received: u64, modulo: u64) -> u64 {
    if received >= current {
        received - current
    } else {
        (modulo + received - current) % modulo
    }
}

/// Classify the received counter delta.
///
/// A delta of zero before the first successful reception is `Ok` - the
/// receiver has no history yet, so the sender's initial counter value is
/// accepted as-is.
pub(crate) fn classify_delta(
    delta: u64,
    max_delta: u64,
    initialized: bool,
) -> ProfileCheckStatus {
    if delta == 0 {
        if initialized {
            ProfileCheckStatus::Repeated
        } else {
            ProfileCheckStatus::Ok
        }
    } else if delta == 1 {
        ProfileCheckStatus::Ok
    } else if delta <= max_delta {
        ProfileCheckStatus::OkSomeLost
    } else {
        ProfileCheckStatus::WrongSequence
    }
}
