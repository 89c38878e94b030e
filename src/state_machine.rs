//! Windowed E2E communication state machine.
//!
//! Converts the stream of per-cycle [`CheckStatus`] verdicts into a
//! debounced [`E2EState`]. Each state carries its own bounded history
//! window; thresholds decide when enough evidence has accumulated to
//! change state. A single bad sample never flips the reported state
//! unless the thresholds say so.

use crate::CheckStatus;
use std::collections::VecDeque;

/// Externally visible communication state of one protected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E2EState {
    /// No sample has been evaluated yet
    NoData,
    /// Samples seen, not enough evidence for a verdict
    Init,
    /// Communication is healthy
    Valid,
    /// Communication is disturbed
    Invalid,
}

/// State-machine tuning, one window size and threshold pair per state.
///
/// `MinOk <= WindowSize` and `MaxError <= WindowSize` are the caller's
/// contract; they are validated where the configuration is created, not
/// here.
#[derive(Debug, Clone)]
pub struct E2EProfileConfiguration {
    /// Window size while in NoData/Init
    pub window_size_init: usize,
    /// Window size while in Valid
    pub window_size_valid: usize,
    /// Window size while in Invalid
    pub window_size_invalid: usize,
    /// Ok samples required to leave NoData/Init for Valid
    pub min_ok_state_init: usize,
    /// Ok samples required to stay in Valid
    pub min_ok_state_valid: usize,
    /// Ok samples required to leave Invalid for Valid
    pub min_ok_state_invalid: usize,
    /// Errors tolerated in NoData/Init before Invalid
    pub max_error_state_init: usize,
    /// Errors tolerated in Valid before Invalid
    pub max_error_state_valid: usize,
    /// Errors tolerated in Invalid
    pub max_error_state_invalid: usize,
    /// Discard window history when transitioning into Invalid
    pub clear_to_invalid: bool,
    /// Permit the direct NoData -> Invalid transition on a first NotOk
    pub transit_to_invalid_extended: bool,
}

impl Default for E2EProfileConfiguration {
    fn default() -> Self {
        Self {
            window_size_init: 10,
            window_size_valid: 10,
            window_size_invalid: 10,
            min_ok_state_init: 1,
            min_ok_state_valid: 1,
            min_ok_state_invalid: 2,
            max_error_state_init: 5,
            max_error_state_valid: 5,
            max_error_state_invalid: 10,
            clear_to_invalid: true,
            transit_to_invalid_extended: false,
        }
    }
}

/// Bounded circular record of recent pass/fail outcomes.
///
/// Owned exclusively by its [`StateMachine`]; resized or cleared on state
/// transitions depending on configuration.
struct CheckStatusWindow {
    entries: VecDeque<bool>,
    capacity: usize,
}

impl CheckStatusWindow {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn record(&mut self, ok: bool) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ok);
    }

    /// Counts over the entries actually recorded; a partially filled
    /// window never inflates either count.
    fn ok_count(&self) -> usize {
        self.entries.iter().filter(|ok| **ok).count()
    }

    fn error_count(&self) -> usize {
        self.entries.iter().filter(|ok| !**ok).count()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    /// Changes capacity, keeping the newest entries when shrinking.
    fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
    }
}

/// Per-event windowed voting state machine.
///
/// Strictly call-ordered; construct one instance per protected event and
/// feed it one [`CheckStatus`] per reception cycle.
pub struct StateMachine {
    config: E2EProfileConfiguration,
    state: E2EState,
    window: CheckStatusWindow,
    samples_seen: bool,
}

impl StateMachine {
    pub fn new(config: E2EProfileConfiguration) -> Self {
        let window = CheckStatusWindow::new(config.window_size_init);
        Self {
            config,
            state: E2EState::NoData,
            window,
            samples_seen: false,
        }
    }

    pub fn state(&self) -> E2EState {
        self.state
    }

    /// Records one verdict and returns the resulting state.
    pub fn check(&mut self, status: CheckStatus) -> E2EState {
        let ok = status == CheckStatus::Ok;
        let first_sample = !self.samples_seen;
        self.samples_seen = true;
        self.window.record(ok);

        let ok_count = self.window.ok_count();
        let error_count = self.window.error_count();

        let next = match self.state {
            E2EState::NoData | E2EState::Init => {
                if first_sample && !ok && self.config.transit_to_invalid_extended {
                    E2EState::Invalid
                } else if ok_count >= self.config.min_ok_state_init {
                    E2EState::Valid
                } else if error_count > self.config.max_error_state_init {
                    E2EState::Invalid
                } else {
                    E2EState::Init
                }
            }
            E2EState::Valid => {
                if error_count > self.config.max_error_state_valid {
                    E2EState::Invalid
                } else {
                    E2EState::Valid
                }
            }
            E2EState::Invalid => {
                if ok_count >= self.config.min_ok_state_invalid {
                    E2EState::Valid
                } else {
                    E2EState::Invalid
                }
            }
        };

        if next != self.state {
            self.transition(next);
        }
        self.state
    }

    fn transition(&mut self, target: E2EState) {
        if target == E2EState::Invalid && self.config.clear_to_invalid {
            self.window.clear();
        }
        let capacity = match target {
            E2EState::NoData | E2EState::Init => self.config.window_size_init,
            E2EState::Valid => self.config.window_size_valid,
            E2EState::Invalid => self.config.window_size_invalid,
        };
        self.window.resize(capacity);
        tracing::debug!(from = ?self.state, to = ?target, "E2E state transition");
        self.state = target;
    }
}
