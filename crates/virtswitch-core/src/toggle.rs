//! Toggle actions, outcomes, and the one-shot completion handle.
//!
//! The platform layer launches the elevated toggle process and hands the
//! caller a [`PendingToggle`]. A background thread owns the wait on the
//! external process and delivers exactly one [`ToggleOutcome`] through a
//! channel; consuming the outcome consumes the handle.

use std::sync::mpsc::{Receiver, Sender, channel};

/// The direction of a toggle: always the opposite of the known aggregate
/// status at the time the toggle was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Enable,
    Disable,
}

impl ToggleAction {
    /// The action that flips the given aggregate status.
    pub fn to_flip(currently_enabled: bool) -> Self {
        if currently_enabled {
            Self::Disable
        } else {
            Self::Enable
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// Terminal result of one toggle attempt. Set exactly once.
///
/// `Failed` carries the external exit code; it is informational only and
/// never triggers an automatic retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Succeeded,
    Failed(i32),
}

/// Exit code reported when the background wait was abandoned before it
/// could deliver a real one (the wait thread died without sending).
pub const WAIT_ABANDONED_CODE: i32 = -1;

/// Completion handle for one in-flight toggle.
///
/// At most one toggle is in flight at a time; the caller holds this
/// handle until it resolves and must not request another toggle before
/// then. The handle is not cloneable and `wait` takes it by value, so
/// the outcome can be observed exactly once.
pub struct PendingToggle {
    rx: Receiver<ToggleOutcome>,
}

impl PendingToggle {
    /// Creates the completion channel: the sender goes to the background
    /// wait, the handle goes to the caller.
    pub fn channel() -> (Sender<ToggleOutcome>, Self) {
        let (tx, rx) = channel();
        (tx, Self { rx })
    }

    /// Blocks until the toggle process exits and returns its outcome.
    pub fn wait(self) -> ToggleOutcome {
        self.rx
            .recv()
            .unwrap_or(ToggleOutcome::Failed(WAIT_ABANDONED_CODE))
    }

    /// Non-blocking check; `None` while the external process still runs.
    pub fn try_outcome(&self) -> Option<ToggleOutcome> {
        self.rx.try_recv().ok()
    }
}
