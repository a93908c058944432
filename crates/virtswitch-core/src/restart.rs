//! Restart plans and the fixed schedule choices.
//!
//! A plan is consumed by value when it is applied: the restart state
//! machine admits exactly one transition out of the awaiting-choice
//! state, with no re-entry.

/// What to do about the mandatory restart after a successful toggle.
#[derive(Debug, PartialEq, Eq)]
pub enum RestartPlan {
    /// Reboot with zero delay.
    Immediate,
    /// Reboot after the given number of seconds.
    ScheduledAfter(u32),
    /// Issue no reboot command; the user restarts manually later.
    Deferred,
}

impl RestartPlan {
    /// The delay to pass to the reboot primitive, or `None` when no
    /// reboot command should be issued at all.
    pub fn delay_seconds(&self) -> Option<u32> {
        match self {
            Self::Immediate => Some(0),
            Self::ScheduledAfter(secs) => Some(*secs),
            Self::Deferred => None,
        }
    }
}

/// The fixed set of scheduled-restart delays offered to the user.
pub const DELAY_CHOICES: [(u32, &str); 4] = [
    (300, "in 5 minutes"),
    (1800, "in 30 minutes"),
    (3600, "in 1 hour"),
    (7200, "in 2 hours"),
];

/// Looks up the label for a delay, used in scheduling confirmations.
pub fn delay_label(delay_seconds: u32) -> Option<&'static str> {
    DELAY_CHOICES
        .iter()
        .find(|(secs, _)| *secs == delay_seconds)
        .map(|(_, label)| *label)
}
