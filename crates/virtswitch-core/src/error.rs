//! Error taxonomy for the toggle controller.
//!
//! Every OS-primitive failure is converted to one of these variants at
//! the boundary of the component that invoked it; raw launch errors
//! never reach the presentation layer. Nothing here is fatal — every
//! failure path returns control to the idle state, and nothing retries
//! automatically.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// The current process lacks administrative rights; nothing was
    /// launched.
    NotElevated,
    /// The elevation prompt was declined or the elevated process could
    /// not be created. Guaranteed pre-mutation: no OS state changed.
    ElevationDeclined(String),
    /// The elevated toggle process ran and exited non-zero. Post-launch:
    /// feature state may have partially changed. The code is
    /// informational only.
    ToggleFailed(i32),
    /// The reboot command failed to launch. Surfaced once, never retried.
    RestartIssue(String),
    /// The autostart task could not be created or deleted; the caller
    /// rolls back any optimistic UI state.
    Registration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotElevated => {
                write!(f, "administrator privileges are required for this operation")
            }
            Self::ElevationDeclined(reason) => {
                write!(f, "elevation was declined or unavailable: {reason}")
            }
            Self::ToggleFailed(code) => {
                write!(f, "the feature toggle process exited with code {code}")
            }
            Self::RestartIssue(reason) => write!(f, "could not issue restart: {reason}"),
            Self::Registration(reason) => {
                write!(f, "autostart registration change failed: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}
