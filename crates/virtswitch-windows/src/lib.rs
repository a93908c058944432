/// Scheduled-task autostart registration via schtasks.exe.
pub mod autostart;

/// Hidden child-process plumbing shared by the adapters.
pub mod command;

/// Process-token elevation check.
pub mod elevation;

/// Read-only optional-feature status queries.
pub mod features;

/// The platform seam implementation handed to the controller.
pub mod platform;

/// Reboot command issuance.
pub mod restart;

/// The elevated toggle launch and its background wait.
pub mod toggle;

pub use platform::WindowsPlatform;
