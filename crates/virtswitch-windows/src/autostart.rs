//! Autostart registration via a logon scheduled task.
//!
//! `schtasks.exe` owns the persisted record; we only consume exit
//! codes. The task runs at user logon with the highest run level so the
//! elevation gate passes without a UAC round-trip at every boot. The
//! fixed task name keys the registration: create overwrites (`/F`) and
//! delete removes by name, so at most one record ever exists.

use std::path::Path;

use crate::command;

/// The fixed scheduled-task name identifying our registration.
pub const TASK_NAME: &str = "Virtswitch";

/// Whether the logon task currently exists. Exit code 0 means present.
pub fn is_registered() -> bool {
    command::hidden("schtasks.exe")
        .args(["/Query", "/TN", TASK_NAME])
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Creates (or replaces) the logon task pointing at `executable`.
pub fn register(executable: &Path) -> Result<(), String> {
    // The target path is quoted so paths with spaces survive the task
    // scheduler's command-line parsing.
    let target = format!("\"{}\"", executable.display());
    run_schtasks(&[
        "/Create", "/F", "/TN", TASK_NAME, "/TR", &target, "/SC", "ONLOGON", "/RL", "HIGHEST",
    ])
}

/// Deletes the logon task by name.
pub fn unregister() -> Result<(), String> {
    run_schtasks(&["/Delete", "/F", "/TN", TASK_NAME])
}

/// Runs schtasks with the given arguments; non-zero exit is an error
/// carrying whatever stderr said.
fn run_schtasks(args: &[&str]) -> Result<(), String> {
    let output = command::hidden("schtasks.exe")
        .args(args)
        .output()
        .map_err(|e| format!("could not launch schtasks: {e}"))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    if detail.is_empty() {
        Err(format!("schtasks exited with {}", output.status))
    } else {
        Err(detail.to_string())
    }
}
