//! Reboot command issuance.
//!
//! Fire-and-forget: `shutdown /r /t N` is handed to the OS and trusted
//! from there. Only a failure to launch the command is reported; there
//! is no verification and no retry.

use virtswitch_core::log_info;

use crate::command;

/// Issues a reboot after `delay_seconds` (0 reboots immediately).
pub fn issue_restart(delay_seconds: u32) -> Result<(), String> {
    let delay = delay_seconds.to_string();
    match command::hidden("shutdown.exe")
        .args(["/r", "/t", &delay])
        .spawn()
    {
        Ok(_) => {
            log_info!("reboot command issued with /t {delay}");
            Ok(())
        }
        Err(e) => Err(format!("could not launch shutdown: {e}")),
    }
}
