//! The elevated toggle launch and its background wait.
//!
//! One PowerShell invocation sets BOTH tracked features to the target
//! state — a single atomic batch with `-NoRestart`, so the OS never
//! reboots on its own. The launch goes through `ShellExecuteExW` with
//! the `"runas"` verb, which is where the elevation prompt appears.
//! The wait on the resulting process runs on its own thread and posts
//! exactly one outcome back through the [`PendingToggle`] channel, so
//! the caller stays responsive while the OS grinds through the change.

use std::thread;

use virtswitch_core::toggle::WAIT_ABANDONED_CODE;
use virtswitch_core::{
    Error, PendingToggle, TRACKED_FEATURES, ToggleAction, ToggleOutcome, log_error, log_info,
};
use windows::Win32::Foundation::{CloseHandle, ERROR_CANCELLED, HANDLE};
use windows::Win32::System::Threading::{GetExitCodeProcess, INFINITE, WaitForSingleObject};
use windows::Win32::UI::Shell::{SEE_MASK_NOCLOSEPROCESS, SHELLEXECUTEINFOW, ShellExecuteExW};
use windows::Win32::UI::WindowsAndMessaging::SW_HIDE;
use windows::core::PCWSTR;

/// Builds the command batch that flips both features in one go.
///
/// Verbose cmdlet output is piped to `Out-Null`; `-NoRestart` defers
/// the mandatory reboot to the restart coordinator.
fn toggle_script(action: ToggleAction) -> String {
    let cmdlet = match action {
        ToggleAction::Enable => "Enable-WindowsOptionalFeature",
        ToggleAction::Disable => "Disable-WindowsOptionalFeature",
    };
    TRACKED_FEATURES
        .iter()
        .map(|feature| {
            format!(
                "{cmdlet} -Online -FeatureName {} -NoRestart | Out-Null",
                feature.os_name()
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Launches the elevated toggle process and returns its completion
/// handle.
///
/// A declined elevation prompt or any launch failure comes back as
/// [`Error::ElevationDeclined`] — in both cases no OS state has changed.
pub fn launch_toggle(action: ToggleAction) -> Result<PendingToggle, Error> {
    let parameters = format!(
        "-NoProfile -NonInteractive -WindowStyle Hidden -Command \"{}\"",
        toggle_script(action)
    );
    let file = wide("powershell.exe");
    let verb = wide("runas");
    let params = wide(&parameters);

    let mut info = SHELLEXECUTEINFOW {
        cbSize: std::mem::size_of::<SHELLEXECUTEINFOW>() as u32,
        // NOCLOSEPROCESS hands us the process handle so the wait thread
        // can observe the exit code.
        fMask: SEE_MASK_NOCLOSEPROCESS,
        lpVerb: PCWSTR(verb.as_ptr()),
        lpFile: PCWSTR(file.as_ptr()),
        lpParameters: PCWSTR(params.as_ptr()),
        nShow: SW_HIDE.0,
        ..Default::default()
    };

    // SAFETY: ShellExecuteExW reads the struct we fully initialised; the
    // wide strings outlive the call. "runas" may block on the UAC prompt.
    if let Err(e) = unsafe { ShellExecuteExW(&mut info) } {
        let reason = if e.code() == ERROR_CANCELLED.to_hresult() {
            "the elevation prompt was declined".to_string()
        } else {
            e.message()
        };
        log_info!("toggle launch aborted: {reason}");
        return Err(Error::ElevationDeclined(reason));
    }

    let process = OwnedProcess(info.hProcess);
    if process.0.is_invalid() {
        return Err(Error::ElevationDeclined(
            "no process handle was returned for the elevated command".into(),
        ));
    }

    let (tx, pending) = PendingToggle::channel();
    thread::spawn(move || {
        let outcome = process.wait_for_exit();
        match outcome {
            ToggleOutcome::Succeeded => log_info!("toggle process exited cleanly"),
            ToggleOutcome::Failed(code) => log_error!("toggle process exited with {code}"),
        }
        // The receiver may already be gone if the caller was abandoned;
        // the send result is irrelevant then.
        let _ = tx.send(outcome);
    });

    Ok(pending)
}

/// Process handle owned by the wait thread, closed exactly once.
struct OwnedProcess(HANDLE);

// SAFETY: a process handle is a kernel object reference with no thread
// affinity; the wait thread becomes its sole owner.
unsafe impl Send for OwnedProcess {}

impl OwnedProcess {
    /// Blocks until the process exits, then maps its exit code.
    fn wait_for_exit(&self) -> ToggleOutcome {
        // SAFETY: the handle stays valid for the lifetime of self; an
        // infinite wait on a process handle returns when it exits.
        unsafe {
            WaitForSingleObject(self.0, INFINITE);
        }

        let mut code = 0u32;
        // SAFETY: GetExitCodeProcess writes the exit code of the now
        // terminated process into our out-param.
        let queried = unsafe { GetExitCodeProcess(self.0, &mut code) };
        match queried {
            Ok(()) if code == 0 => ToggleOutcome::Succeeded,
            Ok(()) => ToggleOutcome::Failed(code as i32),
            Err(_) => ToggleOutcome::Failed(WAIT_ABANDONED_CODE),
        }
    }
}

impl Drop for OwnedProcess {
    fn drop(&mut self) {
        // SAFETY: CloseHandle releases the process handle we own.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Null-terminated UTF-16 for the Win32 wide-string APIs.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
