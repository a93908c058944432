use std::io::{self, BufRead, Write};

use virtswitch_core::config::Config;
use virtswitch_core::{Controller, Error, ToggleAction, ToggleOutcome};
use virtswitch_windows::WindowsPlatform;

/// Flips both features to the opposite of the current aggregate status.
///
/// The flow mirrors what a tray menu would do: show what the change
/// means, get explicit confirmation, run the elevated batch while the
/// terminal stays live, then hand over to the restart menu on success.
pub fn execute(config: &Config) {
    let controller = Controller::new(WindowsPlatform);
    let status = controller.status();
    let action = ToggleAction::to_flip(status.enabled());

    describe(action);
    if !confirm() {
        println!("Aborted. Nothing was changed.");
        return;
    }

    let started = match controller.request_toggle() {
        Ok(started) => started,
        Err(Error::NotElevated) => {
            eprintln!("Error: administrator privileges are required.");
            eprintln!("Run virtswitch from an elevated prompt and try again.");
            std::process::exit(1);
        }
        Err(e @ Error::ElevationDeclined(_)) => {
            eprintln!("Error: {e}");
            eprintln!("No changes were made.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let verb = match started.action {
        ToggleAction::Enable => "Enabling",
        ToggleAction::Disable => "Disabling",
    };
    println!("{verb} virtualization features... this can take a few minutes.");

    match started.pending.wait() {
        ToggleOutcome::Succeeded => {
            println!("Done. A restart is required for the change to take effect.");
            super::restart::prompt_and_apply(&controller, config);
        }
        ToggleOutcome::Failed(code) => {
            eprintln!("Error: {}", Error::ToggleFailed(code));
            eprintln!("Feature state may have partially changed; check 'virtswitch status'.");
            std::process::exit(1);
        }
    }
}

fn describe(action: ToggleAction) {
    match action {
        ToggleAction::Enable => {
            println!("This will enable the hypervisor and the VM platform.");
            println!("WSL2/WSA become available after the restart.");
        }
        ToggleAction::Disable => {
            println!("This will disable the hypervisor and the VM platform.");
            println!("Tools that need direct hardware access work again after the restart.");
        }
    }
    println!("A restart is required to apply the change.");
    println!();
}

fn confirm() -> bool {
    print!("Continue? [y/N] ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
