use std::os::windows::process::CommandExt;
use std::process::Command;

/// `CREATE_NO_WINDOW` (0x08000000) — the spawned helper gets no console
/// window of its own. Without this every status query would flash a
/// console on screen, and the helpers would inherit our console handles.
pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Returns a `Command` for `program` that runs without a console window.
pub fn hidden(program: &str) -> Command {
    let mut command = Command::new(program);
    command.creation_flags(CREATE_NO_WINDOW);
    command
}
