use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_virtswitch"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute virtswitch");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("virtualization features"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_virtswitch"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute virtswitch");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("virtswitch"));
}

#[test]
fn restart_rejects_an_unknown_delay() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_virtswitch"));
    cmd.args(["restart", "--delay", "90s"]);

    // Act — rejected before any reboot command could be issued.
    let output = cmd.output().expect("failed to execute virtswitch");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown delay"));
}

#[test]
fn restart_refuses_now_combined_with_delay() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_virtswitch"));
    cmd.args(["restart", "--now", "--delay", "5m"]);

    // Act — clap rejects the conflicting flags up front.
    let output = cmd.output().expect("failed to execute virtswitch");

    // Assert
    assert!(!output.status.success());
}
