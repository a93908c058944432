mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "virtswitch",
    version,
    about = "Toggle the Windows virtualization features and coordinate the required restart"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Show the current state of both virtualization features
    Status,
    /// Flip both features to the opposite of the current status
    Toggle,
    /// Issue or schedule the restart that applies a pending change
    Restart {
        /// Restart immediately
        #[arg(long, conflicts_with = "delay")]
        now: bool,
        /// Restart after a fixed delay: 5m, 30m, 1h or 2h
        #[arg(long, value_name = "DELAY")]
        delay: Option<String>,
    },
    /// Manage the run-at-logon registration
    Autostart {
        #[command(subcommand)]
        command: AutostartCommands,
    },
}

#[derive(Subcommand)]
enum AutostartCommands {
    /// Register the logon task
    Enable,
    /// Remove the logon task
    Disable,
    /// Show whether the logon task exists
    Status,
}

fn main() {
    let cli = Cli::parse();

    let config = virtswitch_core::config::load();
    virtswitch_core::log::init(&config.log);

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Toggle => commands::toggle::execute(&config),
        Commands::Restart { now, delay } => {
            commands::restart::execute(&config, now, delay.as_deref());
        }
        Commands::Autostart { command } => match command {
            AutostartCommands::Enable => commands::autostart::enable(),
            AutostartCommands::Disable => commands::autostart::disable(),
            AutostartCommands::Status => commands::autostart::status(),
        },
    }
}
