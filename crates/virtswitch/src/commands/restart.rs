use std::io::{self, BufRead, Write};

use virtswitch_core::config::Config;
use virtswitch_core::controller::RestartDisposition;
use virtswitch_core::restart::{DELAY_CHOICES, delay_label};
use virtswitch_core::{Controller, Platform, RestartPlan};
use virtswitch_windows::WindowsPlatform;

/// Standalone restart scheduling, for users who deferred the restart
/// when they toggled.
pub fn execute(config: &Config, now: bool, delay: Option<&str>) {
    let controller = Controller::new(WindowsPlatform);

    let plan = if now {
        RestartPlan::Immediate
    } else if let Some(token) = delay {
        match parse_delay(token) {
            Some(secs) => RestartPlan::ScheduledAfter(secs),
            None => {
                eprintln!("Error: unknown delay '{token}' (expected 5m, 30m, 1h or 2h).");
                std::process::exit(2);
            }
        }
    } else {
        choose_plan(config)
    };

    apply(&controller, plan);
}

/// Interactive restart menu shown after a successful toggle.
pub fn prompt_and_apply<P: Platform>(controller: &Controller<P>, config: &Config) {
    let plan = choose_plan(config);
    apply(controller, plan);
}

fn parse_delay(token: &str) -> Option<u32> {
    match token {
        "5m" => Some(300),
        "30m" => Some(1800),
        "1h" => Some(3600),
        "2h" => Some(7200),
        _ => None,
    }
}

/// One choice, one transition: the returned plan is consumed exactly
/// once by `apply`. EOF on stdin defers — never reboot a machine whose
/// user cannot answer.
fn choose_plan(config: &Config) -> RestartPlan {
    let default_secs = if delay_label(config.restart.default_delay_secs).is_some() {
        config.restart.default_delay_secs
    } else {
        DELAY_CHOICES[0].0
    };

    println!("When should the computer restart?");
    println!("  [1] Now");
    for (i, (secs, label)) in DELAY_CHOICES.iter().enumerate() {
        let marker = if *secs == default_secs { "  (default)" } else { "" };
        println!("  [{}] Restart {label}{marker}", i + 2);
    }
    println!("  [6] Later, manually");

    let stdin = io::stdin();
    loop {
        print!("Choice: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return RestartPlan::Deferred,
            Ok(_) => {}
        }

        match line.trim() {
            "" => return RestartPlan::ScheduledAfter(default_secs),
            "1" => return RestartPlan::Immediate,
            "6" => return RestartPlan::Deferred,
            other => {
                if let Ok(n) = other.parse::<usize>()
                    && (2..=5).contains(&n)
                {
                    return RestartPlan::ScheduledAfter(DELAY_CHOICES[n - 2].0);
                }
                println!("Unrecognized choice '{other}'.");
            }
        }
    }
}

fn apply<P: Platform>(controller: &Controller<P>, plan: RestartPlan) {
    match controller.apply_restart(plan) {
        Ok(RestartDisposition::Issued { delay_seconds: 0 }) => {
            println!("Restarting now.");
        }
        Ok(RestartDisposition::Issued { delay_seconds }) => {
            println!(
                "Restart scheduled {}.",
                delay_label(delay_seconds).unwrap_or("shortly")
            );
        }
        Ok(RestartDisposition::Reminder) => {
            println!("No restart scheduled.");
            println!("Remember to restart your computer for the change to take effect.");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
