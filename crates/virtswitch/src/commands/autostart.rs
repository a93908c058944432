use virtswitch_core::AutostartRegistrar;
use virtswitch_windows::WindowsPlatform;

/// Manages the run-at-logon scheduled task.
///
/// On failure the OS record keeps its previous state and the messages
/// say so — the reported state never runs ahead of the registration.
pub fn enable() {
    let exe = match std::env::current_exe() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: could not resolve the executable path: {e}");
            std::process::exit(1);
        }
    };

    match WindowsPlatform.register(&exe) {
        Ok(()) => println!("Autostart enabled. Virtswitch will run at logon."),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Autostart remains disabled.");
            std::process::exit(1);
        }
    }
}

pub fn disable() {
    match WindowsPlatform.unregister() {
        Ok(()) => println!("Autostart disabled."),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Autostart remains enabled.");
            std::process::exit(1);
        }
    }
}

pub fn status() {
    if WindowsPlatform.is_registered() {
        println!("Autostart is currently enabled.");
    } else {
        println!("Autostart is currently disabled.");
    }
}
