use virtswitch_core::{AutostartRegistrar, Controller, OptionalFeature};
use virtswitch_windows::WindowsPlatform;

pub fn execute() {
    let controller = Controller::new(WindowsPlatform);
    let status = controller.status();

    println!(
        "  {:<12}  {}",
        OptionalFeature::Hypervisor.label(),
        status.hypervisor.as_str()
    );
    println!(
        "  {:<12}  {}",
        OptionalFeature::VmPlatform.label(),
        status.vm_platform.as_str()
    );
    println!();

    if status.enabled() {
        println!("Virtualization is enabled (WSL2/WSA available).");
    } else {
        println!("Virtualization is disabled.");
    }

    if controller.platform().is_registered() {
        println!("Autostart at logon is enabled.");
    } else {
        println!("Autostart at logon is disabled.");
    }
}
