//! The toggle controller: composition of the platform primitives.
//!
//! The controller is an explicit object over a [`Platform`] seam so the
//! presentation layer can be swapped (CLI, GUI, headless test harness)
//! without touching toggle logic. It owns the guard ordering: privilege
//! check, then status-derived action, then the elevated launch. Waiting
//! for the launched process happens off the caller's thread; the caller
//! gets a [`PendingToggle`] and resolves it when it chooses.

use std::path::Path;

use crate::error::Error;
use crate::feature::{FeatureState, OptionalFeature, TRACKED_FEATURES, VirtualizationStatus};
use crate::restart::RestartPlan;
use crate::toggle::{PendingToggle, ToggleAction};

/// OS primitives the controller drives.
///
/// The platform crate provides the real implementation; tests use an
/// in-memory fake.
pub trait Platform {
    /// Read-only state query for one feature. Must not fail: query
    /// problems collapse to [`FeatureState::Unknown`].
    fn query_feature(&self, feature: OptionalFeature) -> FeatureState;

    /// Whether the current process holds administrative rights.
    fn is_elevated(&self) -> bool;

    /// Launches the elevated process that sets both tracked features to
    /// the action's target state. Returns the completion handle, or
    /// [`Error::ElevationDeclined`] if the elevated process could not be
    /// created — in which case no OS state has changed.
    fn launch_toggle(&self, action: ToggleAction) -> Result<PendingToggle, Error>;

    /// Fire-and-forget reboot with the given delay. Only launch failures
    /// are reported; the reboot itself is OS-trusted.
    fn issue_restart(&self, delay_seconds: u32) -> Result<(), Error>;
}

/// The OS logon-task registration, independent of the toggle path.
///
/// At most one registration exists at a time: create overwrites, delete
/// is idempotent by name.
pub trait AutostartRegistrar {
    fn is_registered(&self) -> bool;
    fn register(&self, executable: &Path) -> Result<(), Error>;
    fn unregister(&self) -> Result<(), Error>;
}

/// A toggle that has been launched and not yet resolved.
pub struct StartedToggle {
    /// The direction that was issued.
    pub action: ToggleAction,
    /// Resolves to the outcome exactly once.
    pub pending: PendingToggle,
}

/// What the restart coordinator did with a consumed plan.
#[derive(Debug, PartialEq, Eq)]
pub enum RestartDisposition {
    /// A reboot command was issued with this delay.
    Issued { delay_seconds: u32 },
    /// No command was issued; the caller shows a persistent reminder.
    Reminder,
}

pub struct Controller<P> {
    platform: P,
}

impl<P: Platform> Controller<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Queries both features and returns the snapshot.
    ///
    /// Each feature is queried independently — a failure of one never
    /// aborts the other. Unknown states are logged, not surfaced.
    pub fn status(&self) -> VirtualizationStatus {
        let [hypervisor, vm_platform] = TRACKED_FEATURES.map(|feature| {
            let state = self.platform.query_feature(feature);
            if state == FeatureState::Unknown {
                crate::log_warn!(
                    "status query for {} produced no usable state",
                    feature.os_name()
                );
            }
            state
        });
        VirtualizationStatus {
            hypervisor,
            vm_platform,
        }
    }

    /// Starts a toggle to the opposite of the current aggregate status.
    ///
    /// Precondition: the caller has obtained explicit user confirmation
    /// of the action and its consequence (a reboot is required).
    /// Preconditions enforced here: the process must be elevated, and
    /// no other toggle may be in flight (cooperative — the caller holds
    /// the previous [`StartedToggle`] until it resolves).
    ///
    /// No pre-flight re-query is done beyond the status read: setting a
    /// feature to a state it already holds is an OS-level no-op exit 0.
    pub fn request_toggle(&self) -> Result<StartedToggle, Error> {
        if !self.platform.is_elevated() {
            return Err(Error::NotElevated);
        }

        let action = ToggleAction::to_flip(self.status().enabled());
        let pending = self.platform.launch_toggle(action)?;
        crate::log_info!("elevated toggle launched: {}", action.as_str());
        Ok(StartedToggle { action, pending })
    }

    /// Consumes a restart plan: issues the reboot command for Immediate
    /// and ScheduledAfter, issues nothing for Deferred.
    pub fn apply_restart(&self, plan: RestartPlan) -> Result<RestartDisposition, Error> {
        match plan.delay_seconds() {
            Some(delay_seconds) => {
                self.platform.issue_restart(delay_seconds)?;
                crate::log_info!("restart issued with delay {delay_seconds}s");
                Ok(RestartDisposition::Issued { delay_seconds })
            }
            None => Ok(RestartDisposition::Reminder),
        }
    }

    /// Access to the underlying platform, for operations outside the
    /// toggle path (e.g. the autostart registrar when the platform
    /// implements it).
    pub fn platform(&self) -> &P {
        &self.platform
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use super::*;
    use crate::toggle::ToggleOutcome;

    /// In-memory platform that records every launch and restart call.
    struct FakePlatform {
        elevated: bool,
        decline_elevation: bool,
        exit_code: i32,
        mutate_on_success: bool,
        states: RefCell<VirtualizationStatus>,
        launches: RefCell<Vec<ToggleAction>>,
        restarts: RefCell<Vec<u32>>,
    }

    impl FakePlatform {
        fn with_states(hypervisor: FeatureState, vm_platform: FeatureState) -> Self {
            Self {
                elevated: true,
                decline_elevation: false,
                exit_code: 0,
                mutate_on_success: true,
                states: RefCell::new(VirtualizationStatus {
                    hypervisor,
                    vm_platform,
                }),
                launches: RefCell::new(Vec::new()),
                restarts: RefCell::new(Vec::new()),
            }
        }

        fn disabled() -> Self {
            Self::with_states(FeatureState::Disabled, FeatureState::Disabled)
        }

        fn enabled() -> Self {
            Self::with_states(FeatureState::Enabled, FeatureState::Enabled)
        }
    }

    impl Platform for FakePlatform {
        fn query_feature(&self, feature: OptionalFeature) -> FeatureState {
            let states = self.states.borrow();
            match feature {
                OptionalFeature::Hypervisor => states.hypervisor,
                OptionalFeature::VmPlatform => states.vm_platform,
            }
        }

        fn is_elevated(&self) -> bool {
            self.elevated
        }

        fn launch_toggle(&self, action: ToggleAction) -> Result<PendingToggle, Error> {
            if self.decline_elevation {
                return Err(Error::ElevationDeclined("prompt declined".into()));
            }
            self.launches.borrow_mut().push(action);

            let (tx, pending) = PendingToggle::channel();
            if self.exit_code == 0 {
                if self.mutate_on_success {
                    let target = match action {
                        ToggleAction::Enable => FeatureState::Enabled,
                        ToggleAction::Disable => FeatureState::Disabled,
                    };
                    let mut states = self.states.borrow_mut();
                    states.hypervisor = target;
                    states.vm_platform = target;
                }
                tx.send(ToggleOutcome::Succeeded).unwrap();
            } else {
                tx.send(ToggleOutcome::Failed(self.exit_code)).unwrap();
            }
            Ok(pending)
        }

        fn issue_restart(&self, delay_seconds: u32) -> Result<(), Error> {
            self.restarts.borrow_mut().push(delay_seconds);
            Ok(())
        }
    }

    #[test]
    fn status_queries_both_features_independently() {
        // Arrange
        let platform =
            FakePlatform::with_states(FeatureState::Unknown, FeatureState::Enabled);
        let controller = Controller::new(platform);

        // Act
        let status = controller.status();

        // Assert
        assert_eq!(status.hypervisor, FeatureState::Unknown);
        assert_eq!(status.vm_platform, FeatureState::Enabled);
        assert!(status.enabled());
    }

    #[test]
    fn request_toggle_refuses_without_elevation() {
        // Arrange
        let mut platform = FakePlatform::disabled();
        platform.elevated = false;
        let controller = Controller::new(platform);

        // Act
        let result = controller.request_toggle();

        // Assert — the guard trips before any external process launches.
        assert!(matches!(result, Err(Error::NotElevated)));
        assert!(controller.platform().launches.borrow().is_empty());
    }

    #[test]
    fn declined_elevation_launches_no_mutation() {
        // Arrange
        let mut platform = FakePlatform::disabled();
        platform.decline_elevation = true;
        let controller = Controller::new(platform);

        // Act
        let result = controller.request_toggle();

        // Assert
        assert!(matches!(result, Err(Error::ElevationDeclined(_))));
        assert!(controller.platform().launches.borrow().is_empty());
    }

    #[test]
    fn toggle_targets_the_opposite_of_current_status() {
        // Arrange
        let controller = Controller::new(FakePlatform::enabled());

        // Act
        let started = controller.request_toggle().unwrap();

        // Assert
        assert_eq!(started.action, ToggleAction::Disable);
        assert_eq!(
            controller.platform().launches.borrow().as_slice(),
            &[ToggleAction::Disable]
        );
    }

    #[test]
    fn disabled_to_enabled_with_scheduled_restart() {
        // Arrange — both features off, elevation granted.
        let controller = Controller::new(FakePlatform::disabled());
        assert!(!controller.status().enabled());

        // Act — toggle, wait, then pick the 30-minute schedule.
        let started = controller.request_toggle().unwrap();
        assert_eq!(started.action, ToggleAction::Enable);
        let outcome = started.pending.wait();
        assert_eq!(outcome, ToggleOutcome::Succeeded);

        let disposition = controller
            .apply_restart(RestartPlan::ScheduledAfter(1800))
            .unwrap();

        // Assert — one reboot invocation carrying 1800 seconds.
        assert_eq!(
            disposition,
            RestartDisposition::Issued {
                delay_seconds: 1800
            }
        );
        assert_eq!(controller.platform().restarts.borrow().as_slice(), &[1800]);
        assert!(controller.status().enabled());
    }

    #[test]
    fn enable_when_already_enabled_is_a_clean_noop() {
        // Arrange — the OS treats re-enabling an enabled feature as a
        // no-op exit 0, so the executor reports success and the state
        // is unchanged on re-query.
        let mut platform = FakePlatform::enabled();
        platform.mutate_on_success = false;
        let controller = Controller::new(platform);

        // Act
        let pending = controller
            .platform()
            .launch_toggle(ToggleAction::Enable)
            .unwrap();

        // Assert
        assert_eq!(pending.wait(), ToggleOutcome::Succeeded);
        assert!(controller.status().enabled());
    }

    #[test]
    fn failed_toggle_carries_the_exit_code() {
        // Arrange
        let mut platform = FakePlatform::disabled();
        platform.exit_code = 740;
        let controller = Controller::new(platform);

        // Act
        let started = controller.request_toggle().unwrap();

        // Assert
        assert_eq!(started.pending.wait(), ToggleOutcome::Failed(740));
    }

    #[test]
    fn immediate_and_scheduled_restarts_each_issue_one_command() {
        // Arrange
        let controller = Controller::new(FakePlatform::enabled());

        // Act
        controller.apply_restart(RestartPlan::Immediate).unwrap();
        controller
            .apply_restart(RestartPlan::ScheduledAfter(300))
            .unwrap();

        // Assert — exactly one invocation per consumed plan.
        assert_eq!(controller.platform().restarts.borrow().as_slice(), &[0, 300]);
    }

    #[test]
    fn deferred_restart_issues_nothing() {
        // Arrange
        let controller = Controller::new(FakePlatform::enabled());

        // Act
        let disposition = controller.apply_restart(RestartPlan::Deferred).unwrap();

        // Assert
        assert_eq!(disposition, RestartDisposition::Reminder);
        assert!(controller.platform().restarts.borrow().is_empty());
    }

    /// In-memory registrar holding at most one task record, keyed by the
    /// fixed application name like the real scheduler.
    struct FakeRegistrar {
        fail: bool,
        task: RefCell<Option<PathBuf>>,
    }

    impl FakeRegistrar {
        fn new() -> Self {
            Self {
                fail: false,
                task: RefCell::new(None),
            }
        }
    }

    impl AutostartRegistrar for FakeRegistrar {
        fn is_registered(&self) -> bool {
            self.task.borrow().is_some()
        }

        fn register(&self, executable: &Path) -> Result<(), Error> {
            if self.fail {
                return Err(Error::Registration("exit code 1".into()));
            }
            // Create-or-replace: an existing record is overwritten.
            *self.task.borrow_mut() = Some(executable.to_path_buf());
            Ok(())
        }

        fn unregister(&self) -> Result<(), Error> {
            if self.fail {
                return Err(Error::Registration("exit code 1".into()));
            }
            *self.task.borrow_mut() = None;
            Ok(())
        }
    }

    #[test]
    fn register_then_query_roundtrip() {
        // Arrange
        let registrar = FakeRegistrar::new();
        assert!(!registrar.is_registered());

        // Act / Assert
        registrar.register(Path::new(r"C:\tools\virtswitch.exe")).unwrap();
        assert!(registrar.is_registered());

        registrar.unregister().unwrap();
        assert!(!registrar.is_registered());
    }

    #[test]
    fn register_over_existing_overwrites_instead_of_duplicating() {
        // Arrange
        let registrar = FakeRegistrar::new();
        registrar.register(Path::new(r"C:\old\virtswitch.exe")).unwrap();

        // Act
        registrar.register(Path::new(r"C:\new\virtswitch.exe")).unwrap();

        // Assert — a single record, pointing at the latest path.
        assert_eq!(
            registrar.task.borrow().as_deref(),
            Some(Path::new(r"C:\new\virtswitch.exe"))
        );
    }

    #[test]
    fn registration_failure_is_reported_for_rollback() {
        // Arrange
        let mut registrar = FakeRegistrar::new();
        registrar.fail = true;

        // Act
        let result = registrar.register(Path::new(r"C:\tools\virtswitch.exe"));

        // Assert — the caller sees the failure and reverts its UI state.
        assert!(matches!(result, Err(Error::Registration(_))));
        assert!(!registrar.is_registered());
    }
}
