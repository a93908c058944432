//! The live [`Platform`] and [`AutostartRegistrar`] implementation.
//!
//! A zero-sized struct: all state lives in the OS. String-level helper
//! errors are converted to the controller's error taxonomy here, at the
//! component boundary.

use std::path::Path;

use virtswitch_core::{
    AutostartRegistrar, Error, FeatureState, OptionalFeature, PendingToggle, Platform,
    ToggleAction,
};

use crate::{autostart, elevation, features, restart, toggle};

pub struct WindowsPlatform;

impl Platform for WindowsPlatform {
    fn query_feature(&self, feature: OptionalFeature) -> FeatureState {
        features::query_feature(feature)
    }

    fn is_elevated(&self) -> bool {
        elevation::is_elevated()
    }

    fn launch_toggle(&self, action: ToggleAction) -> Result<PendingToggle, Error> {
        toggle::launch_toggle(action)
    }

    fn issue_restart(&self, delay_seconds: u32) -> Result<(), Error> {
        restart::issue_restart(delay_seconds).map_err(Error::RestartIssue)
    }
}

impl AutostartRegistrar for WindowsPlatform {
    fn is_registered(&self) -> bool {
        autostart::is_registered()
    }

    fn register(&self, executable: &Path) -> Result<(), Error> {
        autostart::register(executable).map_err(Error::Registration)
    }

    fn unregister(&self) -> Result<(), Error> {
        autostart::unregister().map_err(Error::Registration)
    }
}
