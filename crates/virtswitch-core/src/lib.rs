pub mod config;
pub mod controller;
pub mod error;
pub mod feature;
pub mod log;
pub mod restart;
pub mod toggle;

pub use controller::{AutostartRegistrar, Controller, Platform};
pub use error::Error;
pub use feature::{FeatureState, OptionalFeature, TRACKED_FEATURES, VirtualizationStatus};
pub use restart::RestartPlan;
pub use toggle::{PendingToggle, ToggleAction, ToggleOutcome};
