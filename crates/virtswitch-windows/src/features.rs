//! Read-only optional-feature status queries.
//!
//! Each query runs a hidden PowerShell one-liner and parses its textual
//! state. No elevation is needed for reads, and nothing here mutates the
//! OS. All failure paths collapse to [`FeatureState::Unknown`]; the
//! caller never sees an error.

use virtswitch_core::{FeatureState, OptionalFeature, log_warn};

use crate::command;

/// Builds the status query script for one feature.
fn query_script(feature: OptionalFeature) -> String {
    format!(
        "(Get-WindowsOptionalFeature -Online -FeatureName {}).State",
        feature.os_name()
    )
}

/// Queries the current state of one optional feature.
pub fn query_feature(feature: OptionalFeature) -> FeatureState {
    let output = command::hidden("powershell.exe")
        .args(["-NoProfile", "-NonInteractive", "-Command", &query_script(feature)])
        .output();

    match output {
        Ok(out) if out.status.success() => {
            FeatureState::parse(&String::from_utf8_lossy(&out.stdout))
        }
        Ok(out) => {
            log_warn!(
                "status query for {} exited with {}",
                feature.os_name(),
                out.status
            );
            FeatureState::Unknown
        }
        Err(e) => {
            log_warn!("status query for {} failed to launch: {e}", feature.os_name());
            FeatureState::Unknown
        }
    }
}
