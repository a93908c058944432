//! The two tracked OS virtualization features and their observed states.
//!
//! The feature set is closed: exactly the hypervisor and the
//! virtual-machine platform. The aggregate status is a logical OR over
//! these two — it is always derived, never stored.

/// One of the two OS optional features this tool manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalFeature {
    /// The Windows hypervisor itself.
    Hypervisor,
    /// The virtual-machine platform (WSL2/WSA backing).
    VmPlatform,
}

/// The closed set of tracked features, in the order they are toggled.
pub const TRACKED_FEATURES: [OptionalFeature; 2] =
    [OptionalFeature::Hypervisor, OptionalFeature::VmPlatform];

impl OptionalFeature {
    /// The feature name as the OS feature registry knows it.
    pub const fn os_name(self) -> &'static str {
        match self {
            Self::Hypervisor => "Microsoft-Hyper-V-Hypervisor",
            Self::VmPlatform => "VirtualMachinePlatform",
        }
    }

    /// A short human-readable label for status output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hypervisor => "Hypervisor",
            Self::VmPlatform => "VM platform",
        }
    }
}

/// Observed state of one optional feature.
///
/// `Unknown` means the status query failed to launch or produced no
/// parsable output. It aggregates as disabled but stays distinguishable
/// so diagnostics can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureState {
    Enabled,
    Disabled,
    Unknown,
}

impl FeatureState {
    /// Parses the textual state returned by the OS status query.
    ///
    /// The query output is opaque apart from one contract: it contains
    /// the substring `Enabled` iff the feature is on. Empty output means
    /// the query produced nothing usable.
    pub fn parse(output: &str) -> Self {
        let trimmed = output.trim();
        if trimmed.is_empty() {
            Self::Unknown
        } else if trimmed.contains("Enabled") {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Unknown => "unknown",
        }
    }
}

/// Snapshot of both tracked feature states, taken by one round of queries.
///
/// Never cached across a toggle: callers re-query after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualizationStatus {
    pub hypervisor: FeatureState,
    pub vm_platform: FeatureState,
}

impl VirtualizationStatus {
    /// The aggregate status: enabled iff at least one feature is enabled.
    pub fn enabled(&self) -> bool {
        self.hypervisor.is_enabled() || self.vm_platform.is_enabled()
    }
}
