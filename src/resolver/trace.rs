// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Override trace
//!
//! Records what an MSA override changed, and what it asked for but did not
//! get. The resolver only collects these records; `cli::report` renders them.

use serde::Serialize;

/// Everything one MSA's overrides did to the shared defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionTrace {
    pub applied: Vec<AppliedOverride>,
    pub ignored: Vec<IgnoredOverride>,
}

impl ResolutionTrace {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.ignored.is_empty()
    }

    /// Applied overrides that actually changed a value
    pub fn changes(&self) -> impl Iterator<Item = &AppliedOverride> {
        self.applied.iter().filter(|a| a.changes_value())
    }
}

/// A value that an override set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedOverride {
    pub component: String,
    pub target: OverrideTarget,
    /// Value before the override
    pub old: Option<String>,
    pub new: String,
}

impl AppliedOverride {
    pub fn changes_value(&self) -> bool {
        self.old.as_deref() != Some(self.new.as_str())
    }
}

/// Which field an override touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum OverrideTarget {
    /// The component's `default_<component>` version
    Default,
    /// A service tag
    Service(String),
    /// A flattened version key named in the override's `versions` mapping
    Version(String),
}

impl std::fmt::Display for OverrideTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Service(name) => write!(f, "services.{}", name),
            Self::Version(key) => write!(f, "versions.{}", key),
        }
    }
}

/// An override that was dropped because its target does not exist or is out of scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredOverride {
    pub component: String,
    pub target: OverrideTarget,
    pub version: String,
    pub reason: IgnoreReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The service is not declared anywhere in `defaults`
    UnknownService,
    /// The component is outside the configured override scope
    IneligibleComponent,
    /// The component is not declared in `defaults`, so it has no version key
    UnknownComponent,
    /// The `versions` key is not produced by `defaults`
    UnknownVersionKey,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownService => write!(f, "service not declared in defaults"),
            Self::IneligibleComponent => write!(f, "component not override-eligible"),
            Self::UnknownComponent => write!(f, "component not declared in defaults"),
            Self::UnknownVersionKey => write!(f, "version key not declared in defaults"),
        }
    }
}
