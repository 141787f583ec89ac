// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Override scope
//!
//! Controls which components accept service overrides from an MSA. The
//! `default_<component>` version is overridable regardless of scope.

use std::collections::BTreeSet;

/// Components whose service tags an MSA may override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverrideScope {
    /// Every component
    #[default]
    All,
    /// Only the named components
    Only(BTreeSet<String>),
}

impl OverrideScope {
    /// Build a scope from a list of names; an empty list means every component
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    pub fn allows(&self, component: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(component),
        }
    }
}

impl std::fmt::Display for OverrideScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all components"),
            Self::Only(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}
