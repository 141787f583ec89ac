// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Version resolver
//!
//! Turns a [`VersionDocument`] into one shared [`ResolvedConfig`] plus one
//! per MSA. Resolution is pure: no IO, no logging, no shared state.
//!
//! Precedence, lowest to highest:
//! 1. component defaults, in document order (a service declared by two
//!    components takes the version of the later one)
//! 2. the MSA's override for that component
//!
//! An override can change values but never adds a key, so every MSA config
//! has exactly the service and version keys of the shared defaults.

mod scope;
mod trace;

pub use scope::OverrideScope;
pub use trace::{AppliedOverride, IgnoreReason, IgnoredOverride, OverrideTarget, ResolutionTrace};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::document::VersionDocument;
use crate::errors::{MsaconfError, MsaconfResult};

/// Reported for a component whose `default` is not set
pub const DEFAULT_VERSION_SENTINEL: &str = "default_version";

/// Prefix of the keys in [`ResolvedConfig::versions`]
pub const VERSION_KEY_PREFIX: &str = "default_";

/// Flattened configuration handed to the deployment tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Service name to image tag
    pub services: BTreeMap<String, ServiceTag>,

    /// `default_<component>` to component version
    pub versions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTag {
    pub tag: String,
}

impl ResolvedConfig {
    /// Tag of a service, if declared
    pub fn tag(&self, service: &str) -> Option<&str> {
        self.services.get(service).map(|s| s.tag.as_str())
    }

    /// Version of a component, if declared
    pub fn version(&self, component: &str) -> Option<&str> {
        self.versions.get(&version_key(component)).map(String::as_str)
    }
}

/// Key under which a component's version is stored
pub fn version_key(component: &str) -> String {
    format!("{}{}", VERSION_KEY_PREFIX, component)
}

/// Flatten every component default into one config
pub fn build_defaults(document: &VersionDocument) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();

    for (component, defaults) in &document.defaults {
        let version = defaults
            .default
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION_SENTINEL.to_string());
        config.versions.insert(version_key(component), version);

        for (service, version) in &defaults.services {
            config
                .services
                .insert(service.clone(), ServiceTag { tag: version.clone() });
        }
    }

    config
}

/// A service declared by more than one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCollision {
    pub service: String,
    /// Every declaring component, in document order; the last one wins
    pub components: Vec<String>,
}

impl ServiceCollision {
    pub fn winner(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or_default()
    }
}

/// Find services whose default tag depends on component order
pub fn service_collisions(document: &VersionDocument) -> Vec<ServiceCollision> {
    let mut declared: BTreeMap<&str, Vec<String>> = BTreeMap::new();

    for (component, defaults) in &document.defaults {
        for (service, _) in &defaults.services {
            declared
                .entry(service.as_str())
                .or_default()
                .push(component.clone());
        }
    }

    declared
        .into_iter()
        .filter(|(_, components)| components.len() > 1)
        .map(|(service, components)| ServiceCollision {
            service: service.to_string(),
            components,
        })
        .collect()
}

/// Resolved config of a single MSA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsaResolution {
    pub name: String,
    pub config: ResolvedConfig,
    pub trace: ResolutionTrace,
    /// Structurally equal to the shared defaults
    pub unchanged: bool,
}

/// Output of resolving a whole document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub defaults: ResolvedConfig,
    /// One entry per MSA, in document order
    pub msas: Vec<MsaResolution>,
}

impl Resolution {
    pub fn msa(&self, name: &str) -> Option<&MsaResolution> {
        self.msas.iter().find(|m| m.name == name)
    }

    pub fn unchanged_count(&self) -> usize {
        self.msas.iter().filter(|m| m.unchanged).count()
    }
}

/// Applies MSA overrides on top of the shared defaults
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    scope: OverrideScope,
}

impl Resolver {
    pub fn new(scope: OverrideScope) -> Self {
        Self { scope }
    }

    /// Resolve one MSA against an already-built defaults config
    pub fn resolve_msa(
        &self,
        document: &VersionDocument,
        name: &str,
        defaults: &ResolvedConfig,
    ) -> MsaconfResult<MsaResolution> {
        let overrides = document.msa(name).ok_or_else(|| MsaconfError::UnknownMsa {
            name: name.to_string(),
            available: document.msa_names().join(", "),
        })?;

        let mut config = defaults.clone();
        let mut trace = ResolutionTrace::default();

        for (component, entry) in &overrides.components {
            // `default` and `versions` only retarget keys that `defaults` produced
            let mut version_overrides = Vec::new();
            if let Some(version) = &entry.default {
                version_overrides.push((
                    version_key(component),
                    OverrideTarget::Default,
                    IgnoreReason::UnknownComponent,
                    version,
                ));
            }
            for (key, version) in &entry.versions {
                version_overrides.push((
                    key.clone(),
                    OverrideTarget::Version(key.clone()),
                    IgnoreReason::UnknownVersionKey,
                    version,
                ));
            }

            for (key, target, reason, version) in version_overrides {
                match config.versions.get_mut(&key) {
                    Some(slot) => {
                        let old = std::mem::replace(slot, version.clone());
                        trace.applied.push(AppliedOverride {
                            component: component.clone(),
                            target,
                            old: Some(old),
                            new: version.clone(),
                        });
                    }
                    None => trace.ignored.push(IgnoredOverride {
                        component: component.clone(),
                        target,
                        version: version.clone(),
                        reason,
                    }),
                }
            }

            for (service, version) in &entry.services {
                let reason = if !self.scope.allows(component) {
                    Some(IgnoreReason::IneligibleComponent)
                } else if !config.services.contains_key(service) {
                    Some(IgnoreReason::UnknownService)
                } else {
                    None
                };

                if let Some(reason) = reason {
                    trace.ignored.push(IgnoredOverride {
                        component: component.clone(),
                        target: OverrideTarget::Service(service.clone()),
                        version: version.clone(),
                        reason,
                    });
                    continue;
                }

                if let Some(slot) = config.services.get_mut(service) {
                    let old = std::mem::replace(&mut slot.tag, version.clone());
                    trace.applied.push(AppliedOverride {
                        component: component.clone(),
                        target: OverrideTarget::Service(service.clone()),
                        old: Some(old),
                        new: version.clone(),
                    });
                }
            }
        }

        let unchanged = &config == defaults;

        Ok(MsaResolution {
            name: name.to_string(),
            config,
            trace,
            unchanged,
        })
    }

    /// Resolve the shared defaults and every MSA; stops at the first failure
    pub fn resolve_all(&self, document: &VersionDocument) -> MsaconfResult<Resolution> {
        let defaults = build_defaults(document);

        let msas = document
            .msas
            .iter()
            .map(|(name, _)| self.resolve_msa(document, name, &defaults))
            .collect::<MsaconfResult<Vec<_>>>()?;

        Ok(Resolution { defaults, msas })
    }
}
