// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Versions document model
//!
//! A versions document pairs per-component defaults with per-MSA partial
//! overrides:
//!
//! ```yaml
//! defaults:
//!   review:
//!     default: "1.0"
//!     services:
//!       auth: "1.0"
//! msas:
//!   alpha:
//!     review:
//!       services:
//!         auth: "1.1"
//!       versions:
//!         default_processing: "3.2"
//! ```
//!
//! `versions` is only accepted inside overrides. It retargets flattened
//! `default_<component>` keys directly.
//!
//! Every mapping keeps the order it was written in. The resolver relies on
//! that order when two components declare the same service.

mod loader;

pub use loader::DocumentFormat;

use serde_yaml::{Mapping, Value};

use crate::errors::{MsaconfError, MsaconfResult};

/// Parsed versions document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionDocument {
    /// Component defaults, in document order
    pub defaults: Vec<(String, ComponentDefault)>,

    /// MSA overrides, in document order
    pub msas: Vec<(String, MsaOverride)>,
}

/// Baseline version of a component and the pinned versions of its services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentDefault {
    /// Component version; `None` when the document leaves it out
    pub default: Option<String>,

    /// Service name to version, in document order
    pub services: Vec<(String, String)>,
}

/// Partial overrides declared by one MSA
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsaOverride {
    /// Component name to override, in document order
    pub components: Vec<(String, ComponentOverride)>,
}

/// Override of a single component; every part is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentOverride {
    pub default: Option<String>,
    pub services: Vec<(String, String)>,

    /// Flattened version key (`default_<component>`) to version, in document order
    pub versions: Vec<(String, String)>,
}

impl VersionDocument {
    /// Build a document from an already-parsed structured value
    pub fn from_value(root: &Value) -> MsaconfResult<Self> {
        let root = expect_mapping(root, "<root>")?;

        let defaults_value = root.get("defaults").ok_or_else(|| {
            MsaconfError::schema_with_help(
                "defaults",
                "missing required key",
                "Declare at least an empty mapping: `defaults: {}`",
            )
        })?;
        let defaults = expect_mapping(defaults_value, "defaults")?;

        let mut document = Self::default();

        for (key, value) in defaults {
            let component = key_str(key, "defaults")?;
            let path = format!("defaults.{}", component);
            let entry = parse_component_entry(value, &path, EntryKind::Default)?;
            document.defaults.push((
                component.to_string(),
                ComponentDefault {
                    default: entry.default,
                    services: entry.services,
                },
            ));
        }

        if let Some(msas) = optional_mapping(root.get("msas"), "msas")? {
            for (key, value) in msas {
                let name = key_str(key, "msas")?;
                let path = format!("msas.{}", name);
                let overrides = parse_msa_override(value, &path)?;
                document.msas.push((name.to_string(), overrides));
            }
        }

        Ok(document)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> MsaconfResult<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(&value)
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> MsaconfResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> MsaconfResult<Self> {
        let value: Value = toml::from_str(content)?;
        Self::from_value(&value)
    }

    /// Component names in document order
    pub fn component_names(&self) -> Vec<&str> {
        self.defaults.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// MSA names in document order
    pub fn msa_names(&self) -> Vec<&str> {
        self.msas.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Look up the overrides of one MSA
    pub fn msa(&self, name: &str) -> Option<&MsaOverride> {
        self.msas
            .iter()
            .find(|(msa, _)| msa == name)
            .map(|(_, overrides)| overrides)
    }

    /// Whether `defaults` declares the component
    pub fn has_component(&self, name: &str) -> bool {
        self.defaults.iter().any(|(component, _)| component == name)
    }
}

fn parse_msa_override(value: &Value, path: &str) -> MsaconfResult<MsaOverride> {
    let mut overrides = MsaOverride::default();

    // `alpha:` with nothing under it is an MSA that takes every default
    let Some(body) = optional_mapping(Some(value), path)? else {
        return Ok(overrides);
    };

    for (key, entry) in body {
        let component = key_str(key, path)?;
        let entry_path = format!("{}.{}", path, component);
        let entry = parse_component_entry(entry, &entry_path, EntryKind::Override)?;
        overrides.components.push((component.to_string(), entry));
    }

    Ok(overrides)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Default,
    Override,
}

/// Parse the `{ default, services }` shape shared by defaults and overrides;
/// overrides may also carry `versions`
fn parse_component_entry(
    value: &Value,
    path: &str,
    kind: EntryKind,
) -> MsaconfResult<ComponentOverride> {
    let mapping = expect_mapping(value, path)?;

    let mut entry = ComponentOverride::default();

    for (key, field) in mapping {
        let name = key_str(key, path)?;
        let field_path = format!("{}.{}", path, name);

        match name {
            "default" => entry.default = version_str(field, &field_path)?,
            "services" => entry.services = version_pairs(field, &field_path, "service")?,
            "versions" if kind == EntryKind::Override => {
                entry.versions = version_pairs(field, &field_path, "version")?
            }
            other => {
                let help = match kind {
                    EntryKind::Default => "Component defaults only accept 'default' and 'services'",
                    EntryKind::Override => {
                        "Component overrides only accept 'default', 'services' and 'versions'"
                    }
                };
                return Err(MsaconfError::schema_with_help(
                    field_path.clone(),
                    format!("unknown key '{}'", other),
                    help,
                ));
            }
        }
    }

    Ok(entry)
}

/// A `name: "version"` mapping; absent or `null` is empty
fn version_pairs(field: &Value, path: &str, what: &str) -> MsaconfResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    if let Some(mapping) = optional_mapping(Some(field), path)? {
        for (key, version) in mapping {
            let name = key_str(key, path)?;
            let version_path = format!("{}.{}", path, name);
            let version = version_str(version, &version_path)?.ok_or_else(|| {
                MsaconfError::schema(&version_path, format!("{} version must not be empty", what))
            })?;
            pairs.push((name.to_string(), version));
        }
    }

    Ok(pairs)
}

fn expect_mapping<'a>(value: &'a Value, path: &str) -> MsaconfResult<&'a Mapping> {
    value.as_mapping().ok_or_else(|| {
        MsaconfError::schema(path, format!("expected a mapping, found {}", kind_of(value)))
    })
}

/// Absent or `null` reads as "nothing declared"
fn optional_mapping<'a>(value: Option<&'a Value>, path: &str) -> MsaconfResult<Option<&'a Mapping>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(other) => expect_mapping(other, path).map(Some),
    }
}

fn key_str<'a>(key: &'a Value, path: &str) -> MsaconfResult<&'a str> {
    key.as_str().ok_or_else(|| {
        MsaconfError::schema(path, format!("keys must be strings, found {}", kind_of(key)))
    })
}

fn version_str(value: &Value, path: &str) -> MsaconfResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(_) | Value::Bool(_) => Err(MsaconfError::schema_with_help(
            path,
            format!("expected a version string, found {}", kind_of(value)),
            "Quote the version so it is read as text, e.g. \"1.0\"",
        )),
        other => Err(MsaconfError::schema(
            path,
            format!("expected a version string, found {}", kind_of(other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
