// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Project settings
//!
//! Loaded from `.msaconf.yaml`. Every field is optional; command-line flags
//! take precedence over the file.
//!
//! ```yaml
//! override_components: [review]
//! storage: link
//! default_name: default_values
//! extension: yaml
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{MsaconfError, MsaconfResult};
use crate::output::{DocumentWriter, OutputLayout, StorageMode};
use crate::resolver::{OverrideScope, Resolver};

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = ".msaconf.yaml";

/// Settings from `.msaconf.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Components whose services MSAs may override; absent means all
    #[serde(default)]
    pub override_components: Option<Vec<String>>,

    /// How unchanged MSAs are stored
    #[serde(default)]
    pub storage: StorageMode,

    /// Stem of the shared default file
    #[serde(default = "default_name")]
    pub default_name: String,

    /// Extension of generated files
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_name() -> String {
    "default_values".to_string()
}

fn default_extension() -> String {
    "yaml".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            override_components: None,
            storage: StorageMode::default(),
            default_name: default_name(),
            extension: default_extension(),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub override_components: Vec<String>,
    pub storage: Option<StorageMode>,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `.msaconf.yaml` in `base_dir`
    /// is used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>, base_dir: &Path) -> MsaconfResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = base_dir.join(SETTINGS_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> MsaconfResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MsaconfError::InvalidSettings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings = Self::from_yaml(&content).map_err(|e| MsaconfError::InvalidSettings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        settings.validate(path)?;

        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings from YAML; an empty document is the defaults
    pub fn from_yaml(yaml: &str) -> MsaconfResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    fn validate(&self, path: &Path) -> MsaconfResult<()> {
        if !matches!(self.extension.to_lowercase().as_str(), "yaml" | "yml" | "json") {
            return Err(MsaconfError::InvalidSettings {
                path: path.to_path_buf(),
                reason: format!("unsupported extension '{}' (use yaml, yml or json)", self.extension),
            });
        }
        Ok(())
    }

    /// Apply command-line values on top of the file
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if !overrides.override_components.is_empty() {
            self.override_components = Some(overrides.override_components.clone());
        }
        if let Some(storage) = overrides.storage {
            self.storage = storage;
        }
        self
    }

    pub fn scope(&self) -> OverrideScope {
        match &self.override_components {
            Some(names) => OverrideScope::from_names(names.iter().cloned()),
            None => OverrideScope::All,
        }
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout {
            default_name: self.default_name.clone(),
            extension: self.extension.clone(),
        }
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.scope())
    }

    pub fn writer(&self) -> DocumentWriter {
        DocumentWriter::filesystem(self.storage, self.layout())
    }
}

/// Path shown in messages for the settings in effect
pub fn settings_source(explicit: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let path = base_dir.join(SETTINGS_FILE);
            path.exists().then_some(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_yaml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.scope(), OverrideScope::All);
        assert_eq!(settings.layout(), OutputLayout::default());
    }

    #[test]
    fn test_parse_settings() {
        let settings = Settings::from_yaml(
            "override_components: [review]\nstorage: copy\ndefault_name: base\nextension: yml\n",
        )
        .unwrap();
        assert_eq!(settings.storage, StorageMode::Copy);
        assert_eq!(settings.layout().file_name("base"), "base.yml");
        assert!(settings.scope().allows("review"));
        assert!(!settings.scope().allows("processing"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Settings::from_yaml("storrage: copy\n").is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let settings = Settings::from_yaml("override_components: [review]\nstorage: copy\n").unwrap();
        let overrides = SettingsOverrides {
            override_components: vec!["processing".into()],
            storage: Some(StorageMode::Link),
        };

        let merged = settings.with_overrides(&overrides);
        assert_eq!(merged.storage, StorageMode::Link);
        assert!(merged.scope().allows("processing"));
        assert!(!merged.scope().allows("review"));
    }

    #[test]
    fn test_load_missing_implicit_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(None, dir.path()).unwrap(), Settings::default());
        assert!(settings_source(None, dir.path()).is_none());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.yaml")), dir.path()).unwrap_err();
        assert!(matches!(err, MsaconfError::InvalidSettings { .. }));
    }

    #[test]
    fn test_load_rejects_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "extension: ini\n").unwrap();
        let err = Settings::load(None, dir.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported extension"));
    }
}
