// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Loading versions documents from disk

use std::path::Path;

use super::VersionDocument;
use crate::errors::{MsaconfError, MsaconfResult};

/// Structured-data syntax of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the syntax from the file extension; anything unrecognised is YAML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

impl VersionDocument {
    /// Load a versions document from a file
    pub fn from_file(path: &Path) -> MsaconfResult<Self> {
        if !path.exists() {
            return Err(MsaconfError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MsaconfError::InputReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let format = DocumentFormat::from_path(path);
        tracing::debug!(path = %path.display(), %format, "parsing versions document");

        Self::parse(&content, format)
    }

    /// Parse document text in the given syntax
    pub fn parse(content: &str, format: DocumentFormat) -> MsaconfResult<Self> {
        match format {
            DocumentFormat::Yaml => Self::from_yaml_str(content),
            DocumentFormat::Json => Self::from_json_str(content),
            DocumentFormat::Toml => Self::from_toml_str(content),
        }
    }
}
