// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Error types with actionable messages
//!
//! Every failure is a configuration-authoring or environment problem the
//! user has to fix, so each variant carries a diagnostic code and, where
//! possible, a hint pointing at the fix.

mod recovery;

pub use recovery::RecoverySuggestion;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for msaconf operations
pub type MsaconfResult<T> = Result<T, MsaconfError>;

/// Main error type for msaconf
#[derive(Error, Debug, Diagnostic)]
pub enum MsaconfError {
    // ─────────────────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Input document not found: {path}")]
    #[diagnostic(
        code(msaconf::input_not_found),
        help("Check the path passed to msaconf; inputs are resolved relative to the working directory")
    )]
    InputNotFound { path: PathBuf },

    #[error("Failed to read input '{path}': {error}")]
    #[diagnostic(code(msaconf::input_read_error))]
    InputReadError { path: PathBuf, error: String },

    #[error("Schema error at '{path}': {reason}")]
    #[diagnostic(code(msaconf::schema_error))]
    SchemaError {
        path: String,
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("MSA '{name}' is not defined in the versions document")]
    #[diagnostic(
        code(msaconf::unknown_msa),
        help("Available MSAs: {available}")
    )]
    UnknownMsa { name: String, available: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Output Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to write '{path}': {error}")]
    #[diagnostic(code(msaconf::write_failure))]
    WriteFailure { path: PathBuf, error: String },

    #[error("'{name}' cannot be used as an output file name")]
    #[diagnostic(
        code(msaconf::invalid_name),
        help("Output names may only contain letters, digits, '.', '_' and '-', and must start with a letter or digit")
    )]
    InvalidName { name: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Invocation / Settings Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid invocation: {reason}")]
    #[diagnostic(
        code(msaconf::invalid_invocation),
        help("Pass inputs and output directories as pairs: msaconf generate <INPUT> <OUTPUT_DIR> [<INPUT> <OUTPUT_DIR> ...]")
    )]
    InvalidInvocation { reason: String },

    #[error("Invalid settings in '{path}': {reason}")]
    #[diagnostic(code(msaconf::invalid_settings))]
    InvalidSettings { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/Format Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(msaconf::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(msaconf::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(msaconf::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(msaconf::toml_error))]
    Toml { message: String },
}

impl From<std::io::Error> for MsaconfError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for MsaconfError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for MsaconfError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for MsaconfError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl MsaconfError {
    /// Schema violation at a dotted document path
    pub fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaError {
            path: path.into(),
            reason: reason.into(),
            help: None,
        }
    }

    /// Schema violation with a hint attached
    pub fn schema_with_help(
        path: impl Into<String>,
        reason: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self::SchemaError {
            path: path.into(),
            reason: reason.into(),
            help: Some(help.into()),
        }
    }

    /// Wrap an IO error raised while producing an output file
    pub fn write_failure(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        Self::WriteFailure {
            path: path.into(),
            error: error.to_string(),
        }
    }

    /// Suggested fix for this error, if one is known
    pub fn recovery(&self) -> Option<RecoverySuggestion> {
        match self {
            Self::InputNotFound { path } => Some(RecoverySuggestion::missing_input(path)),
            Self::SchemaError { path, .. } => Some(RecoverySuggestion::fix_schema(path)),
            Self::WriteFailure { path, .. } => Some(RecoverySuggestion::fix_output_location(path)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message_names_path() {
        let err = MsaconfError::schema("msas.alpha.review", "expected a mapping");
        assert_eq!(
            err.to_string(),
            "Schema error at 'msas.alpha.review': expected a mapping"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MsaconfError = io.into();
        assert!(matches!(err, MsaconfError::Io { .. }));
    }

    #[test]
    fn test_recovery_only_for_actionable_errors() {
        assert!(MsaconfError::InputNotFound { path: "v.yaml".into() }
            .recovery()
            .is_some());
        assert!(MsaconfError::Io { message: "x".into() }.recovery().is_none());
    }
}
