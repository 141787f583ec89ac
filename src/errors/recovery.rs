// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Error recovery suggestions
//!
//! Provides actionable suggestions for recovering from errors.

use std::path::Path;

/// A recovery suggestion with concrete steps
#[derive(Debug, Clone)]
pub struct RecoverySuggestion {
    /// Brief description of what to do
    pub action: String,
    /// Detailed steps
    pub steps: Vec<String>,
    /// Commands to run
    pub commands: Vec<String>,
}

impl RecoverySuggestion {
    /// Suggest fixing a missing input document
    pub fn missing_input(path: &Path) -> Self {
        Self {
            action: format!("Provide the versions document '{}'", path.display()),
            steps: vec![
                "The input path does not exist".into(),
                "Relative paths are resolved against the working directory (see -C)".into(),
            ],
            commands: vec![
                "# List candidate documents:".into(),
                "ls *.yaml *.yml *.json".into(),
            ],
        }
    }

    /// Suggest fixing a document shape problem
    pub fn fix_schema(path: &str) -> Self {
        Self {
            action: format!("Fix the document at '{}'", path),
            steps: vec![
                "Expected shape:".into(),
                "  defaults: { <component>: { default: <version>, services: { <service>: <version> } } }".into(),
                "  msas: { <msa>: { <component>: { default: <version>, services: { ... } } } }".into(),
                "Quote version strings so YAML does not read them as numbers (e.g. '1.0')".into(),
            ],
            commands: vec![
                "# Inspect the document without writing anything:".into(),
                "msaconf validate <INPUT>".into(),
            ],
        }
    }

    /// Suggest fixing an unwritable output location
    pub fn fix_output_location(path: &Path) -> Self {
        Self {
            action: format!("Make '{}' writable", path.display()),
            steps: vec![
                "The output directory must be creatable and its files replaceable".into(),
                "Check permissions and that no parent path is a regular file".into(),
            ],
            commands: vec![format!("ls -ld {}", path.display())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_suggestion_mentions_path() {
        let suggestion = RecoverySuggestion::fix_schema("defaults.review");
        assert!(suggestion.action.contains("defaults.review"));
        assert!(!suggestion.steps.is_empty());
    }
}
