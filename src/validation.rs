// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Document validation
//!
//! Finds authoring mistakes that resolution tolerates: overrides that are
//! dropped, services whose default depends on component order, and names
//! that cannot become output files.

use crate::document::VersionDocument;
use crate::output::{DocumentWriter, OutputLayout};
use crate::resolver::{service_collisions, IgnoreReason, Resolver};

/// Document validator
pub struct DocumentValidator;

impl DocumentValidator {
    /// Validate a parsed document under the given resolver and layout
    pub fn validate(
        document: &VersionDocument,
        resolver: &Resolver,
        layout: &OutputLayout,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        let resolution = match resolver.resolve_all(document) {
            Ok(resolution) => resolution,
            Err(e) => {
                result.add_error(&e.to_string());
                return result;
            }
        };

        // Output names are checked the same way the writer does
        let writer = DocumentWriter::filesystem(Default::default(), layout.clone());
        if let Err(e) = writer.check_names(&resolution) {
            result.add_error(&e.to_string());
        }

        for collision in service_collisions(document) {
            result.add_warning(&format!(
                "Service '{}' is declared by components {}; '{}' wins",
                collision.service,
                collision.components.join(", "),
                collision.winner()
            ));
        }

        for msa in &resolution.msas {
            for ignored in &msa.trace.ignored {
                let detail = match ignored.reason {
                    IgnoreReason::UnknownService => "the service is not declared in defaults",
                    IgnoreReason::IneligibleComponent => {
                        "the service belongs to a component outside the override scope"
                    }
                    IgnoreReason::UnknownComponent => "the component is not declared in defaults",
                    IgnoreReason::UnknownVersionKey => "defaults produce no such version key",
                };
                result.add_warning(&format!(
                    "MSA '{}': override of '{}' ({}) is ignored; {}",
                    msa.name, ignored.target, ignored.component, detail
                ));
            }
        }

        result.unchanged = resolution
            .msas
            .iter()
            .filter(|m| m.unchanged)
            .map(|m| m.name.clone())
            .collect();
        result.msas = resolution.msas.len();

        result
    }
}

/// Result of document validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// MSAs identical to the shared defaults
    pub unchanged: Vec<String>,
    pub msas: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn add_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
