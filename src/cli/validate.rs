// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Validate command - check versions documents

use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};

use super::report::print_failure;
use super::{load_settings, ResolveArgs};
use crate::document::VersionDocument;
use crate::utils::print_section;
use crate::validation::DocumentValidator;

/// Run the validate command
pub async fn run(
    inputs: Vec<PathBuf>,
    resolve: ResolveArgs,
    config: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let settings = load_settings(config, &resolve)?;
    let resolver = settings.resolver();
    let layout = settings.layout();

    let mut failed = 0usize;

    for input in &inputs {
        println!("{} {}", "Validating".bold(), input.display());

        let document = match VersionDocument::from_file(input) {
            Ok(document) => document,
            Err(e) => {
                print_failure(&e);
                println!();
                failed += 1;
                continue;
            }
        };

        println!("  {} Document shape is valid", "✓".green());

        let validation = DocumentValidator::validate(&document, &resolver, &layout);

        if !validation.errors.is_empty() {
            print_section(&"Errors".red().bold().to_string());
            for error in &validation.errors {
                println!("  {} {}", "✗".red(), error);
            }
        }

        if validation.has_warnings() {
            print_section(&"Warnings".yellow().bold().to_string());
            for warning in &validation.warnings {
                println!("  {} {}", "⚠".yellow(), warning);
            }
        }

        if verbose {
            print_section("Summary");
            println!("  Components: {}", document.component_names().join(", "));
            println!("  MSAs: {}", validation.msas);
            if !validation.unchanged.is_empty() {
                println!(
                    "  Same as defaults: {}",
                    validation.unchanged.join(", ").dimmed()
                );
            }
        }

        if !validation.is_valid() {
            failed += 1;
        }

        println!();
    }

    if failed > 0 {
        Err(miette::miette!(
            "{} of {} document(s) failed validation",
            failed,
            inputs.len()
        ))
    } else {
        println!("{}", "All documents are valid!".green().bold());
        Ok(())
    }
}
