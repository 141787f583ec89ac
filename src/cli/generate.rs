// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Generate command - write configuration sets

use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};

use super::report::{print_failure, print_generation};
use super::{load_settings, ResolveArgs};
use crate::config::settings_source;
use crate::generator::{GenerationTarget, Generator};

/// Run the generate command
pub async fn run(
    paths: Vec<PathBuf>,
    resolve: ResolveArgs,
    dry_run: bool,
    config: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let targets = GenerationTarget::from_pairs(&paths)?;
    let settings = load_settings(config, &resolve)?;

    if verbose {
        let source = std::env::current_dir()
            .ok()
            .and_then(|cwd| settings_source(config, &cwd))
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string());
        println!(
            "{} {} (override scope: {}, storage: {})",
            "Settings:".bold(),
            source,
            settings.scope(),
            settings.storage
        );
    }

    let generator = Generator::new(settings.resolver(), settings.writer()).with_dry_run(dry_run);

    // Documents are processed in order; the first failure ends the run
    for target in &targets {
        match generator.generate(&target.input, &target.output_dir).await {
            Ok(report) => print_generation(&report, verbose),
            Err(e) => {
                print_failure(&e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
