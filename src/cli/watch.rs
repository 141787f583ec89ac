// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Watch command - regenerate when input documents change

use colored::Colorize;
use miette::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use super::report::{print_failure, print_generation};
use super::{load_settings, ResolveArgs};
use crate::generator::{GenerationTarget, Generator};

/// Run the watch command
pub async fn run(
    paths: Vec<PathBuf>,
    resolve: ResolveArgs,
    debounce_ms: u64,
    config: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let targets = GenerationTarget::from_pairs(&paths)?;
    let settings = load_settings(config, &resolve)?;
    let generator = Generator::new(settings.resolver(), settings.writer());

    let mut inputs = Vec::with_capacity(targets.len());
    for target in &targets {
        let canonical = target.input.canonicalize().map_err(|_| {
            crate::errors::MsaconfError::InputNotFound {
                path: target.input.clone(),
            }
        })?;
        inputs.push(canonical);
    }

    println!("{}", "Starting watch mode...".bold());
    println!(
        "Watching {} document(s) (debounce: {}ms)",
        inputs.len(),
        debounce_ms
    );
    println!("Press {} to exit.", "Ctrl+C".cyan());
    println!();

    let (tx, rx) = channel();

    let mut debouncer = new_debouncer(Duration::from_millis(debounce_ms), tx)
        .map_err(|e| miette::miette!("Failed to create file watcher: {}", e))?;

    // Watch parent directories so editors that replace files are still seen
    let dirs: BTreeSet<PathBuf> = inputs
        .iter()
        .filter_map(|input| input.parent().map(Path::to_path_buf))
        .collect();
    for dir in &dirs {
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| miette::miette!("Failed to watch '{}': {}", dir.display(), e))?;
    }

    regenerate(&generator, &targets, verbose).await;

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
                    .filter(|e| is_input(&e.path, &inputs))
                    .collect();

                if !changed.is_empty() {
                    println!();
                    println!("{}", "─".repeat(50).dimmed());
                    println!(
                        "{}: {} document(s) changed",
                        "Change detected".yellow(),
                        changed.len()
                    );

                    if verbose {
                        for event in &changed {
                            println!("  {}", event.path.display());
                        }
                    }

                    println!();
                    regenerate(&generator, &targets, verbose).await;
                }
            }
            Ok(Err(e)) => {
                eprintln!("{}: {:?}", "Watch error".red(), e);
            }
            Err(e) => {
                // Channel closed
                eprintln!("{}: {}", "Channel error".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn is_input(path: &Path, inputs: &[PathBuf]) -> bool {
    if inputs.iter().any(|input| input == path) {
        return true;
    }
    path.canonicalize()
        .map(|canonical| inputs.contains(&canonical))
        .unwrap_or(false)
}

/// Full regeneration of every target; failures are reported and watching continues
async fn regenerate(generator: &Generator, targets: &[GenerationTarget], verbose: bool) {
    let start = std::time::Instant::now();

    match generator.generate_all(targets).await {
        Ok(reports) => {
            for report in &reports {
                print_generation(report, verbose);
            }
            println!(
                "{} ({:.2}s)",
                "Generation completed".green(),
                start.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            print_failure(&e);
            println!(
                "{} ({:.2}s)",
                "Generation failed".red(),
                start.elapsed().as_secs_f64()
            );
        }
    }
}
