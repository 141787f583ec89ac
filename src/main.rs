// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! msaconf - per-MSA configuration generator
//!
//! Resolve a versions document into deployable configuration files.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msaconf::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for rendered configs
    let default_filter = if cli.verbose { "msaconf=debug" } else { "msaconf=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    msaconf::utils::configure_colors();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    let config = cli.config.as_deref();

    // Dispatch to command handlers
    match cli.command {
        Commands::Generate {
            paths,
            resolve,
            dry_run,
        } => msaconf::cli::generate::run(paths, resolve, dry_run, config, cli.verbose).await,
        Commands::Show {
            input,
            msa,
            format,
            trace,
            resolve,
        } => msaconf::cli::show::run(input, msa, format, trace, resolve, config).await,
        Commands::Validate { inputs, resolve } => {
            msaconf::cli::validate::run(inputs, resolve, config, cli.verbose).await
        }
        Commands::Watch {
            paths,
            resolve,
            debounce,
        } => msaconf::cli::watch::run(paths, resolve, debounce, config, cli.verbose).await,
    }
}
