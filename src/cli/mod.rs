// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for msaconf.

pub mod generate;
pub mod report;
pub mod show;
pub mod validate;
pub mod watch;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Settings, SettingsOverrides};
use crate::output::{OutputFormat, StorageMode};

/// Per-MSA configuration generator
///
/// Resolve a versions document into one default file and one file per MSA.
#[derive(Parser, Debug)]
#[clap(
    name = "msaconf",
    version,
    about = "Generate per-MSA deployment configuration from a versions document",
    long_about = None,
    after_help = "Examples:\n\
        msaconf generate versions.yaml out/               Write default_values.yaml and one file per MSA\n\
        msaconf generate a.yaml out-a/ b.yaml out-b/      Process several documents in one run\n\
        msaconf show versions.yaml --msa alpha --trace    Print one MSA's resolved config\n\
        msaconf validate versions.yaml                    Check a document without writing\n\n\
        See 'msaconf <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Settings file (default: .msaconf.yaml when present)
    #[clap(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve documents and write their configuration sets
    Generate {
        /// Input documents and output directories, as pairs
        #[clap(required = true, value_name = "INPUT OUTPUT_DIR")]
        paths: Vec<PathBuf>,

        #[clap(flatten)]
        resolve: ResolveArgs,

        /// Resolve and report without writing files
        #[clap(long)]
        dry_run: bool,
    },

    /// Print a resolved configuration
    Show {
        /// Versions document
        input: PathBuf,

        /// MSA to show (default: the shared defaults)
        #[clap(short, long)]
        msa: Option<String>,

        /// Output format
        #[clap(short, long, default_value = "yaml")]
        format: OutputFormat,

        /// Also print which overrides were applied or ignored
        #[clap(long)]
        trace: bool,

        #[clap(flatten)]
        resolve: ResolveArgs,
    },

    /// Check documents without writing anything
    Validate {
        /// Versions documents to check
        #[clap(required = true)]
        inputs: Vec<PathBuf>,

        #[clap(flatten)]
        resolve: ResolveArgs,
    },

    /// Regenerate whenever an input document changes
    Watch {
        /// Input documents and output directories, as pairs
        #[clap(required = true, value_name = "INPUT OUTPUT_DIR")]
        paths: Vec<PathBuf>,

        #[clap(flatten)]
        resolve: ResolveArgs,

        /// Debounce delay in milliseconds
        #[clap(long, default_value = "500")]
        debounce: u64,
    },
}

/// Flags that shape resolution and storage
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Restrict service overrides to these components (repeatable)
    #[clap(long = "override-component", value_name = "COMPONENT")]
    pub override_components: Vec<String>,

    /// How MSAs without overrides are stored (link, copy)
    #[clap(long, env = "MSACONF_STORAGE")]
    pub storage: Option<StorageMode>,
}

impl ResolveArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            override_components: self.override_components.clone(),
            storage: self.storage,
        }
    }
}

/// Load settings and layer command-line flags on top
pub fn load_settings(config: Option<&Path>, args: &ResolveArgs) -> miette::Result<Settings> {
    let base_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;

    let settings = Settings::load(config, &base_dir)?;
    Ok(settings.with_overrides(&args.overrides()))
}
