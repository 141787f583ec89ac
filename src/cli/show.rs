// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Show command - print one resolved configuration

use miette::Result;
use std::path::{Path, PathBuf};

use super::report::print_trace;
use super::{load_settings, ResolveArgs};
use crate::document::VersionDocument;
use crate::output::{render, OutputFormat};
use crate::resolver::build_defaults;

/// Run the show command
pub async fn run(
    input: PathBuf,
    msa: Option<String>,
    format: OutputFormat,
    trace: bool,
    resolve: ResolveArgs,
    config: Option<&Path>,
) -> Result<()> {
    let settings = load_settings(config, &resolve)?;
    let document = VersionDocument::from_file(&input)?;
    let defaults = build_defaults(&document);

    let text = match msa {
        Some(name) => {
            let resolution = settings.resolver().resolve_msa(&document, &name, &defaults)?;
            if trace {
                print_trace(&resolution.name, &resolution.trace);
            }
            render(&resolution.config, format)?
        }
        None => render(&defaults, format)?,
    };

    // Rendered text already ends with a newline
    print!("{}", text);
    Ok(())
}
