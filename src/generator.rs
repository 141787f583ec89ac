// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Generation driver
//!
//! Load a versions document, resolve it, and write the output set. Every
//! call recomputes and rewrites everything.

use std::path::{Path, PathBuf};

use crate::document::VersionDocument;
use crate::errors::{MsaconfError, MsaconfResult};
use crate::output::{DocumentWriter, WriteReport};
use crate::resolver::{Resolution, Resolver};

/// An input document and the directory its outputs go to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTarget {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

impl GenerationTarget {
    /// Pair up `INPUT OUTPUT_DIR [INPUT OUTPUT_DIR ...]`
    pub fn from_pairs(args: &[PathBuf]) -> MsaconfResult<Vec<Self>> {
        if args.is_empty() {
            return Err(MsaconfError::InvalidInvocation {
                reason: "no input documents given".to_string(),
            });
        }

        if args.len() % 2 != 0 {
            return Err(MsaconfError::InvalidInvocation {
                reason: format!(
                    "'{}' has no output directory",
                    args[args.len() - 1].display()
                ),
            });
        }

        Ok(args
            .chunks(2)
            .map(|pair| Self {
                input: pair[0].clone(),
                output_dir: pair[1].clone(),
            })
            .collect())
    }
}

/// Outcome of generating one target
#[derive(Debug)]
pub struct GenerationReport {
    pub target: GenerationTarget,
    pub resolution: Resolution,
    /// `None` on a dry run
    pub written: Option<WriteReport>,
}

/// Runs load → resolve → write for each target
pub struct Generator {
    resolver: Resolver,
    writer: DocumentWriter,
    dry_run: bool,
}

impl Generator {
    pub fn new(resolver: Resolver, writer: DocumentWriter) -> Self {
        Self {
            resolver,
            writer,
            dry_run: false,
        }
    }

    /// Resolve without writing anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Generate the outputs of one document
    pub async fn generate(&self, input: &Path, output_dir: &Path) -> MsaconfResult<GenerationReport> {
        let document = VersionDocument::from_file(input)?;
        let resolution = self.resolver.resolve_all(&document)?;

        tracing::info!(
            input = %input.display(),
            components = document.defaults.len(),
            msas = resolution.msas.len(),
            "resolved versions document"
        );

        let written = if self.dry_run {
            self.writer.check_names(&resolution)?;
            None
        } else {
            let report = self.writer.write_resolution(output_dir, &resolution).await?;
            tracing::info!(
                output_dir = %output_dir.display(),
                files = report.files.len(),
                links = report.links(),
                "wrote configuration set"
            );
            Some(report)
        };

        Ok(GenerationReport {
            target: GenerationTarget {
                input: input.to_path_buf(),
                output_dir: output_dir.to_path_buf(),
            },
            resolution,
            written,
        })
    }

    /// Generate every target in order, stopping at the first failure
    pub async fn generate_all(
        &self,
        targets: &[GenerationTarget],
    ) -> MsaconfResult<Vec<GenerationReport>> {
        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            reports.push(self.generate(&target.input, &target.output_dir).await?);
        }
        Ok(reports)
    }
}
