// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Document writer
//!
//! Persists a [`Resolution`] as one shared default file plus one file per
//! MSA. An MSA whose config equals the defaults can be stored as a link to
//! the shared file instead of a copy.

mod render;
mod store;

pub use render::{render, OutputFormat};
pub use store::{FileKind, FilesystemStore, OutputStore};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::errors::{MsaconfError, MsaconfResult};
use crate::resolver::Resolution;

/// Representation of MSAs that do not override anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Link to the shared default file
    #[default]
    Link,
    /// Always write an independent file
    Copy,
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "link" | "symlink" => Ok(Self::Link),
            "copy" => Ok(Self::Copy),
            _ => Err(format!("Unknown storage mode: {}", s)),
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Link => write!(f, "link"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

/// File naming inside an output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Stem of the shared default file
    pub default_name: String,
    /// Extension of every file; `json` switches rendering to JSON
    pub extension: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            default_name: "default_values".to_string(),
            extension: "yaml".to_string(),
        }
    }
}

impl OutputLayout {
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension)
    }

    pub fn format(&self) -> OutputFormat {
        OutputFormat::from_extension(&self.extension)
    }
}

/// One file produced by the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// `default_name` for the shared file, otherwise the MSA name
    pub name: String,
    pub path: PathBuf,
    pub kind: FileKind,
    /// BLAKE3 hex digest of the content reachable at `path`
    pub digest: String,
}

/// Everything written for one document
#[derive(Debug, Clone, Default)]
pub struct WriteReport {
    pub files: Vec<WrittenFile>,
}

impl WriteReport {
    pub fn links(&self) -> usize {
        self.files.iter().filter(|f| f.kind == FileKind::Link).count()
    }

    pub fn file(&self, name: &str) -> Option<&WrittenFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

fn file_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("file name pattern is valid")
    })
}

/// Writes resolutions through an [`OutputStore`]
pub struct DocumentWriter {
    store: Box<dyn OutputStore>,
    mode: StorageMode,
    layout: OutputLayout,
}

impl DocumentWriter {
    pub fn new(store: Box<dyn OutputStore>, mode: StorageMode, layout: OutputLayout) -> Self {
        Self { store, mode, layout }
    }

    /// Writer backed by the local filesystem
    pub fn filesystem(mode: StorageMode, layout: OutputLayout) -> Self {
        Self::new(Box::new(FilesystemStore::new()), mode, layout)
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Check that every output name is usable before anything is written
    pub fn check_names(&self, resolution: &Resolution) -> MsaconfResult<()> {
        let pattern = file_name_pattern();

        if !pattern.is_match(&self.layout.default_name) {
            return Err(MsaconfError::InvalidName {
                name: self.layout.default_name.clone(),
            });
        }

        for msa in &resolution.msas {
            if !pattern.is_match(&msa.name) || msa.name == self.layout.default_name {
                return Err(MsaconfError::InvalidName {
                    name: msa.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Write the shared default file and one file per MSA into `dir`
    pub async fn write_resolution(
        &self,
        dir: &Path,
        resolution: &Resolution,
    ) -> MsaconfResult<WriteReport> {
        self.check_names(resolution)?;
        self.store.prepare_dir(dir).await?;

        let format = self.layout.format();
        let mut report = WriteReport::default();

        let default_file = self.layout.file_name(&self.layout.default_name);
        let default_path = dir.join(&default_file);
        let default_text = render(&resolution.defaults, format)?;
        let default_digest = digest(&default_text);

        self.store
            .write_file(&default_path, default_text.as_bytes())
            .await?;
        tracing::debug!(path = %default_path.display(), "wrote shared defaults");

        report.files.push(WrittenFile {
            name: self.layout.default_name.clone(),
            path: default_path,
            kind: FileKind::File,
            digest: default_digest.clone(),
        });

        for msa in &resolution.msas {
            let path = dir.join(self.layout.file_name(&msa.name));

            let (kind, digest) = if msa.unchanged && self.mode == StorageMode::Link {
                let kind = self.store.link_file(&path, &default_file).await?;
                (kind, default_digest.clone())
            } else {
                let text = render(&msa.config, format)?;
                self.store.write_file(&path, text.as_bytes()).await?;
                (FileKind::File, digest(&text))
            };

            tracing::debug!(msa = %msa.name, path = %path.display(), %kind, "wrote msa config");

            report.files.push(WrittenFile {
                name: msa.name.clone(),
                path,
                kind,
                digest,
            });
        }

        Ok(report)
    }
}

fn digest(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
