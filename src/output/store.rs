// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Output storage backends

use async_trait::async_trait;
use std::path::Path;

use crate::errors::{MsaconfError, MsaconfResult};

/// How a file ended up on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Independent file with its own content
    File,
    /// Reference to the shared default file
    Link,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Link => write!(f, "link"),
        }
    }
}

/// Trait for output storage implementations
#[async_trait]
pub trait OutputStore: Send + Sync {
    /// Create the output directory if it does not exist
    async fn prepare_dir(&self, dir: &Path) -> MsaconfResult<()>;

    /// Write `content` to `path`, replacing whatever is there
    async fn write_file(&self, path: &Path, content: &[u8]) -> MsaconfResult<()>;

    /// Make `path` refer to `target`, a file name in the same directory.
    /// Returns what was actually stored.
    async fn link_file(&self, path: &Path, target: &str) -> MsaconfResult<FileKind>;
}

/// Store backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemStore;

impl FilesystemStore {
    pub fn new() -> Self {
        Self
    }

    /// Remove a previous file or link so it is never written through
    async fn clear(path: &Path) -> MsaconfResult<()> {
        match tokio::fs::symlink_metadata(path).await {
            Ok(meta) if meta.is_dir() => Err(MsaconfError::write_failure(
                path,
                "a directory is in the way",
            )),
            Ok(_) => tokio::fs::remove_file(path)
                .await
                .map_err(|e| MsaconfError::write_failure(path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MsaconfError::write_failure(path, e)),
        }
    }
}

#[async_trait]
impl OutputStore for FilesystemStore {
    async fn prepare_dir(&self, dir: &Path) -> MsaconfResult<()> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| MsaconfError::write_failure(dir, e))
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> MsaconfResult<()> {
        Self::clear(path).await?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| MsaconfError::write_failure(path, e))
    }

    #[cfg(unix)]
    async fn link_file(&self, path: &Path, target: &str) -> MsaconfResult<FileKind> {
        Self::clear(path).await?;
        tokio::fs::symlink(target, path)
            .await
            .map_err(|e| MsaconfError::write_failure(path, e))?;
        Ok(FileKind::Link)
    }

    #[cfg(not(unix))]
    async fn link_file(&self, path: &Path, target: &str) -> MsaconfResult<FileKind> {
        let source = path.with_file_name(target);
        Self::clear(path).await?;
        tokio::fs::copy(&source, path)
            .await
            .map_err(|e| MsaconfError::write_failure(path, e))?;
        Ok(FileKind::File)
    }
}
