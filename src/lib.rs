// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! # msaconf - per-MSA configuration generator
//!
//! `msaconf` turns one versions document into the configuration files a
//! deployment tool consumes: a shared `default_values` file and one file for
//! every MSA (micro-service application unit), with that MSA's overrides
//! applied.
//!
//! ## Features
//!
//! - **Ordered resolution** - component defaults flatten in document order, MSA overrides win
//! - **Closed service set** - overrides change tags but never add services
//! - **Override trace** - every applied or ignored override is reported
//! - **Deduplicated output** - unchanged MSAs can link to the shared file
//!
//! ## Quick Start
//!
//! ```bash
//! # Write default_values.yaml plus one file per MSA
//! msaconf generate versions.yaml deploy/values
//!
//! # Inspect one MSA with its overrides
//! msaconf show versions.yaml --msa alpha --trace
//!
//! # Check a document
//! msaconf validate versions.yaml
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod generator;
pub mod output;
pub mod resolver;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use document::VersionDocument;
pub use errors::{MsaconfError, MsaconfResult};
pub use generator::{GenerationTarget, Generator};
pub use resolver::{build_defaults, Resolution, ResolvedConfig, Resolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
