// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 msaconf contributors

//! Utility modules
//!
//! Common utilities for the msaconf CLI.

pub mod colors;

pub use colors::*;
