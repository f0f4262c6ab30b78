//! # Archive Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by every mode of the
//! `archive` tool:
//! - `config`: Loading, expanding, and validating the TOML configuration that
//!   names the external tools and extraction defaults.
//! - `error`: The `ArchiveError` enum and the crate-wide `Result` alias.
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ArchiveError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
