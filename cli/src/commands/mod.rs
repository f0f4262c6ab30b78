//! # Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `archive` has no subcommands: the flags given on the command line choose
//! between archiving, extracting and in-place compression of the listed
//! sources. This module holds the argument structure for those flags and the
//! handler that runs the chosen mode over every source.
//!

/// Argument parsing and mode dispatch for `archive [-e | --fs-compress] SOURCE...`.
pub mod toggle;
