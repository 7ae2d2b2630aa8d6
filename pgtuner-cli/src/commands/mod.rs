//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`detect`] - Host hardware detection
//! - [`tune`] - Derive and print settings for a profile

pub mod common;
pub mod config;
pub mod detect;
pub mod tune;
