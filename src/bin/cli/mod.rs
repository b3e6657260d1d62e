//! CLI Module Organization
//!
//! - args: CLI argument structures and value enums
//! - commands: command handlers
//! - config_layer: configuration file and flag merging
//! - output: terminal tables and summaries

pub mod args;
pub mod commands;
pub mod config_layer;
pub mod output;

pub use args::*;
pub use commands::*;
