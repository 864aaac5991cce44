//! Subcommand implementations.

pub mod config;
pub mod link;
pub mod list;
