//! CLI module for deployer
//!
//! Provides command-line interface with the following subcommands:
//! - `build` - Build a project and package its artifact
//! - `detect` - Detect the project type
//! - `init` - Write a project `deploy.toml`

pub mod commands;

pub use commands::{Cli, Commands};
