//! Command execution module
//!
//! Provides blocking command execution with:
//! - Explicit working directory per command
//! - Output streaming or discarding
//! - Version probes with captured output

pub mod process;

pub use process::*;
