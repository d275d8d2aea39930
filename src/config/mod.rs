//! Configuration module for deployer
//!
//! Provides layered configuration loading from user and project
//! `deploy.toml` files plus `DEPLOYER_*` environment overrides.

pub mod loader;
pub mod model;

pub use loader::{config_paths, load_config, save_config, PROJECT_CONFIG_FILE};
pub use model::*;
