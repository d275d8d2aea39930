//! deployer - build and package npm, Maven and Gradle projects
//!
//! Detects the kind of project in a directory, checks that its toolchain is
//! installed, runs the build and packages the result into a single,
//! versioned artifact:
//! - **npm** - the build directory archived as `<name>-<version>.tar.gz`
//! - **Maven** - the primary jar from `target/` as `<name>-<version>.jar`
//! - **Gradle** - the primary jar from `build/libs/` as `<name>-<version>.jar`
//!
//! ## Features
//!
//! - Marker-file detection (`package.json`, `pom.xml`, `build.gradle[.kts]`)
//! - Toolchain validation with install suggestions
//! - Gradle wrapper preference with system `gradle` fallback
//! - Layered configuration (user file, `deploy.toml`, `DEPLOYER_*` env)
//! - Builds run with an explicit working directory; the process's current
//!   directory is never changed

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;

pub use builder::{
    build_project, detect_project, new_builder, BuildOptions, BuildResult, Builder, ProjectInfo,
    ProjectType,
};
pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{BuildError, BuildFailure, ErrorInfo};
pub use executor::{run_command, ExecOptions, ExecResult};
