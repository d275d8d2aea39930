//! Common traits and types for project builders
//!
//! Defines the interface that all builders (npm, maven, gradle) implement.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use super::detect::ProjectType;
use crate::config::Config;
use crate::error::{BuildError, BuildFailure};

/// Result type for builder operations
pub type BuilderResult<T> = Result<T, BuildError>;

/// Options for a single build
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Absolute path of the project directory
    pub project_path: PathBuf,
    /// Output directory; empty means `build` inside the project
    pub output_path: PathBuf,
    /// Artifact version; empty means a timestamp
    pub version: String,
    /// Stream build tool output
    pub verbose: bool,
    /// Skip the test phase of the build tool
    pub skip_tests: bool,
}

impl BuildOptions {
    /// Create build options for a project directory
    pub fn for_project(path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: path.into(),
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output_path = output.into();
        self
    }

    /// Set an explicit version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Skip tests during the build
    pub fn skipping_tests(mut self, skip: bool) -> Self {
        self.skip_tests = skip;
        self
    }

    /// Stream build tool output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Base name for produced artifacts
    ///
    /// The configured project name wins; otherwise the project directory's
    /// base name is used.
    pub fn artifact_name(&self, config: &Config) -> String {
        config
            .project_name()
            .map(str::to_string)
            .unwrap_or_else(|| project_name_from_path(&self.project_path))
    }
}

/// Infer a project name from its directory
///
/// An empty path or `.` resolves through the current directory.
pub fn project_name_from_path(path: &Path) -> String {
    if path.as_os_str().is_empty() || path == Path::new(".") {
        return std::env::current_dir()
            .ok()
            .and_then(|d| d.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_string());
    }

    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Result of a build
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BuildResult {
    /// Whether the build and packaging succeeded
    pub success: bool,
    /// Path of the produced artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<PathBuf>,
    /// Version embedded in the artifact name
    pub version: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Packaged files, relative to the packaged root
    pub files: Vec<String>,
    /// Artifact size in bytes
    pub size: u64,
    /// Human readable summary
    pub message: String,
}

impl BuildResult {
    /// Create a successful result
    pub fn success(
        artifact_path: PathBuf,
        version: impl Into<String>,
        duration: Duration,
        files: Vec<String>,
        size: u64,
    ) -> Self {
        Self {
            success: true,
            artifact_path: Some(artifact_path),
            version: version.into(),
            duration_ms: duration.as_millis() as u64,
            files,
            size,
            message: "Build succeeded".to_string(),
        }
    }

    /// Create a failed result
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Trait for project builders
///
/// Each builder (npm, maven, gradle) implements this trait. Builders are
/// constructed from an immutable configuration and build options and hold
/// no other state.
pub trait Builder {
    /// Project type this builder handles
    fn project_type(&self) -> ProjectType;

    /// Check that the toolchain and manifest are present
    ///
    /// # Errors
    /// * `BuildError::ToolchainMissing` - A required binary is missing or broken
    /// * `BuildError::ManifestMissing` - The project descriptor is absent
    fn validate(&self) -> BuilderResult<()>;

    /// Run the build and package its artifact
    ///
    /// # Errors
    /// Any failure returns a [`BuildFailure`] whose result has
    /// `success == false` and a populated message.
    fn build(&self) -> Result<BuildResult, BuildFailure>;
}
