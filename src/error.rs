//! Error types for deployer
//!
//! Provides structured error types with suggestions for common issues.

use serde::Serialize;
use thiserror::Error;

use crate::builder::BuildResult;

/// Main error type for detection and build operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// No marker file matched; callers may fall back to defaults
    #[error("Could not determine project type of {path}")]
    NoProjectDetected { path: String, name: String },

    /// No builder exists for the requested project type
    #[error("Unsupported project type: {0}")]
    UnsupportedProjectType(String),

    /// A required toolchain binary is not installed or not on PATH
    #[error("{tool} is not installed or not in PATH")]
    ToolchainMissing {
        tool: String,
        suggestion: Option<String>,
    },

    /// The manifest/build descriptor is missing from the project
    #[error("{manifest} not found in {path}")]
    ManifestMissing { manifest: String, path: String },

    /// External command exited unsuccessfully
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// Failed to spawn the command
    #[error("Failed to spawn command: {command}")]
    SpawnFailed { command: String, error: String },

    /// Build ran but produced nothing matching the expected artifact pattern
    #[error("No artifact matching {pattern} found in {location}")]
    ArtifactNotFound { location: String, pattern: String },

    /// Configured build output directory does not exist after the build
    #[error("Build output directory not found: {path}")]
    BuildDirMissing { path: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Short machine-readable tag for this error
    pub fn error_type(&self) -> &'static str {
        match self {
            BuildError::NoProjectDetected { .. } => "no_project_detected",
            BuildError::UnsupportedProjectType(_) => "unsupported_project_type",
            BuildError::ToolchainMissing { .. } => "toolchain_missing",
            BuildError::ManifestMissing { .. } => "manifest_missing",
            BuildError::CommandFailed { .. } => "command_failed",
            BuildError::SpawnFailed { .. } => "spawn_failed",
            BuildError::ArtifactNotFound { .. } => "artifact_not_found",
            BuildError::BuildDirMissing { .. } => "build_dir_missing",
            BuildError::Config(_) => "config_error",
            BuildError::Io(_) => "io_error",
        }
    }

    /// Whether the build command itself passed and only artifact lookup failed
    pub fn is_artifact_error(&self) -> bool {
        matches!(
            self,
            BuildError::ArtifactNotFound { .. } | BuildError::BuildDirMissing { .. }
        )
    }
}

/// A failed build: the structured result plus the error that caused it.
///
/// The error is authoritative; the result is always `success == false`
/// with `message` describing the error.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct BuildFailure {
    pub result: BuildResult,
    #[source]
    pub error: BuildError,
}

impl BuildFailure {
    /// Pair an error with a failed result whose message is prefixed by `stage`
    pub fn at_stage(stage: &str, error: BuildError) -> Self {
        Self {
            result: BuildResult::failed(format!("{}: {}", stage, error)),
            error,
        }
    }
}

impl From<BuildError> for BuildFailure {
    fn from(error: BuildError) -> Self {
        Self {
            result: BuildResult::failed(error.to_string()),
            error,
        }
    }
}

/// Serializable error info for JSON output
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl From<&BuildError> for ErrorInfo {
    fn from(err: &BuildError) -> Self {
        let suggestion = match err {
            BuildError::NoProjectDetected { .. } => Some(
                "Add package.json, pom.xml, build.gradle or build.gradle.kts to the project"
                    .to_string(),
            ),
            BuildError::ToolchainMissing { suggestion, .. } => suggestion.clone(),
            BuildError::ManifestMissing { manifest, .. } => {
                Some(format!("Run the build from the directory containing {}", manifest))
            }
            BuildError::CommandFailed { .. } => {
                Some("Re-run with --verbose to see the build tool output".to_string())
            }
            BuildError::SpawnFailed { error, .. } => {
                Some(format!("Check if the command exists: {}", error))
            }
            BuildError::ArtifactNotFound { .. } => Some(
                "The build succeeded but produced no artifact; check the packaging configuration"
                    .to_string(),
            ),
            BuildError::BuildDirMissing { .. } => {
                Some("Check [npm].build_dir in deploy.toml".to_string())
            }
            BuildError::Config(_) => Some("Check your deploy.toml".to_string()),
            BuildError::UnsupportedProjectType(_) | BuildError::Io(_) => None,
        };

        let exit_code = match err {
            BuildError::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        };

        ErrorInfo {
            message: err.to_string(),
            error_type: err.error_type().to_string(),
            suggestion,
            exit_code,
        }
    }
}

/// Install hint for a missing toolchain binary
pub fn install_hint(tool: &str) -> Option<String> {
    let hint = match tool {
        "node" | "npm" => "Install Node.js from https://nodejs.org or via your package manager",
        "java" => "Install a JDK and make sure `java` is on PATH",
        "mvn" => "Install Apache Maven and make sure `mvn` is on PATH",
        "gradle" => "Add a Gradle wrapper (gradlew) to the project or install Gradle",
        _ => return None,
    };
    Some(hint.to_string())
}
