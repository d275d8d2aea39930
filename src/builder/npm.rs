//! npm builder implementation
//!
//! Installs dependencies, runs the build script and archives the build
//! output directory as `<name>-<version>.tar.gz`.

use std::path::PathBuf;
use std::time::Instant;

use super::artifact::{package_directory, resolve_output_dir, resolve_version};
use super::detect::{ProjectType, NPM_MARKER};
use super::toolchain::require_tool;
use super::traits::{BuildOptions, BuildResult, Builder, BuilderResult};
use crate::config::Config;
use crate::error::{BuildError, BuildFailure};
use crate::executor::{first_line, run_command, split_command, ExecOptions};

/// Builder for Node.js projects
pub struct NpmBuilder<'a> {
    config: &'a Config,
    options: &'a BuildOptions,
}

impl<'a> NpmBuilder<'a> {
    /// Create an npm builder
    pub fn new(config: &'a Config, options: &'a BuildOptions) -> Self {
        Self { config, options }
    }

    /// Dependency install command line
    pub fn install_command(&self) -> String {
        let configured = self.config.npm.install_command.trim();
        if configured.is_empty() {
            format!("{} ci", self.config.npm.npm_command)
        } else {
            configured.to_string()
        }
    }

    /// Build command line
    pub fn build_command(&self) -> String {
        let configured = self.config.npm.build_command.trim();
        if configured.is_empty() {
            format!("{} run build", self.config.npm.npm_command)
        } else {
            configured.to_string()
        }
    }

    /// Directory holding the build output
    pub fn build_dir(&self) -> PathBuf {
        let build_dir = self.config.npm.build_dir.trim();
        let build_dir = if build_dir.is_empty() { "dist" } else { build_dir };
        self.options.project_path.join(build_dir)
    }

    fn exec_options(&self) -> ExecOptions {
        ExecOptions::in_dir(&self.options.project_path).streaming(self.options.verbose)
    }

    fn run_configured(&self, command: &str) -> BuilderResult<()> {
        let (program, args) = split_command(command)
            .ok_or_else(|| BuildError::Config("empty npm command".to_string()))?;
        let result = run_command(&program, &args, &self.exec_options())?;
        tracing::debug!("{} finished in {:?}", result.command, result.duration);
        Ok(())
    }

    fn check_node(&self) -> BuilderResult<()> {
        let version = require_tool(&self.config.npm.node_command, &["--version"], None)?;
        tracing::info!("Node.js version: {}", first_line(&version));

        if !self.config.npm.node_version.is_empty() {
            tracing::info!("Required Node.js version: {}", self.config.npm.node_version);
        }
        Ok(())
    }

    fn check_npm(&self) -> BuilderResult<()> {
        let version = require_tool(&self.config.npm.npm_command, &["--version"], None)?;
        tracing::info!("npm version: {}", first_line(&version));
        Ok(())
    }

    fn package(&self, name: &str, version: &str) -> BuilderResult<(PathBuf, Vec<String>, u64)> {
        let build_dir = self.build_dir();
        if !build_dir.is_dir() {
            return Err(BuildError::BuildDirMissing {
                path: build_dir.display().to_string(),
            });
        }

        let output_dir = resolve_output_dir(&self.options.project_path, &self.options.output_path);
        let artifact_path = output_dir.join(format!("{}-{}.tar.gz", name, version));

        tracing::info!("Packaging {} into {}", build_dir.display(), artifact_path.display());

        let (files, size) = package_directory(&build_dir, &artifact_path)?;
        Ok((artifact_path, files, size))
    }
}

impl Builder for NpmBuilder<'_> {
    fn project_type(&self) -> ProjectType {
        ProjectType::Npm
    }

    fn validate(&self) -> BuilderResult<()> {
        self.check_node()?;
        self.check_npm()?;

        let manifest = self.options.project_path.join(NPM_MARKER);
        if !manifest.exists() {
            return Err(BuildError::ManifestMissing {
                manifest: NPM_MARKER.to_string(),
                path: self.options.project_path.display().to_string(),
            });
        }

        Ok(())
    }

    fn build(&self) -> Result<BuildResult, BuildFailure> {
        let start = Instant::now();
        let name = self.options.artifact_name(self.config);
        let version = resolve_version(&self.options.version);

        tracing::info!("Building npm project {}", self.options.project_path.display());

        let install = self.install_command();
        tracing::info!("Installing dependencies: {}", install);
        self.run_configured(&install)
            .map_err(|e| BuildFailure::at_stage("Dependency install failed", e))?;

        let build = self.build_command();
        tracing::info!("Running build: {}", build);
        self.run_configured(&build)
            .map_err(|e| BuildFailure::at_stage("Build failed", e))?;

        let (artifact_path, files, size) = self
            .package(&name, &version)
            .map_err(|e| BuildFailure::at_stage("Packaging failed", e))?;

        let duration = start.elapsed();
        tracing::info!(
            "npm build finished in {:?}: {} ({} bytes)",
            duration,
            artifact_path.display(),
            size
        );

        Ok(BuildResult::success(artifact_path, version, duration, files, size))
    }
}
