//! Gradle builder implementation
//!
//! Prefers the project's `gradlew` wrapper over a system `gradle`, runs
//! `clean build` and copies the primary jar from `build/libs/`.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use super::artifact::{
    copy_artifact, find_artifacts, resolve_output_dir, resolve_version, select_primary,
    GRADLE_AUX_CLASSIFIERS,
};
use super::detect::{find_gradle_script, ProjectType, GRADLE_MARKERS};
use super::toolchain::{ensure_executable, require_tool};
use super::traits::{BuildOptions, BuildResult, Builder, BuilderResult};
use crate::config::Config;
use crate::error::{BuildError, BuildFailure};
use crate::executor::{first_line, line_containing, run_command, split_command, ExecOptions};

/// Wrapper script name
pub const GRADLE_WRAPPER: &str = "gradlew";

/// Gradle's jar output directory, relative to the project
const LIBS_DIR: &str = "build/libs";

/// Builder for Gradle projects
pub struct GradleBuilder<'a> {
    config: &'a Config,
    options: &'a BuildOptions,
}

impl<'a> GradleBuilder<'a> {
    /// Create a Gradle builder
    pub fn new(config: &'a Config, options: &'a BuildOptions) -> Self {
        Self { config, options }
    }

    fn wrapper_path(&self) -> PathBuf {
        self.options.project_path.join(GRADLE_WRAPPER)
    }

    /// Absolute path of the project wrapper, made executable, if there is one
    ///
    /// The wrapper runs with the project as working directory, so a relative
    /// path would be resolved twice.
    fn wrapper(&self) -> Option<PathBuf> {
        let wrapper = self.wrapper_path();
        if wrapper.is_file() {
            ensure_executable(&wrapper);
            Some(fs::canonicalize(&wrapper).unwrap_or(wrapper))
        } else {
            None
        }
    }

    /// Gradle executable used for the build
    pub fn gradle_program(&self) -> String {
        match self.wrapper() {
            Some(wrapper) => wrapper.to_string_lossy().into_owned(),
            None => self.config.java.gradle_command.clone(),
        }
    }

    /// Gradle tasks to run
    ///
    /// With `java.build_tool = "gradle"`, the words after the first of
    /// `java.build_command` replace the default `clean build [-x test]`.
    pub fn tasks(&self) -> Vec<String> {
        if let Some((_, tasks)) = self
            .config
            .java
            .build_command_for("gradle")
            .and_then(split_command)
        {
            if !tasks.is_empty() {
                return tasks;
            }
        }

        let mut tasks = vec!["clean".to_string(), "build".to_string()];
        if self.options.skip_tests {
            tasks.push("-x".to_string());
            tasks.push("test".to_string());
        }
        tasks
    }

    fn check_java(&self) -> BuilderResult<()> {
        let version = require_tool(&self.config.java.java_command, &["-version"], None)?;
        tracing::info!("Java version: {}", first_line(&version));

        if !self.config.java.java_version.is_empty() {
            tracing::info!("Required Java version: {}", self.config.java.java_version);
        }
        Ok(())
    }

    fn check_gradle(&self) -> BuilderResult<()> {
        if let Some(wrapper) = self.wrapper() {
            let program = wrapper.to_string_lossy();
            let project_dir = self.options.project_path.as_path();
            match require_tool(&program, &["--version"], Some(project_dir)) {
                Ok(output) => {
                    log_gradle_version(&output, "wrapper");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Gradle wrapper unusable, trying system gradle: {}", e);
                }
            }
        }

        let output = require_tool(&self.config.java.gradle_command, &["--version"], None)?;
        log_gradle_version(&output, "system");
        Ok(())
    }

    fn run_build(&self) -> BuilderResult<()> {
        let program = self.gradle_program();
        let tasks = self.tasks();
        let options =
            ExecOptions::in_dir(&self.options.project_path).streaming(self.options.verbose);

        tracing::info!("Running Gradle build");
        let result = run_command(&program, &tasks, &options)?;
        tracing::info!("{} finished in {:?}", result.command, result.duration);
        Ok(())
    }

    fn package(&self, name: &str, version: &str) -> BuilderResult<(PathBuf, Vec<String>, u64)> {
        let candidates = find_artifacts(&self.options.project_path.join(LIBS_DIR), "jar")?;
        let primary = select_primary(&candidates, GRADLE_AUX_CLASSIFIERS).ok_or_else(|| {
            BuildError::ArtifactNotFound {
                location: LIBS_DIR.to_string(),
                pattern: "*.jar".to_string(),
            }
        })?;

        let file_name = format!("{}-{}.jar", name, version);
        let output_dir = resolve_output_dir(&self.options.project_path, &self.options.output_path);
        let artifact_path = output_dir.join(&file_name);

        tracing::info!("Copying {} to {}", primary.display(), artifact_path.display());

        let size = copy_artifact(primary, &artifact_path)?;
        Ok((artifact_path, vec![file_name], size))
    }
}

fn log_gradle_version(output: &str, source: &str) {
    let line = line_containing(output, "Gradle").unwrap_or_else(|| first_line(output));
    tracing::info!("Gradle version ({}): {}", source, line);
}

impl Builder for GradleBuilder<'_> {
    fn project_type(&self) -> ProjectType {
        ProjectType::Gradle
    }

    fn validate(&self) -> BuilderResult<()> {
        self.check_java()?;
        self.check_gradle()?;

        if find_gradle_script(&self.options.project_path).is_none() {
            return Err(BuildError::ManifestMissing {
                manifest: GRADLE_MARKERS.join(" or "),
                path: self.options.project_path.display().to_string(),
            });
        }

        Ok(())
    }

    fn build(&self) -> Result<BuildResult, BuildFailure> {
        let start = Instant::now();
        let name = self.options.artifact_name(self.config);
        let version = resolve_version(&self.options.version);

        tracing::info!("Building Gradle project {}", self.options.project_path.display());

        self.run_build()
            .map_err(|e| BuildFailure::at_stage("Gradle build failed", e))?;

        let (artifact_path, files, size) = self
            .package(&name, &version)
            .map_err(|e| BuildFailure::at_stage("Packaging failed", e))?;

        let duration = start.elapsed();
        tracing::info!(
            "Gradle build finished in {:?}: {} ({} bytes)",
            duration,
            artifact_path.display(),
            size
        );

        Ok(BuildResult::success(artifact_path, version, duration, files, size))
    }
}
