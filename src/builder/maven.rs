//! Maven builder implementation
//!
//! Runs `mvn clean package` and copies the primary jar from `target/` to
//! `<name>-<version>.jar`.

use std::path::PathBuf;
use std::time::Instant;

use super::artifact::{
    copy_artifact, find_artifacts, resolve_output_dir, resolve_version, select_primary,
    MAVEN_AUX_CLASSIFIERS,
};
use super::detect::{ProjectType, MAVEN_MARKER};
use super::toolchain::require_tool;
use super::traits::{BuildOptions, BuildResult, Builder, BuilderResult};
use crate::config::Config;
use crate::error::{BuildError, BuildFailure};
use crate::executor::{first_line, run_command, split_command, ExecOptions};

/// Maven output directory, relative to the project
const TARGET_DIR: &str = "target";

/// Builder for Maven projects
pub struct MavenBuilder<'a> {
    config: &'a Config,
    options: &'a BuildOptions,
}

impl<'a> MavenBuilder<'a> {
    /// Create a Maven builder
    pub fn new(config: &'a Config, options: &'a BuildOptions) -> Self {
        Self { config, options }
    }

    /// Program and arguments of the build command
    ///
    /// A `java.build_command` configured for maven replaces the default
    /// `mvn clean package [-DskipTests]` entirely.
    pub fn build_command(&self) -> (String, Vec<String>) {
        if let Some(parsed) = self
            .config
            .java
            .build_command_for("maven")
            .and_then(split_command)
        {
            return parsed;
        }

        let mut args = vec!["clean".to_string(), "package".to_string()];
        if self.options.skip_tests {
            args.push("-DskipTests".to_string());
        }
        (self.config.java.maven_command.clone(), args)
    }

    fn check_java(&self) -> BuilderResult<()> {
        let version = require_tool(&self.config.java.java_command, &["-version"], None)?;
        tracing::info!("Java version: {}", first_line(&version));

        if !self.config.java.java_version.is_empty() {
            tracing::info!("Required Java version: {}", self.config.java.java_version);
        }
        Ok(())
    }

    fn check_maven(&self) -> BuilderResult<()> {
        let version = require_tool(&self.config.java.maven_command, &["--version"], None)?;
        tracing::info!("Maven version: {}", first_line(&version));
        Ok(())
    }

    fn run_build(&self) -> BuilderResult<()> {
        let (program, args) = self.build_command();
        let options =
            ExecOptions::in_dir(&self.options.project_path).streaming(self.options.verbose);

        tracing::info!("Running Maven build");
        let result = run_command(&program, &args, &options)?;
        tracing::info!("{} finished in {:?}", result.command, result.duration);
        Ok(())
    }

    fn package(&self, name: &str, version: &str) -> BuilderResult<(PathBuf, Vec<String>, u64)> {
        let candidates = find_artifacts(&self.options.project_path.join(TARGET_DIR), "jar")?;
        let primary = select_primary(&candidates, MAVEN_AUX_CLASSIFIERS).ok_or_else(|| {
            BuildError::ArtifactNotFound {
                location: TARGET_DIR.to_string(),
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

impl Builder for MavenBuilder<'_> {
    fn project_type(&self) -> ProjectType {
        ProjectType::Maven
    }

    fn validate(&self) -> BuilderResult<()> {
        self.check_java()?;
        self.check_maven()?;

        let pom = self.options.project_path.join(MAVEN_MARKER);
        if !pom.exists() {
            return Err(BuildError::ManifestMissing {
                manifest: MAVEN_MARKER.to_string(),
                path: self.options.project_path.display().to_string(),
            });
        }

        Ok(())
    }

    fn build(&self) -> Result<BuildResult, BuildFailure> {
        let start = Instant::now();
        let name = self.options.artifact_name(self.config);
        let version = resolve_version(&self.options.version);

        tracing::info!("Building Maven project {}", self.options.project_path.display());

        self.run_build()
            .map_err(|e| BuildFailure::at_stage("Maven build failed", e))?;

        let (artifact_path, files, size) = self
            .package(&name, &version)
            .map_err(|e| BuildFailure::at_stage("Packaging failed", e))?;

        let duration = start.elapsed();
        tracing::info!(
            "Maven build finished in {:?}: {} ({} bytes)",
            duration,
            artifact_path.display(),
            size
        );

        Ok(BuildResult::success(artifact_path, version, duration, files, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn stub_config() -> Config {
        let mut config = Config::default();
        config.java.java_command = "true".to_string();
        config.java.maven_command = "true".to_string();
        config
    }

    fn maven_project(jars: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
        fs::create_dir_all(dir.path().join("target")).unwrap();
        for jar in jars {
            fs::write(dir.path().join("target").join(jar), jar.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn test_default_build_command() {
        let config = Config::default();
        let options = BuildOptions::for_project("/srv/api");

        let (program, args) = MavenBuilder::new(&config, &options).build_command();

        assert_eq!(program, "mvn");
        assert_eq!(args, vec!["clean", "package"]);
    }

    #[test]
    fn test_skip_tests_build_command() {
        let config = Config::default();
        let options = BuildOptions::for_project("/srv/api").skipping_tests(true);

        let (_, args) = MavenBuilder::new(&config, &options).build_command();

        assert_eq!(args, vec!["clean", "package", "-DskipTests"]);
    }

    #[test]
    fn test_custom_command_requires_matching_tool() {
        let mut config = Config::default();
        config.java.build_command = "mvn -B verify".to_string();
        let options = BuildOptions::for_project("/srv/api");

        config.java.build_tool = "gradle".to_string();
        let (_, args) = MavenBuilder::new(&config, &options).build_command();
        assert_eq!(args, vec!["clean", "package"]);

        config.java.build_tool = "maven".to_string();
        let (program, args) = MavenBuilder::new(&config, &options).build_command();
        assert_eq!(program, "mvn");
        assert_eq!(args, vec!["-B", "verify"]);
    }

    #[test]
    fn test_validate_missing_maven() {
        let dir = maven_project(&[]);
        let mut config = stub_config();
        config.java.maven_command = "nonexistent_mvn_12345".to_string();
        let options = BuildOptions::for_project(dir.path());

        let err = MavenBuilder::new(&config, &options).validate().unwrap_err();

        match err {
            BuildError::ToolchainMissing { tool, .. } => assert_eq!(tool, "nonexistent_mvn_12345"),
            other => panic!("Expected ToolchainMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_missing_pom() {
        let dir = TempDir::new().unwrap();
        let config = stub_config();
        let options = BuildOptions::for_project(dir.path());

        let err = MavenBuilder::new(&config, &options).validate().unwrap_err();

        assert!(matches!(err, BuildError::ManifestMissing { .. }));
    }

    #[test]
    fn test_build_selects_primary_jar() {
        let dir = maven_project(&["app-sources.jar", "app-tests.jar", "app.jar"]);
        let mut config = stub_config();
        config.project.name = "orders".to_string();
        let options = BuildOptions::for_project(dir.path()).with_version("1.0.0");

        let result = MavenBuilder::new(&config, &options).build().unwrap();

        let artifact = dir.path().join("build/orders-1.0.0.jar");
        assert!(result.success);
        assert_eq!(result.artifact_path, Some(artifact.clone()));
        assert_eq!(result.files, vec!["orders-1.0.0.jar"]);
        assert_eq!(fs::read_to_string(&artifact).unwrap(), "app.jar");
        assert_eq!(result.size, "app.jar".len() as u64);
    }

    #[test]
    fn test_build_without_jars_is_artifact_error() {
        let dir = maven_project(&[]);
        let config = stub_config();
        let options = BuildOptions::for_project(dir.path());

        let failure = MavenBuilder::new(&config, &options).build().unwrap_err();

        assert!(matches!(failure.error, BuildError::ArtifactNotFound { .. }));
        assert!(!failure.result.success);
        assert!(failure.result.message.starts_with("Packaging failed"));
    }
}
