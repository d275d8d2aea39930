//! Build coordination: detect, pick a builder, validate, build

use super::detect::{detect_project, ProjectType};
use super::gradle::GradleBuilder;
use super::maven::MavenBuilder;
use super::npm::NpmBuilder;
use super::traits::{BuildOptions, BuildResult, Builder};
use crate::config::Config;
use crate::error::{BuildError, BuildFailure};

/// Create the builder for a project type
///
/// # Errors
/// * `BuildError::UnsupportedProjectType` - For `ProjectType::Unknown`
pub fn new_builder<'a>(
    project_type: ProjectType,
    config: &'a Config,
    options: &'a BuildOptions,
) -> Result<Box<dyn Builder + 'a>, BuildError> {
    let builder: Box<dyn Builder + 'a> = match project_type {
        ProjectType::Npm => Box::new(NpmBuilder::new(config, options)),
        ProjectType::Maven => Box::new(MavenBuilder::new(config, options)),
        ProjectType::Gradle => Box::new(GradleBuilder::new(config, options)),
        ProjectType::Unknown => {
            return Err(BuildError::UnsupportedProjectType(
                project_type.name().to_string(),
            ))
        }
    };
    Ok(builder)
}

/// Detect, validate and build the project at `options.project_path`
///
/// Detection always runs, whatever `config.project.type` says. The first
/// failing step ends the build.
pub fn build_project(config: &Config, options: &BuildOptions) -> Result<BuildResult, BuildFailure> {
    let info = detect_project(&options.project_path)?;
    tracing::info!("Detected {} project {}", info.project_type, info.name);

    let builder = new_builder(info.project_type, config, options)?;

    builder.validate()?;
    tracing::debug!("{} toolchain validated", builder.project_type());

    builder.build()
}
