//! Project type auto-detection
//!
//! Classifies a project by the presence of its marker file:
//! - `package.json` (npm)
//! - `pom.xml` (maven)
//! - `build.gradle` or `build.gradle.kts` (gradle)
//!
//! Manifests are never parsed. When several markers coexist the first in the
//! order above wins.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use super::traits::project_name_from_path;
use crate::error::BuildError;

/// npm manifest
pub const NPM_MARKER: &str = "package.json";
/// Maven project object model
pub const MAVEN_MARKER: &str = "pom.xml";
/// Gradle build scripts (Groovy, Kotlin DSL)
pub const GRADLE_MARKERS: [&str; 2] = ["build.gradle", "build.gradle.kts"];

/// Type of project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Node.js project built with npm
    Npm,
    /// Java project built with Maven
    Maven,
    /// Java/Kotlin project built with Gradle
    Gradle,
    /// No marker file found
    Unknown,
}

impl ProjectType {
    /// Get the display name for this project type
    pub fn name(&self) -> &'static str {
        match self {
            ProjectType::Npm => "npm",
            ProjectType::Maven => "maven",
            ProjectType::Gradle => "gradle",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectType {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(ProjectType::Npm),
            "maven" => Ok(ProjectType::Maven),
            "gradle" => Ok(ProjectType::Gradle),
            other => Err(BuildError::UnsupportedProjectType(other.to_string())),
        }
    }
}

/// Information about a detected project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    /// Detected project type
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Directory base name
    pub name: String,
    /// Conventional build command for this type
    pub build_command: String,
    /// Conventional artifact location for this type
    pub artifact_path: String,
}

impl ProjectInfo {
    fn new(project_type: ProjectType, dir: &Path, build_command: &str, artifact_path: &str) -> Self {
        Self {
            project_type,
            name: project_name_from_path(dir),
            build_command: build_command.to_string(),
            artifact_path: artifact_path.to_string(),
        }
    }

    /// Info for a directory with no recognized markers
    pub fn unknown(dir: &Path) -> Self {
        Self::new(ProjectType::Unknown, dir, "", "")
    }
}

/// Marker files found during detection
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MarkersFound {
    /// Whether `package.json` exists
    pub package_json: bool,
    /// Whether `pom.xml` exists
    pub pom_xml: bool,
    /// Gradle build script found, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradle_script: Option<String>,
}

impl MarkersFound {
    /// Project types whose marker is present, in detection priority order
    pub fn available(&self) -> Vec<ProjectType> {
        let mut types = Vec::new();
        if self.package_json {
            types.push(ProjectType::Npm);
        }
        if self.pom_xml {
            types.push(ProjectType::Maven);
        }
        if self.gradle_script.is_some() {
            types.push(ProjectType::Gradle);
        }
        types
    }
}

/// Detect the project type of a directory
///
/// An empty path means the current directory.
///
/// # Errors
/// * `BuildError::NoProjectDetected` - No marker file present. This is
///   recoverable: the error carries the inferred name, and
///   [`ProjectInfo::unknown`] provides the fallback info.
pub fn detect_project(dir: &Path) -> Result<ProjectInfo, BuildError> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    if is_npm_project(dir) {
        return Ok(ProjectInfo::new(
            ProjectType::Npm,
            dir,
            "npm run build",
            "dist",
        ));
    }

    if is_maven_project(dir) {
        return Ok(ProjectInfo::new(
            ProjectType::Maven,
            dir,
            "mvn clean package -DskipTests",
            "target/*.jar",
        ));
    }

    if is_gradle_project(dir) {
        return Ok(ProjectInfo::new(
            ProjectType::Gradle,
            dir,
            "./gradlew build",
            "build/libs/*.jar",
        ));
    }

    tracing::debug!("No project markers found in {}", dir.display());

    Err(BuildError::NoProjectDetected {
        path: dir.display().to_string(),
        name: project_name_from_path(dir),
    })
}

/// Check for every marker file independently
pub fn scan_markers(dir: &Path) -> MarkersFound {
    MarkersFound {
        package_json: is_npm_project(dir),
        pom_xml: is_maven_project(dir),
        gradle_script: find_gradle_script(dir)
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned())),
    }
}

/// Whether the directory contains `package.json`
pub fn is_npm_project(dir: &Path) -> bool {
    dir.join(NPM_MARKER).exists()
}

/// Whether the directory contains `pom.xml`
pub fn is_maven_project(dir: &Path) -> bool {
    dir.join(MAVEN_MARKER).exists()
}

/// Whether the directory contains a Gradle build script
pub fn is_gradle_project(dir: &Path) -> bool {
    find_gradle_script(dir).is_some()
}

/// Find the Gradle build script, preferring the Groovy one
pub fn find_gradle_script(dir: &Path) -> Option<PathBuf> {
    GRADLE_MARKERS
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}
