//! Configuration model for deployer
//!
//! Mirrors the sections of `deploy.toml`. Every field has a default so a
//! partial file (or none at all) still yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Placeholder project name written by older `init` runs; treated as unset
pub const PLACEHOLDER_PROJECT_NAME: &str = "my-app";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// Project identity
    #[serde(default)]
    pub project: ProjectConfig,

    /// NPM build settings
    #[serde(default)]
    pub npm: NpmConfig,

    /// Maven/Gradle build settings
    #[serde(default)]
    pub java: JavaConfig,

    /// Deployment settings (loaded but not acted on by the build path)
    #[serde(default)]
    pub deploy: DeployConfig,
}

/// Project identity
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProjectConfig {
    /// Artifact base name; empty means "use the directory name"
    #[serde(default)]
    pub name: String,

    /// Declared type: auto, npm, maven or gradle
    #[serde(default = "default_project_type", rename = "type")]
    pub project_type: String,
}

fn default_project_type() -> String {
    "auto".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            project_type: default_project_type(),
        }
    }
}

/// NPM build settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NpmConfig {
    /// Build command; empty means `npm run build`
    #[serde(default)]
    pub build_command: String,

    /// Directory (relative to the project) holding build output
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Dependency install command; empty means `npm ci`
    #[serde(default)]
    pub install_command: String,

    /// Expected Node.js version (advisory only)
    #[serde(default)]
    pub node_version: String,

    /// Node.js executable
    #[serde(default = "default_node_command")]
    pub node_command: String,

    /// npm executable
    #[serde(default = "default_npm_command")]
    pub npm_command: String,
}

fn default_build_dir() -> String {
    "dist".to_string()
}

fn default_node_command() -> String {
    "node".to_string()
}

fn default_npm_command() -> String {
    "npm".to_string()
}

impl Default for NpmConfig {
    fn default() -> Self {
        Self {
            build_command: String::new(),
            build_dir: default_build_dir(),
            install_command: String::new(),
            node_version: String::new(),
            node_command: default_node_command(),
            npm_command: default_npm_command(),
        }
    }
}

/// Maven/Gradle build settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct JavaConfig {
    /// Tool the custom `build_command` is meant for: maven or gradle
    #[serde(default)]
    pub build_tool: String,

    /// Custom build command, applied only when `build_tool` matches
    #[serde(default)]
    pub build_command: String,

    /// Artifact location hint (advisory only)
    #[serde(default)]
    pub artifact_path: String,

    /// Expected Java version (advisory only)
    #[serde(default)]
    pub java_version: String,

    /// Java executable
    #[serde(default = "default_java_command")]
    pub java_command: String,

    /// Maven executable
    #[serde(default = "default_maven_command")]
    pub maven_command: String,

    /// System Gradle executable, used when the project has no wrapper
    #[serde(default = "default_gradle_command")]
    pub gradle_command: String,
}

fn default_java_command() -> String {
    "java".to_string()
}

fn default_maven_command() -> String {
    "mvn".to_string()
}

fn default_gradle_command() -> String {
    "gradle".to_string()
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            build_tool: String::new(),
            build_command: String::new(),
            artifact_path: String::new(),
            java_version: String::new(),
            java_command: default_java_command(),
            maven_command: default_maven_command(),
            gradle_command: default_gradle_command(),
        }
    }
}

impl JavaConfig {
    /// The custom build command, if one is configured for `tool`
    pub fn build_command_for(&self, tool: &str) -> Option<&str> {
        let command = self.build_command.trim();
        if command.is_empty() || !self.build_tool.eq_ignore_ascii_case(tool) {
            return None;
        }
        Some(command)
    }
}

/// Deployment settings
///
/// None of these are consulted while building.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DeployConfig {
    /// Deployment timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Delay before restarting the service, in seconds
    #[serde(default = "default_restart_delay")]
    pub restart_delay: u64,

    /// Health check timeout in seconds
    #[serde(default = "default_health_check_timeout")]
    pub health_check_timeout: u64,

    /// Number of previous artifacts to keep
    #[serde(default = "default_backup_count")]
    pub backup_count: u32,
}

fn default_timeout() -> u64 {
    300
}

fn default_restart_delay() -> u64 {
    10
}

fn default_health_check_timeout() -> u64 {
    60
}

fn default_backup_count() -> u32 {
    5
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            restart_delay: default_restart_delay(),
            health_check_timeout: default_health_check_timeout(),
            backup_count: default_backup_count(),
        }
    }
}

impl Config {
    /// Configured project name, or `None` when unset or still the placeholder
    pub fn project_name(&self) -> Option<&str> {
        let name = self.project.name.trim();
        if name.is_empty() || name == PLACEHOLDER_PROJECT_NAME {
            None
        } else {
            Some(name)
        }
    }
}
