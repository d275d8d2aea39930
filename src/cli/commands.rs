//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::builder::ProjectType;

/// Build and package npm, Maven and Gradle projects.
///
/// Detects the project type from its marker files, validates the toolchain,
/// runs the build and packages a versioned artifact.
#[derive(Parser, Debug)]
#[command(name = "deployer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (stream build tool output, debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides user and project config files)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a project and package its artifact
    Build(BuildArgs),

    /// Detect which kind of project a directory holds
    Detect(DetectArgs),

    /// Write a deploy.toml tuned to the detected project type
    Init(InitArgs),
}

/// Project type selection for `build`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    /// Use whatever detection finds
    Auto,
    /// npm project
    Npm,
    /// Maven project
    Maven,
    /// Gradle project
    Gradle,
}

impl TypeArg {
    /// The requested project type; `None` for `auto`
    pub fn project_type(self) -> Option<ProjectType> {
        match self {
            TypeArg::Auto => None,
            TypeArg::Npm => Some(ProjectType::Npm),
            TypeArg::Maven => Some(ProjectType::Maven),
            TypeArg::Gradle => Some(ProjectType::Gradle),
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the `build` subcommand
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Project directory (defaults to current directory)
    #[arg(conflicts_with = "path_option")]
    pub path: Option<PathBuf>,

    /// Project directory, given as an option
    #[arg(short = 'p', long = "path", id = "path_option", value_name = "PATH")]
    pub path_option: Option<PathBuf>,

    /// Expected project type
    #[arg(short = 't', long = "type", value_enum, default_value = "auto")]
    pub project_type: TypeArg,

    /// Output directory for the artifact (default: <project>/build)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Artifact version (default: YYYYMMDD-HHMMSS timestamp)
    #[arg(long)]
    pub version: Option<String>,

    /// Skip the test phase of Maven/Gradle builds
    #[arg(long)]
    pub skip_tests: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the `detect` subcommand
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Project directory (defaults to current directory)
    #[arg(conflicts_with = "path_option")]
    pub path: Option<PathBuf>,

    /// Project directory, given as an option
    #[arg(short = 'p', long = "path", id = "path_option", value_name = "PATH")]
    pub path_option: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the `init` subcommand
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project directory (defaults to current directory)
    #[arg(conflicts_with = "path_option")]
    pub path: Option<PathBuf>,

    /// Project directory, given as an option
    #[arg(short = 'p', long = "path", id = "path_option", value_name = "PATH")]
    pub path_option: Option<PathBuf>,

    /// Overwrite an existing deploy.toml
    #[arg(short, long)]
    pub force: bool,
}

/// The project directory from either the positional argument or `--path`
fn project_dir<'a>(
    path: &'a Option<PathBuf>,
    path_option: &'a Option<PathBuf>,
) -> Option<&'a Path> {
    path.as_deref().or(path_option.as_deref())
}

impl BuildArgs {
    /// Project directory, if one was given
    pub fn project_dir(&self) -> Option<&Path> {
        project_dir(&self.path, &self.path_option)
    }
}

impl DetectArgs {
    /// Project directory, if one was given
    pub fn project_dir(&self) -> Option<&Path> {
        project_dir(&self.path, &self.path_option)
    }
}

impl InitArgs {
    /// Project directory, if one was given
    pub fn project_dir(&self) -> Option<&Path> {
        project_dir(&self.path, &self.path_option)
    }
}
