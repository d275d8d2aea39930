//! deployer CLI entry point
//!
//! Usage:
//!   deployer build [PATH | -p PATH]     Build and package a project
//!   deployer detect [PATH | -p PATH]    Detect the project type
//!   deployer init [PATH | -p PATH]      Write a deploy.toml for the project

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use humansize::{format_size, DECIMAL};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deployer::builder::{
    build_project, detect_project, scan_markers, BuildOptions, BuildResult, ProjectInfo,
    ProjectType,
};
use deployer::cli::{
    commands::{BuildArgs, DetectArgs, InitArgs, OutputFormat},
    Cli, Commands,
};
use deployer::config::{load_config, save_config, Config, PROJECT_CONFIG_FILE};
use deployer::error::{BuildError, ErrorInfo};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber; RUST_LOG wins over `--verbose`
fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::from_default_env();

    if std::env::var("RUST_LOG").is_err() {
        let level = if verbose { "debug" } else { "info" };
        if let Ok(directive) = format!("deployer={}", level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build(args) => build(args, cli.config.as_deref(), cli.verbose),
        Commands::Detect(args) => detect(args),
        Commands::Init(args) => init(args),
    }
}

/// Build a project and report the artifact
fn build(args: BuildArgs, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let project_path = resolve_project_dir(args.project_dir(), &cwd)?;
    let config = load_config(&project_path, config_path)?;

    if let Some(requested) = args.project_type.project_type() {
        check_requested_type(&project_path, requested)?;
    }

    let mut options = BuildOptions::for_project(&project_path)
        .with_version(args.version.unwrap_or_default())
        .skipping_tests(args.skip_tests)
        .verbose(verbose);
    if let Some(output) = args.output {
        options = options.with_output(output);
    }

    match build_project(&config, &options) {
        Ok(result) => {
            print_build_result(&result, args.format)?;
            Ok(())
        }
        Err(failure) => {
            let info = ErrorInfo::from(&failure.error);
            match args.format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&serde_json::json!({
                        "result": failure.result,
                        "error": info,
                    }))?;
                    println!("{}", json);
                }
                OutputFormat::Table => {
                    if let Some(ref suggestion) = info.suggestion {
                        eprintln!("{}: {}", "hint".yellow(), suggestion);
                    }
                }
            }
            anyhow::bail!("{}", failure.result.message)
        }
    }
}

/// Reject an explicit `--type` that detection contradicts
fn check_requested_type(project_path: &Path, requested: ProjectType) -> Result<()> {
    match detect_project(project_path) {
        Ok(info) if info.project_type != requested => anyhow::bail!(
            "Requested a {} build but {} looks like a {} project",
            requested,
            project_path.display(),
            info.project_type
        ),
        Ok(_) => Ok(()),
        Err(BuildError::NoProjectDetected { .. }) => anyhow::bail!(
            "Requested a {} build but no {} project was found in {}",
            requested,
            requested,
            project_path.display()
        ),
        Err(e) => Err(e.into()),
    }
}

fn print_build_result(result: &BuildResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Table => {
            println!("{}", result.message.green().bold());
            if let Some(ref path) = result.artifact_path {
                println!("{}: {}", "Artifact".cyan(), path.display());
            }
            println!("{}: {}", "Version".cyan(), result.version);
            println!("{}: {}", "Size".cyan(), format_size(result.size, DECIMAL));
            println!(
                "{}: {:.2}s",
                "Duration".cyan(),
                result.duration_ms as f64 / 1000.0
            );
            println!("{}: {}", "Files".cyan(), result.files.len());
        }
    }
    Ok(())
}

/// Detect the project type and print what was found
fn detect(args: DetectArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let project_path = resolve_project_dir(args.project_dir(), &cwd)?;

    let markers = scan_markers(&project_path);
    let info = match detect_project(&project_path) {
        Ok(info) => info,
        Err(BuildError::NoProjectDetected { .. }) => ProjectInfo::unknown(&project_path),
        Err(e) => return Err(e.into()),
    };

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "path": project_path.display().to_string(),
                "project": info,
                "markers": markers,
                "available": markers.available(),
            }))?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}: {}", "Path".cyan(), project_path.display());
            println!();

            if info.project_type == ProjectType::Unknown {
                println!("{}: {}", "Detected".yellow(), "None");
            } else {
                println!("{}: {}", "Detected".green(), info.project_type);
                println!("{}: {}", "Name".cyan(), info.name);
                println!("{}: {}", "Build Command".cyan(), info.build_command);
                println!("{}: {}", "Artifacts".cyan(), info.artifact_path);
            }

            println!();
            println!("{}:", "Files Found".cyan());
            if markers.package_json {
                println!("  - package.json");
            }
            if markers.pom_xml {
                println!("  - pom.xml");
            }
            if let Some(ref script) = markers.gradle_script {
                println!("  - {}", script);
            }
            if markers.available().is_empty() {
                println!("  None");
            }

            if info.project_type != ProjectType::Unknown {
                println!();
                println!(
                    "{}: deployer build {} --type={}",
                    "Suggested".cyan(),
                    project_path.display(),
                    info.project_type
                );
            }
        }
    }

    if info.project_type == ProjectType::Unknown {
        anyhow::bail!(
            "Could not determine project type of {}",
            project_path.display()
        );
    }

    Ok(())
}

/// Write a deploy.toml tuned to the detected project type
fn init(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let project_path = resolve_project_dir(args.project_dir(), &cwd)?;
    let target = project_path.join(PROJECT_CONFIG_FILE);

    if target.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            target.display()
        );
    }

    let config = match detect_project(&project_path) {
        Ok(info) => initial_config(&info),
        Err(BuildError::NoProjectDetected { name, .. }) => {
            tracing::warn!("No project detected, writing defaults");
            let mut config = Config::default();
            config.project.name = name;
            config
        }
        Err(e) => return Err(e.into()),
    };

    save_config(&config, &target)?;
    println!("{}: {}", "Created".green(), target.display());

    Ok(())
}

/// Default configuration for a freshly detected project
fn initial_config(info: &ProjectInfo) -> Config {
    let mut config = Config::default();
    config.project.name = info.name.clone();
    config.project.project_type = info.project_type.name().to_string();

    match info.project_type {
        ProjectType::Gradle => {
            config.java.build_tool = "gradle".to_string();
            config.java.build_command = "./gradlew clean build".to_string();
        }
        ProjectType::Maven => {
            config.java.build_tool = "maven".to_string();
        }
        ProjectType::Npm | ProjectType::Unknown => {}
    }

    config
}

/// Absolute path of the project directory, which must exist
fn resolve_project_dir(path: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let path = cwd.join(path.unwrap_or_else(|| Path::new(".")));
    let resolved = path
        .canonicalize()
        .with_context(|| format!("Project directory not found: {}", path.display()))?;

    if !resolved.is_dir() {
        anyhow::bail!("Not a directory: {}", resolved.display());
    }

    Ok(resolved)
}
