//! Synchronous command execution with an explicit working directory
//!
//! Every child process gets its working directory through
//! [`ExecOptions::working_dir`]; the current directory of this process is
//! never changed.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::BuildError;

/// Options for command execution
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Working directory for the command
    pub working_dir: Option<PathBuf>,
    /// Inherit stdout/stderr instead of discarding them
    pub stream_output: bool,
}

impl ExecOptions {
    /// Create options with a working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Stream child output to this process' stdout/stderr
    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream_output = stream;
        self
    }
}

/// Result of a successful command execution
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// Full command line that was executed
    pub command: String,
    /// Duration of execution
    pub duration: Duration,
}

/// Render a program and its arguments as a single command line
pub fn command_line<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg.as_ref());
    }
    line
}

/// Split a configured command string on whitespace into program and arguments
///
/// Returns `None` for a blank string.
pub fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Run a command to completion
///
/// # Errors
/// * `BuildError::SpawnFailed` - If the command couldn't be spawned
/// * `BuildError::CommandFailed` - If the command exited unsuccessfully
pub fn run_command<S: AsRef<str>>(
    program: &str,
    args: &[S],
    options: &ExecOptions,
) -> Result<ExecResult, BuildError> {
    let start = Instant::now();
    let command_str = command_line(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(AsRef::as_ref));

    if let Some(ref dir) = options.working_dir {
        cmd.current_dir(dir);
    }

    if options.stream_output {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
    }

    tracing::debug!("Executing: {}", command_str);

    let status = cmd.status().map_err(|e| BuildError::SpawnFailed {
        command: command_str.clone(),
        error: e.to_string(),
    })?;

    if !status.success() {
        return Err(BuildError::CommandFailed {
            command: command_str,
            exit_code: status.code(),
        });
    }

    Ok(ExecResult {
        command: command_str,
        duration: start.elapsed(),
    })
}

/// Run a version probe and return its captured output
///
/// Some tools (`java -version`) print to stderr, so both streams are
/// captured, stdout first.
pub fn probe_version(
    program: &str,
    args: &[&str],
    working_dir: Option<&Path>,
) -> Result<String, BuildError> {
    let command_str = command_line(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    tracing::debug!("Probing: {}", command_str);

    let output = cmd.output().map_err(|e| BuildError::SpawnFailed {
        command: command_str.clone(),
        error: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(BuildError::CommandFailed {
            command: command_str,
            exit_code: output.status.code(),
        });
    }

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text)
}

/// First non-empty line of probe output
pub fn first_line(output: &str) -> &str {
    output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
}

/// Find the first output line of a probe containing `needle`
pub fn line_containing<'a>(output: &'a str, needle: &str) -> Option<&'a str> {
    output.lines().map(str::trim).find(|l| l.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_options_default() {
        let options = ExecOptions::default();

        assert!(options.working_dir.is_none());
        assert!(!options.stream_output);
    }

    #[test]
    fn test_exec_options_builder() {
        let options = ExecOptions::in_dir("/tmp").streaming(true);

        assert_eq!(options.working_dir, Some(PathBuf::from("/tmp")));
        assert!(options.stream_output);
    }

    #[test]
    fn test_split_command() {
        let (program, args) = split_command("mvn clean  package -DskipTests").unwrap();
        assert_eq!(program, "mvn");
        assert_eq!(args, vec!["clean", "package", "-DskipTests"]);

        assert!(split_command("   ").is_none());
    }

    #[test]
    fn test_command_line() {
        assert_eq!(command_line("npm", &["run", "build"]), "npm run build");
        assert_eq!(command_line::<&str>("true", &[]), "true");
    }

    #[test]
    fn test_run_command_success() {
        match run_command("true", &[] as &[&str], &ExecOptions::default()) {
            Ok(res) => assert_eq!(res.command, "true"),
            Err(BuildError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: true not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_run_command_failure_keeps_command_line() {
        let result = run_command("sh", &["-c", "exit 3"], &ExecOptions::default());

        match result {
            Err(BuildError::CommandFailed { command, exit_code }) => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(exit_code, Some(3));
            }
            Err(BuildError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sh not available");
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_run_command_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = ExecOptions::in_dir(dir.path());

        let result = run_command("sh", &["-c", "touch marker"], &options);

        match result {
            Ok(_) => assert!(dir.path().join("marker").exists()),
            Err(BuildError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sh not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_run_command_spawn_failed() {
        let result = run_command(
            "nonexistent_command_12345",
            &["--version"],
            &ExecOptions::default(),
        );

        match result {
            Err(BuildError::SpawnFailed { command, .. }) => {
                assert_eq!(command, "nonexistent_command_12345 --version");
            }
            other => panic!("Expected SpawnFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_version_output_reads_stderr() {
        let result = probe_version("sh", &["-c", "echo 'openjdk 17' 1>&2"], None);

        match result {
            Ok(output) => assert_eq!(first_line(&output), "openjdk 17"),
            Err(BuildError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sh not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_version_output_prefers_stdout() {
        let result = probe_version("sh", &["-c", "echo v20.1.0; echo noise 1>&2"], None);

        match result {
            Ok(output) => assert_eq!(first_line(&output), "v20.1.0"),
            Err(BuildError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sh not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_first_line_skips_blank() {
        assert_eq!(first_line("\n\n  OpenJDK 21  \nmore"), "OpenJDK 21");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_line_containing() {
        let output = "\n------\nGradle 8.5\n------\nKotlin: 1.9";
        assert_eq!(line_containing(output, "Gradle"), Some("Gradle 8.5"));
        assert_eq!(line_containing(output, "Groovy"), None);
    }
}
