//! Toolchain discovery shared by the builders

use std::path::Path;

use crate::error::{install_hint, BuildError};
use crate::executor::probe_version;

/// Require `program` to be on PATH (or an executable path) and answer its
/// version probe. Returns the captured probe output.
///
/// # Errors
/// * `BuildError::ToolchainMissing` - Not found, or the probe failed
pub fn require_tool(
    program: &str,
    version_args: &[&str],
    working_dir: Option<&Path>,
) -> Result<String, BuildError> {
    let missing = || BuildError::ToolchainMissing {
        tool: program.to_string(),
        suggestion: install_hint(tool_basename(program)),
    };

    let resolved = which::which(program).map_err(|e| {
        tracing::debug!("{} not found: {}", program, e);
        missing()
    })?;

    tracing::debug!("Resolved {} to {}", program, resolved.display());

    probe_version(program, version_args, working_dir).map_err(|e| {
        tracing::debug!("Version probe for {} failed: {}", program, e);
        missing()
    })
}

/// Make a project-local script executable (mode 0755)
///
/// Failure is logged, not fatal: the subsequent invocation reports it.
pub fn ensure_executable(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)) {
            tracing::warn!("Failed to make {} executable: {}", path.display(), e);
        }
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

fn tool_basename(program: &str) -> &str {
    Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program)
}
