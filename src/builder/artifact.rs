//! Artifact discovery and packaging
//!
//! Shared by all builders:
//! - version synthesis and output directory resolution
//! - JAR discovery under a tool's output directory, and primary-JAR selection
//! - copying a single artifact, or archiving a directory as `.tar.gz`

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use walkdir::WalkDir;

use super::traits::BuilderResult;
use crate::error::BuildError;

/// Timestamp format for synthesized versions
pub const VERSION_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "build";

/// Classifier substrings of auxiliary Maven jars
pub const MAVEN_AUX_CLASSIFIERS: &[&str] = &["sources", "javadoc", "tests"];

/// Classifier substrings of auxiliary Gradle jars, including the plain jar
/// produced next to Spring Boot fat jars
pub const GRADLE_AUX_CLASSIFIERS: &[&str] = &["sources", "javadoc", "tests", "plain"];

/// The explicit version, or a local timestamp when empty
pub fn resolve_version(version: &str) -> String {
    let version = version.trim();
    if version.is_empty() {
        chrono::Local::now().format(VERSION_FORMAT).to_string()
    } else {
        version.to_string()
    }
}

/// Resolve where artifacts are written
///
/// Empty means `build`. Relative paths are taken relative to the project.
pub fn resolve_output_dir(project_path: &Path, output: &Path) -> PathBuf {
    let output = if output.as_os_str().is_empty() {
        Path::new(DEFAULT_OUTPUT_DIR)
    } else {
        output
    };

    if output.is_absolute() {
        output.to_path_buf()
    } else {
        project_path.join(output)
    }
}

/// Recursively collect files ending in `.{extension}`, in lexical order
///
/// # Errors
/// * `BuildError::ArtifactNotFound` - Directory missing or nothing matched
pub fn find_artifacts(dir: &Path, extension: &str) -> BuilderResult<Vec<PathBuf>> {
    let pattern = format!("*.{}", extension);
    let not_found = || BuildError::ArtifactNotFound {
        location: dir.display().to_string(),
        pattern: pattern.clone(),
    };

    if !dir.is_dir() {
        return Err(not_found());
    }

    let suffix = format!(".{}", extension);
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(&suffix)
        {
            found.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} {} file(s) in {}", found.len(), pattern, dir.display());

    if found.is_empty() {
        return Err(not_found());
    }

    Ok(found)
}

/// Pick the primary artifact
///
/// The first candidate whose file name contains none of `excluded` wins;
/// otherwise the first candidate. `None` only for an empty list.
pub fn select_primary<'a>(candidates: &'a [PathBuf], excluded: &[&str]) -> Option<&'a PathBuf> {
    candidates
        .iter()
        .find(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            !excluded.iter().any(|classifier| name.contains(classifier))
        })
        .or_else(|| candidates.first())
}

/// Copy a single artifact into place, returning its size in bytes
pub fn copy_artifact(source: &Path, destination: &Path) -> BuilderResult<u64> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, destination)?;
    Ok(fs::metadata(destination)?.len())
}

/// Archive every regular file under `source_dir` into a `.tar.gz`
///
/// Entry names are `/`-separated paths relative to `source_dir`; the root
/// itself is not an entry. The archive is skipped when it is written inside
/// `source_dir`. Returns the packaged file names and the size of the
/// finished archive.
pub fn package_directory(source_dir: &Path, archive_path: &Path) -> BuilderResult<(Vec<String>, u64)> {
    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(archive_path)?;
    let archive_real = fs::canonicalize(archive_path)?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut archive = tar::Builder::new(encoder);
    let mut files = Vec::new();

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || is_same_file(entry.path(), &archive_real) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        archive.append_path_with_name(entry.path(), &name)?;
        files.push(name);
    }

    let encoder = archive.into_inner()?;
    let mut writer = encoder.finish()?;
    writer.flush()?;
    drop(writer);

    let size = fs::metadata(archive_path)?.len();
    Ok((files, size))
}

fn is_same_file(path: &Path, canonical: &Path) -> bool {
    path.file_name() == canonical.file_name()
        && fs::canonicalize(path).is_ok_and(|p| p == canonical)
}
