//! End-to-end builds through the library API with stubbed toolchains

mod common;

use std::fs::File;

use flate2::read::GzDecoder;

use common::{
    create_empty_project, create_gradle_project, create_maven_project, create_npm_project,
    stub_config,
};
use deployer::builder::{build_project, detect_project, BuildOptions, ProjectType};
use deployer::error::BuildError;

#[test]
fn test_npm_build_with_timestamp_version() {
    let (_dir, path) = create_npm_project();
    let config = stub_config();
    let options = BuildOptions::for_project(&path);

    let result = build_project(&config, &options).unwrap();

    assert!(result.success);
    assert_eq!(result.version.len(), 15);
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    let expected = path
        .join("build")
        .join(format!("{}-{}.tar.gz", name, result.version));
    assert_eq!(result.artifact_path.as_deref(), Some(expected.as_path()));
    assert_eq!(result.files, vec!["assets/app.js", "index.html"]);
    assert_eq!(result.size, std::fs::metadata(&expected).unwrap().len());
}

#[test]
fn test_npm_archive_contents_match_files() {
    let (_dir, path) = create_npm_project();
    let config = stub_config();
    let options = BuildOptions::for_project(&path).with_version("1.0.0");

    let result = build_project(&config, &options).unwrap();

    let archive_path = result.artifact_path.unwrap();
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(archive_path).unwrap()));
    let mut entries: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, result.files);
}

#[test]
fn test_configured_name_and_output_dir() {
    let (_dir, path) = create_maven_project(&["orders-1.0.0.jar"]);
    let out = tempfile::TempDir::new().unwrap();
    let mut config = stub_config();
    config.project.name = "orders-service".to_string();
    let options = BuildOptions::for_project(&path)
        .with_output(out.path())
        .with_version("1.0.0");

    let result = build_project(&config, &options).unwrap();

    assert_eq!(
        result.artifact_path,
        Some(out.path().join("orders-service-1.0.0.jar"))
    );
    assert_eq!(result.files, vec!["orders-service-1.0.0.jar"]);
}

#[test]
fn test_rebuild_with_same_version_overwrites() {
    let (_dir, path) = create_maven_project(&["orders.jar"]);
    let config = stub_config();
    let options = BuildOptions::for_project(&path).with_version("2.0.0");

    let first = build_project(&config, &options).unwrap();
    let second = build_project(&config, &options).unwrap();

    assert_eq!(first.artifact_path, second.artifact_path);
    let entries = std::fs::read_dir(path.join("build")).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_gradle_kotlin_dsl_build() {
    let (_dir, path) = create_gradle_project(
        "build.gradle.kts",
        &["billing-sources.jar", "billing-plain.jar", "billing.jar"],
    );
    let mut config = stub_config();
    config.project.name = "billing".to_string();
    let options = BuildOptions::for_project(&path)
        .with_version("0.3.0")
        .skipping_tests(true);

    let result = build_project(&config, &options).unwrap();

    let artifact = result.artifact_path.unwrap();
    assert_eq!(artifact, path.join("build/billing-0.3.0.jar"));
    assert_eq!(std::fs::read_to_string(artifact).unwrap(), "billing.jar");
}

#[test]
fn test_unknown_project_fails_without_artifact() {
    let (_dir, path) = create_empty_project();
    let config = stub_config();
    let options = BuildOptions::for_project(&path);

    let failure = build_project(&config, &options).unwrap_err();

    assert!(matches!(failure.error, BuildError::NoProjectDetected { .. }));
    assert!(!failure.result.success);
    assert!(failure.result.artifact_path.is_none());
    assert!(!path.join("build").exists());
}

#[test]
fn test_failed_build_command_reports_command_line() {
    let (_dir, path) = create_npm_project();
    let mut config = stub_config();
    config.npm.build_command = "sh -c false".to_string();
    let options = BuildOptions::for_project(&path);

    let failure = build_project(&config, &options).unwrap_err();

    match failure.error {
        BuildError::CommandFailed { command, .. } => assert_eq!(command, "sh -c false"),
        BuildError::SpawnFailed { .. } => eprintln!("Skipping: sh not available"),
        other => panic!("Expected CommandFailed, got {:?}", other),
    }
    assert!(!failure.result.success);
}

#[test]
fn test_current_dir_unchanged() {
    let before = std::env::current_dir().unwrap();
    let config = stub_config();

    let (_ok_dir, ok_path) = create_npm_project();
    build_project(&config, &BuildOptions::for_project(&ok_path)).unwrap();
    assert_eq!(std::env::current_dir().unwrap(), before);

    let (_bad_dir, bad_path) = create_maven_project(&[]);
    assert!(build_project(&config, &BuildOptions::for_project(&bad_path)).is_err());
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[test]
fn test_detection_priority() {
    let (_dir, path) = create_maven_project(&[]);
    common::write_file(&path, "build.gradle", "");
    assert_eq!(detect_project(&path).unwrap().project_type, ProjectType::Maven);

    common::write_file(&path, "package.json", "{}");
    assert_eq!(detect_project(&path).unwrap().project_type, ProjectType::Npm);
}
