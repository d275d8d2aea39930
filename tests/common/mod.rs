//! Common test utilities for deployer tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use deployer::config::Config;

/// Writes `content` to `relative` under `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
}

/// Creates a temporary npm project with an already built `dist/`
pub fn create_npm_project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().to_path_buf();
    write_file(&path, "package.json", SAMPLE_PACKAGE_JSON);
    write_file(&path, "dist/index.html", "<html><body>shop</body></html>");
    write_file(&path, "dist/assets/app.js", "console.log('shop');");
    (dir, path)
}

/// Creates a temporary Maven project with jars already in `target/`
pub fn create_maven_project(jars: &[&str]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().to_path_buf();
    write_file(&path, "pom.xml", SAMPLE_POM);
    for jar in jars {
        write_file(&path, &format!("target/{}", jar), jar);
    }
    (dir, path)
}

/// Creates a temporary Gradle project with jars already in `build/libs/`
pub fn create_gradle_project(script: &str, jars: &[&str]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().to_path_buf();
    write_file(&path, script, "plugins { id 'java' }\n");
    for jar in jars {
        write_file(&path, &format!("build/libs/{}", jar), jar);
    }
    (dir, path)
}

/// Creates a temporary directory with no marker files
pub fn create_empty_project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Config whose toolchain commands all succeed without doing anything
pub fn stub_config() -> Config {
    let mut config = Config::default();
    config.npm.node_command = "true".to_string();
    config.npm.npm_command = "true".to_string();
    config.java.java_command = "true".to_string();
    config.java.maven_command = "true".to_string();
    config.java.gradle_command = "true".to_string();
    config
}

/// `deploy.toml` equivalent of [`stub_config`]
pub const STUB_DEPLOY_TOML: &str = r#"
[npm]
node_command = "true"
npm_command = "true"

[java]
java_command = "true"
maven_command = "true"
gradle_command = "true"
"#;

/// Sample package.json content for testing
pub const SAMPLE_PACKAGE_JSON: &str = r#"{
  "name": "shop",
  "version": "1.0.0",
  "scripts": { "build": "vite build" }
}
"#;

/// Sample pom.xml content for testing
pub const SAMPLE_POM: &str = r#"<project>
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>orders</artifactId>
  <version>1.0.0</version>
</project>
"#;
