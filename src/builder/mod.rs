//! Builder module for project detection and artifact production
//!
//! Provides detection and builds for:
//! - npm (`package.json`), packaged as `.tar.gz`
//! - Maven (`pom.xml`), packaged as the primary jar
//! - Gradle (`build.gradle` / `build.gradle.kts`), packaged as the primary jar

pub mod artifact;
pub mod coordinator;
pub mod detect;
pub mod gradle;
pub mod maven;
pub mod npm;
pub mod toolchain;
pub mod traits;

pub use coordinator::{build_project, new_builder};
pub use detect::*;
pub use gradle::GradleBuilder;
pub use maven::MavenBuilder;
pub use npm::NpmBuilder;
pub use traits::*;
