//! Build systems and their output folders.
//!
//! Maven and Gradle projects are located by their descriptor files; every
//! descriptor found under the project root contributes one output folder next
//! to it. The zip build always writes to `<project>/zip-build`.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::consts::{BUILD_DIR_NAME, ZIP_BUILD_DIR_NAME};

const MAVEN_OUTPUT: &[&str] = &["target"];
const GRADLE_OUTPUT: &[&str] = &["build", "libs"];

/// Predicted build output folders, ordered by path.
pub type BuildFolderSet = BTreeSet<PathBuf>;

#[derive(Debug, Error)]
#[error("unsupported build system '{0}', expected one of: zip, maven, gradle, custom")]
pub struct UnsupportedBuildSystem(pub String);

/// The strategy used to produce a component's build output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
  Zip,
  Maven,
  Gradle,
  Custom,
}

impl BuildSystem {
  pub const ALL: [BuildSystem; 4] = [BuildSystem::Zip, BuildSystem::Maven, BuildSystem::Gradle, BuildSystem::Custom];

  pub fn as_str(self) -> &'static str {
    match self {
      BuildSystem::Zip => "zip",
      BuildSystem::Maven => "maven",
      BuildSystem::Gradle => "gradle",
      BuildSystem::Custom => "custom",
    }
  }

  /// The fixed command for build systems with a well-known CLI.
  pub fn default_command(self) -> Option<Vec<String>> {
    let args: &[&str] = match self {
      BuildSystem::Maven if cfg!(windows) => &["mvn.cmd", "clean", "package"],
      BuildSystem::Maven => &["mvn", "clean", "package"],
      BuildSystem::Gradle if cfg!(windows) => &["gradle.bat", "build"],
      BuildSystem::Gradle => &["gradle", "build"],
      BuildSystem::Zip | BuildSystem::Custom => return None,
    };
    Some(args.iter().map(|arg| arg.to_string()).collect())
  }

  /// Descriptor file name and the output path relative to its directory.
  fn descriptor_layout(self) -> Option<(&'static str, &'static [&'static str])> {
    match self {
      BuildSystem::Maven => Some(("pom.xml", MAVEN_OUTPUT)),
      BuildSystem::Gradle => Some(("build.gradle", GRADLE_OUTPUT)),
      BuildSystem::Zip | BuildSystem::Custom => None,
    }
  }
}

impl fmt::Display for BuildSystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BuildSystem {
  type Err = UnsupportedBuildSystem;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    BuildSystem::ALL
      .into_iter()
      .find(|system| system.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| UnsupportedBuildSystem(s.to_string()))
  }
}

/// Resolve the folders a build system is expected to populate.
///
/// An empty set is not an error here; it only matters once an artifact needs
/// a folder to be found in. Custom commands write wherever they like, so they
/// have no predicted folders.
pub fn resolve_output_folders(
  build_system: BuildSystem,
  project_root: &Path,
) -> Result<BuildFolderSet, UnsupportedBuildSystem> {
  if build_system == BuildSystem::Zip {
    return Ok(BuildFolderSet::from([project_root.join(ZIP_BUILD_DIR_NAME)]));
  }

  let (descriptor, output) = build_system
    .descriptor_layout()
    .ok_or_else(|| UnsupportedBuildSystem(build_system.to_string()))?;

  let folders = find_build_folders(project_root, descriptor, output);
  debug!(
    build_system = %build_system,
    count = folders.len(),
    "resolved build output folders"
  );
  Ok(folders)
}

/// Find every `descriptor` under `project_root` and derive `<dir>/<output...>` for each.
///
/// The build root and the zip output folder are never descended into.
fn find_build_folders(project_root: &Path, descriptor: &str, output: &[&str]) -> BuildFolderSet {
  WalkDir::new(project_root)
    .into_iter()
    .filter_entry(|entry| {
      !(entry.depth() > 0
        && entry.file_type().is_dir()
        && (entry.file_name() == BUILD_DIR_NAME || entry.file_name() == ZIP_BUILD_DIR_NAME))
    })
    .filter_map(|entry| match entry {
      Ok(entry) => Some(entry),
      Err(e) => {
        debug!(error = %e, "skipping unreadable path while locating build files");
        None
      }
    })
    .filter(|entry| entry.file_type().is_file() && entry.file_name() == descriptor)
    .filter_map(|entry| entry.path().parent().map(Path::to_path_buf))
    .map(|dir| output.iter().fold(dir, |path, segment| path.join(segment)))
    .collect()
}
