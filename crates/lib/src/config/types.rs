//! Project configuration types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::build::BuildSystem;
use crate::consts::{ARTIFACTS_DIR_NAME, BUILD_DIR_NAME, RECIPES_DIR_NAME};
use crate::recipe::Recipe;

/// `gdk-config.json` as written by the user.
#[derive(Debug, Deserialize)]
pub(crate) struct RawProjectConfig {
  pub component: BTreeMap<String, RawComponent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawComponent {
  #[serde(default)]
  pub author: String,
  pub version: String,
  pub build: RawBuild,
  pub publish: RawPublish,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBuild {
  pub build_system: String,
  #[serde(default)]
  pub custom_build_command: Option<CustomCommand>,
  #[serde(default)]
  pub options: RawBuildOptions,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawBuildOptions {
  #[serde(default)]
  pub excludes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPublish {
  pub bucket: String,
}

/// A custom build command, either as one command line or as separate arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum CustomCommand {
  Line(String),
  Args(Vec<String>),
}

impl CustomCommand {
  pub fn into_args(self) -> Vec<String> {
    match self {
      CustomCommand::Line(line) => line.split_whitespace().map(str::to_string).collect(),
      CustomCommand::Args(args) => args,
    }
  }
}

/// Locations the build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
  pub project_dir: PathBuf,
  /// `<project>/greengrass-build`, destroyed and recreated on every build.
  pub build_dir: PathBuf,
  pub artifacts_dir: PathBuf,
  pub recipes_dir: PathBuf,
  /// `<artifacts>/<component>/<version>`
  pub component_artifacts_dir: PathBuf,
}

impl BuildPaths {
  pub fn new(project_dir: &Path, component_name: &str, component_version: &str) -> Self {
    let build_dir = project_dir.join(BUILD_DIR_NAME);
    let artifacts_dir = build_dir.join(ARTIFACTS_DIR_NAME);
    let recipes_dir = build_dir.join(RECIPES_DIR_NAME);
    let component_artifacts_dir = artifacts_dir.join(component_name).join(component_version);
    Self {
      project_dir: project_dir.to_path_buf(),
      build_dir,
      artifacts_dir,
      recipes_dir,
      component_artifacts_dir,
    }
  }
}

/// Everything a build needs, resolved once per invocation.
///
/// The build stages take this by reference; only the reconciler mutates it,
/// rewriting artifact URIs in `recipe`.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
  pub component_name: String,
  pub component_version: String,
  pub component_author: String,
  pub bucket: String,
  pub build_system: BuildSystem,
  /// Command run for [`BuildSystem::Custom`].
  pub custom_build_command: Vec<String>,
  /// Extra glob patterns left out of the zip build.
  pub zip_excludes: Vec<String>,
  pub paths: BuildPaths,
  pub recipe_file: PathBuf,
  pub recipe: Recipe,
}

impl ProjectConfig {
  pub fn new(
    project_dir: &Path,
    component_name: &str,
    component_version: &str,
    bucket: &str,
    build_system: BuildSystem,
    recipe_file: PathBuf,
    recipe: Recipe,
  ) -> Self {
    Self {
      component_name: component_name.to_string(),
      component_version: component_version.to_string(),
      component_author: String::new(),
      bucket: bucket.to_string(),
      build_system,
      custom_build_command: Vec::new(),
      zip_excludes: Vec::new(),
      paths: BuildPaths::new(project_dir, component_name, component_version),
      recipe_file,
      recipe,
    }
  }
}
