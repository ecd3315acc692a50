//! Project configuration.
//!
//! Reads `gdk-config.json` and the component recipe from a project directory
//! and resolves them into a [`ProjectConfig`] that the build stages consume.

mod types;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::build::{BuildSystem, UnsupportedBuildSystem};
use crate::consts::{CONFIG_FILE_NAME, INITIAL_VERSION, NEXT_PATCH_VERSION, RECIPE_FILE_NAMES};
use crate::recipe::{Recipe, RecipeError};
use crate::util::fs::file_exists;

pub use types::{BuildPaths, ProjectConfig};
use types::RawProjectConfig;

/// Errors that can occur while loading the project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to resolve project directory {}: {source}", path.display())]
  ProjectDir { path: PathBuf, source: io::Error },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("invalid project configuration {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("project configuration must define exactly one component, found {0}")]
  ComponentCount(usize),

  #[error(transparent)]
  BuildSystem(#[from] UnsupportedBuildSystem),

  #[error("build system 'custom' requires a non-empty custom_build_command")]
  MissingCustomCommand,

  #[error("no recipe file found in {}; expected one of: {}", dir.display(), RECIPE_FILE_NAMES.join(", "))]
  RecipeNotFound { dir: PathBuf },

  #[error("found more than one recipe file in {}: {}", dir.display(), names.join(", "))]
  MultipleRecipes { dir: PathBuf, names: Vec<String> },

  #[error(transparent)]
  Recipe(#[from] RecipeError),
}

/// Load the project configuration from `project_dir`.
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
  let project_dir = dunce::canonicalize(project_dir).map_err(|e| ConfigError::ProjectDir {
    path: project_dir.to_path_buf(),
    source: e,
  })?;

  let config_path = project_dir.join(CONFIG_FILE_NAME);
  debug!(path = %config_path.display(), "loading project configuration");
  let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Read {
    path: config_path.clone(),
    source: e,
  })?;
  let raw: RawProjectConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
    path: config_path.clone(),
    source: e,
  })?;

  if raw.component.len() != 1 {
    return Err(ConfigError::ComponentCount(raw.component.len()));
  }
  let Some((component_name, component)) = raw.component.into_iter().next() else {
    return Err(ConfigError::ComponentCount(0));
  };

  let build_system: BuildSystem = component.build.build_system.parse()?;
  let custom_build_command = component
    .build
    .custom_build_command
    .map(|command| command.into_args())
    .unwrap_or_default();
  if build_system == BuildSystem::Custom && custom_build_command.is_empty() {
    return Err(ConfigError::MissingCustomCommand);
  }

  let component_version = resolve_version(&component_name, &component.version);
  let recipe_file = find_recipe_file(&project_dir)?;
  let recipe = Recipe::load(&recipe_file)?;

  let mut config = ProjectConfig::new(
    &project_dir,
    &component_name,
    &component_version,
    &component.publish.bucket,
    build_system,
    recipe_file,
    recipe,
  );
  config.component_author = component.author;
  config.custom_build_command = custom_build_command;
  config.zip_excludes = component.build.options.excludes;
  Ok(config)
}

/// Resolve the configured version string.
///
/// `NEXT_PATCH` needs the published versions of the component to resolve; the
/// build only has the local project, so it starts from the initial version.
fn resolve_version(component_name: &str, version: &str) -> String {
  if version.eq_ignore_ascii_case(NEXT_PATCH_VERSION) {
    warn!(
      component = %component_name,
      version = INITIAL_VERSION,
      "NEXT_PATCH cannot be resolved against published versions, using initial version"
    );
    return INITIAL_VERSION.to_string();
  }
  version.to_string()
}

/// Find the single recipe file in the project directory.
fn find_recipe_file(project_dir: &Path) -> Result<PathBuf, ConfigError> {
  let found: Vec<PathBuf> = RECIPE_FILE_NAMES
    .iter()
    .map(|name| project_dir.join(name))
    .filter(|path| file_exists(path))
    .collect();

  match found.as_slice() {
    [] => Err(ConfigError::RecipeNotFound {
      dir: project_dir.to_path_buf(),
    }),
    [single] => Ok(single.clone()),
    many => Err(ConfigError::MultipleRecipes {
      dir: project_dir.to_path_buf(),
      names: many
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect(),
    }),
  }
}
