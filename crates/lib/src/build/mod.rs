//! Component build pipeline.
//!
//! A build runs these stages in order, stopping at the first failure:
//!
//! 1. [`stage`] - destroy and recreate the build root
//! 2. [`invoke`] - run the build system: the in-process [`zip_build`], Maven, Gradle or a custom command
//! 3. [`reconcile`] - copy declared artifacts out of the build output and rewrite their URIs
//! 4. [`emit`] - write the finalized recipe into the build root
//!
//! A custom command owns the build root, so stages 3 and 4 only run for the
//! other build systems. Failed stages are not rolled back; the next build
//! starts from a clean build root instead.

pub mod emit;
pub mod invoke;
pub mod reconcile;
pub mod stage;
pub mod systems;
mod types;
pub mod zip_build;

use tracing::info;

use crate::config::ProjectConfig;

pub use systems::{BuildFolderSet, BuildSystem, UnsupportedBuildSystem, resolve_output_folders};
pub use types::*;

/// Build the component described by `config`.
///
/// Any stage error is returned wrapped in [`BuildError::Failed`].
pub fn run_build(config: &mut ProjectConfig, options: &BuildOptions) -> Result<BuildResult, BuildError> {
  run_stages(config, options).map_err(|e| BuildError::Failed(Box::new(e)))
}

fn run_stages(config: &mut ProjectConfig, options: &BuildOptions) -> Result<BuildResult, BuildError> {
  if options.force_zip {
    config.build_system = BuildSystem::Zip;
  }
  info!(
    component = %config.component_name,
    version = %config.component_version,
    build_system = %config.build_system,
    "building component"
  );

  stage::prepare_build_directories(config)?;
  invoke::invoke_build(config)?;

  if config.build_system == BuildSystem::Custom {
    return Ok(BuildResult {
      build_system: config.build_system,
      artifacts_copied: Vec::new(),
      skipped_containers: 0,
      recipe_path: None,
    });
  }

  let summary = reconcile::reconcile_artifacts(config)?;
  let recipe_path = emit::write_recipe(config)?;

  Ok(BuildResult {
    build_system: config.build_system,
    artifacts_copied: summary.copied,
    skipped_containers: summary.skipped_containers,
    recipe_path: Some(recipe_path),
  })
}
