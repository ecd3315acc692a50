//! Build root staging.

use std::fs;

use tracing::info;

use super::types::BuildError;
use crate::config::ProjectConfig;
use crate::util::fs::clean_dir;

/// Destroy the build root and recreate the recipes and component artifact directories.
///
/// Nothing from a previous build survives this call.
pub fn prepare_build_directories(config: &ProjectConfig) -> Result<(), BuildError> {
  let paths = &config.paths;
  info!(path = %paths.build_dir.display(), "preparing build directories");

  clean_dir(&paths.build_dir).map_err(|e| BuildError::Staging {
    path: paths.build_dir.clone(),
    source: e,
  })?;

  for dir in [&paths.recipes_dir, &paths.component_artifacts_dir] {
    fs::create_dir_all(dir).map_err(|e| BuildError::Staging {
      path: dir.clone(),
      source: e,
    })?;
  }
  Ok(())
}
