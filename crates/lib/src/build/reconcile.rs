//! Artifact reconciliation.
//!
//! Matches the files a recipe declares against what the build system produced,
//! copies each match into the component artifact directory and points the
//! recipe's URI at the bucket location the artifact will be published to.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use super::systems::{BuildFolderSet, resolve_output_folders};
use super::types::BuildError;
use crate::config::ProjectConfig;
use crate::recipe::{ArtifactUri, bucket_artifact_uri};
use crate::util::fs::{dir_exists, is_directory_empty};

/// What reconciliation did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
  /// Destination of every copied artifact, in recipe order.
  pub copied: Vec<PathBuf>,
  /// Container artifacts left as declared.
  pub skipped_containers: usize,
}

/// Copy declared artifacts out of the build output and rewrite their URIs.
///
/// Manifests without `Artifacts`, artifacts without `URI` and container
/// references are left alone. Folders are searched in path order and the
/// first folder holding a file of the declared name wins.
pub fn reconcile_artifacts(config: &mut ProjectConfig) -> Result<ReconcileSummary, BuildError> {
  let ProjectConfig {
    component_name,
    component_version,
    bucket,
    build_system,
    paths,
    recipe,
    ..
  } = config;

  let mut summary = ReconcileSummary::default();
  let mut folders: Option<BuildFolderSet> = None;

  for mut artifact in recipe.artifacts_mut() {
    let Some(uri) = artifact.uri() else {
      continue;
    };
    let file_name = match ArtifactUri::parse(uri) {
      ArtifactUri::Container(reference) => {
        debug!(uri = %reference, "skipping container artifact");
        summary.skipped_containers += 1;
        continue;
      }
      ArtifactUri::File { file_name } => file_name.to_string(),
    };

    let candidates = match &mut folders {
      Some(resolved) => resolved,
      slot => slot.insert(resolve_output_folders(*build_system, &paths.project_dir)?),
    };
    let Some(found) = find_artifact(candidates, &file_name) else {
      return Err(BuildError::MissingArtifact {
        file_name,
        folders: describe_folders(candidates),
      });
    };

    let dest = paths.component_artifacts_dir.join(&file_name);
    fs::copy(&found, &dest).map_err(|e| BuildError::ArtifactCopy {
      from: found.clone(),
      to: dest.clone(),
      source: e,
    })?;

    let new_uri = bucket_artifact_uri(bucket, component_name, component_version, &file_name);
    info!(artifact = %file_name, uri = %new_uri, "copied artifact");
    artifact.set_uri(new_uri);
    summary.copied.push(dest);
  }

  Ok(summary)
}

/// Find `file_name` directly inside one of `folders`.
fn find_artifact(folders: &BuildFolderSet, file_name: &str) -> Option<PathBuf> {
  if file_name.is_empty() {
    return None;
  }
  folders
    .iter()
    .filter(|folder| {
      let usable = dir_exists(folder) && !is_directory_empty(folder);
      if !usable {
        debug!(folder = %folder.display(), "build folder missing or empty");
      }
      usable
    })
    .map(|folder| folder.join(file_name))
    .find(|candidate| candidate.is_file())
}

fn describe_folders(folders: &BuildFolderSet) -> String {
  folders.iter().map(|f| f.display().to_string()).collect::<Vec<_>>().join(", ")
}
