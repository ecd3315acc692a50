//! Types for the build pipeline.
//!
//! This module defines the error types, options and result of a component build.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::systems::{BuildSystem, UnsupportedBuildSystem};
use super::zip_build::ZipBuildError;

/// Prefix of every error surfaced by [`run_build`](super::run_build).
pub const BUILD_FAILED: &str = "Failed to build the component with the given project configuration.";

/// Errors that can occur while building a component.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The build system has no predictable output folders.
  #[error(transparent)]
  UnsupportedBuildSystem(#[from] UnsupportedBuildSystem),

  /// The build system failed to produce its output.
  #[error("Error building the component with the given build system.\n{0}")]
  BuildExecution(ExecutionFailure),

  /// A file declared in the recipe was not found in any build output folder.
  #[error(
    "Could not find the artifact file specified in the recipe '{file_name}' inside the build folder(s) '{folders}'."
  )]
  MissingArtifact { file_name: String, folders: String },

  /// A matched artifact could not be copied into the component artifact directory.
  #[error("failed to copy artifact {} to {}: {source}", from.display(), to.display())]
  ArtifactCopy {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },

  /// The finalized recipe could not be written.
  #[error("Failed to create build recipe file at '{}'.\n{message}", path.display())]
  RecipeWrite { path: PathBuf, message: String },

  /// The build root could not be prepared.
  #[error("failed to prepare build directory {}: {source}", path.display())]
  Staging { path: PathBuf, source: io::Error },

  /// A stage failed; wraps the stage error with the overall build failure message.
  #[error("{prefix}\n{0}", prefix = BUILD_FAILED)]
  Failed(Box<BuildError>),
}

impl BuildError {
  /// The stage error underneath the overall build failure, if wrapped.
  pub fn stage_error(&self) -> &BuildError {
    match self {
      BuildError::Failed(inner) => inner,
      other => other,
    }
  }
}

/// Why a build system invocation failed.
#[derive(Debug, Error)]
pub enum ExecutionFailure {
  #[error("build command is empty")]
  EmptyCommand,

  #[error("failed to start `{program}`: {source}")]
  Spawn { program: String, source: io::Error },

  #[error("command `{command}` {}", describe_exit(*code))]
  ExitStatus { command: String, code: Option<i32> },

  #[error("{0}")]
  Zip(ZipBuildError),
}

fn describe_exit(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with code {code}"),
    None => "was terminated by a signal".to_string(),
  }
}

impl From<ExecutionFailure> for BuildError {
  fn from(failure: ExecutionFailure) -> Self {
    BuildError::BuildExecution(failure)
  }
}

impl From<ZipBuildError> for BuildError {
  fn from(err: ZipBuildError) -> Self {
    BuildError::BuildExecution(ExecutionFailure::Zip(err))
  }
}

/// Options for [`run_build`](super::run_build).
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
  /// Use the intrinsic zip build regardless of the configured build system.
  pub force_zip: bool,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
  pub build_system: BuildSystem,
  /// Artifacts copied into the component artifact directory.
  pub artifacts_copied: Vec<PathBuf>,
  /// Container artifacts left untouched.
  pub skipped_containers: usize,
  /// The finalized recipe; `None` when a custom command owns the build output.
  pub recipe_path: Option<PathBuf>,
}
