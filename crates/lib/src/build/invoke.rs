//! Build system invocation.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use super::systems::BuildSystem;
use super::types::{BuildError, ExecutionFailure};
use super::zip_build::build_zip;
use crate::config::ProjectConfig;

/// Run the configured build system in the project directory.
///
/// The zip build runs in-process. Maven, Gradle and custom builds run one
/// external command that inherits stdio and blocks until it exits; there is
/// no timeout and no retry.
pub fn invoke_build(config: &ProjectConfig) -> Result<(), BuildError> {
  let project_dir = &config.paths.project_dir;

  let command = match config.build_system {
    BuildSystem::Zip => {
      build_zip(config)?;
      return Ok(());
    }
    BuildSystem::Custom => config.custom_build_command.clone(),
    system => system.default_command().unwrap_or_default(),
  };

  info!(build_system = %config.build_system, "invoking build command");
  run_command(&command, project_dir)?;
  Ok(())
}

/// Run `command` (program followed by its arguments) with `cwd` as working directory.
pub fn run_command(command: &[String], cwd: &Path) -> Result<(), ExecutionFailure> {
  let (program, args) = command.split_first().ok_or(ExecutionFailure::EmptyCommand)?;
  let command_line = command.join(" ");

  info!(cmd = %command_line, "executing command");
  debug!(working_dir = %cwd.display(), "spawning process");

  let status = Command::new(program)
    .args(args)
    .current_dir(cwd)
    .status()
    .map_err(|e| ExecutionFailure::Spawn {
      program: program.clone(),
      source: e,
    })?;

  if !status.success() {
    return Err(ExecutionFailure::ExitStatus {
      command: command_line,
      code: status.code(),
    });
  }
  Ok(())
}
