//! Implementation of the `gdk component build` command.
//!
//! This command loads the project configuration, runs the component build and
//! prints where the artifacts and the finalized recipe were written.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use gdk_lib::build::{BuildOptions, BuildResult, BuildSystem, run_build};
use gdk_lib::config::load_project_config;

use crate::output::{OutputFormat, format_duration, print_artifact, print_info, print_json, print_stat, print_success};

#[derive(Serialize)]
struct BuildOutput<'a> {
  component: &'a str,
  version: &'a str,
  #[serde(flatten)]
  result: &'a BuildResult,
  duration_ms: u64,
}

/// Execute the build command.
///
/// Builds the component in `project_dir`:
/// - Recreates `greengrass-build/`
/// - Runs the configured build system
/// - Copies the recipe's artifacts into `greengrass-build/artifacts/<name>/<version>/`
/// - Writes the recipe with rewritten URIs into `greengrass-build/recipes/`
pub fn cmd_build(project_dir: &Path, force_zip: bool, format: OutputFormat) -> Result<()> {
  let started = Instant::now();
  let mut config = load_project_config(project_dir)?;

  if !format.is_json() {
    let system = if force_zip { BuildSystem::Zip } else { config.build_system };
    print_info(format!(
      "Building {} {} with {system}",
      config.component_name, config.component_version
    ));
  }

  let result = run_build(&mut config, &BuildOptions { force_zip })?;
  let elapsed = started.elapsed();
  debug!(elapsed_ms = elapsed.as_millis() as u64, "build finished");

  if format.is_json() {
    return print_json(&BuildOutput {
      component: &config.component_name,
      version: &config.component_version,
      result: &result,
      duration_ms: elapsed.as_millis() as u64,
    });
  }

  print_success(format!("Build complete in {}", format_duration(elapsed)));
  if !result.artifacts_copied.is_empty() {
    print_stat("Artifacts", result.artifacts_copied.len());
    for artifact in &result.artifacts_copied {
      print_artifact(artifact);
    }
  }
  if result.skipped_containers > 0 {
    print_stat("Container artifacts", result.skipped_containers);
  }
  match &result.recipe_path {
    Some(path) => print_stat("Recipe", path.display()),
    None => print_stat("Recipe", "managed by the custom build command"),
  }

  Ok(())
}
