//! Test utilities for gdk-lib.
//!
//! Cross-platform command lines and a scratch component project for tests that
//! drive the build stages end to end.

use std::path::Path;

use tempfile::TempDir;

use crate::build::BuildSystem;
use crate::config::ProjectConfig;
use crate::recipe::Recipe;

/// Returns a command that runs `script` through the platform shell.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> Vec<String> {
  vec!["/bin/sh".to_string(), "-c".to_string(), script.to_string()]
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> Vec<String> {
  vec!["cmd.exe".to_string(), "/C".to_string(), script.to_string()]
}

/// Returns a command that exits with the given status code.
pub fn exit_cmd(code: i32) -> Vec<String> {
  shell_cmd(&format!("exit {}", code))
}

/// A recipe with a single manifest declaring the given artifact URIs.
pub fn recipe_with_uris(uris: &[&str]) -> Recipe {
  let artifacts: Vec<serde_json::Value> = uris.iter().map(|uri| serde_json::json!({ "URI": uri })).collect();
  serde_json::from_value(serde_json::json!({
    "RecipeFormatVersion": "2020-01-25",
    "ComponentName": "com.example.HelloWorld",
    "ComponentVersion": "1.0.0",
    "Manifests": [
      {
        "Platform": { "os": "linux" },
        "Lifecycle": { "Run": "python3 -u {artifacts:path}/hello_world.py" },
        "Artifacts": artifacts,
      }
    ],
  }))
  .unwrap()
}

/// Scratch component project rooted in a temporary directory.
///
/// The project directory is `<tmp>/HelloWorld` so archive names are predictable.
pub struct TestProject {
  pub temp: TempDir,
  pub config: ProjectConfig,
}

impl TestProject {
  pub fn new(build_system: BuildSystem, recipe: Recipe) -> Self {
    let temp = TempDir::new().unwrap();
    let project_dir = temp.path().join("HelloWorld");
    std::fs::create_dir_all(&project_dir).unwrap();
    let recipe_file = project_dir.join("recipe.json");
    let config = ProjectConfig::new(
      &project_dir,
      "com.example.HelloWorld",
      "1.0.0",
      "my-bucket",
      build_system,
      recipe_file,
      recipe,
    );
    Self { temp, config }
  }

  pub fn project_dir(&self) -> &Path {
    &self.config.paths.project_dir
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.project_dir().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }
}
