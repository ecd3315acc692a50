//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const COMPONENT_NAME: &str = "com.example.HelloWorld";

/// Recipe with a single artifact referencing `file_name`.
pub fn recipe_json(file_name: &str) -> String {
  format!(
    r#"{{
  "RecipeFormatVersion": "2020-01-25",
  "ComponentName": "{COMPONENT_NAME}",
  "ComponentVersion": "{{COMPONENT_VERSION}}",
  "ComponentPublisher": "Amazon",
  "Manifests": [
    {{
      "Platform": {{ "os": "linux" }},
      "Lifecycle": {{ "Run": "python3 -u {{artifacts:path}}/{file_name}" }},
      "Artifacts": [{{ "URI": "s3://BUCKET_NAME/COMPONENT_NAME/COMPONENT_VERSION/{file_name}" }}]
    }}
  ]
}}"#
  )
}

/// Project configuration for a single component using `build`.
pub fn config_json(build: &str) -> String {
  format!(
    r#"{{
  "component": {{
    "{COMPONENT_NAME}": {{
      "author": "Example",
      "version": "1.0.0",
      "build": {build},
      "publish": {{ "bucket": "my-bucket", "region": "us-east-1" }}
    }}
  }},
  "gdk_version": "1.0.0"
}}"#
  )
}

/// Isolated component project.
///
/// The project lives in `<tmp>/HelloWorld` so the zip build names its archive
/// `HelloWorld.zip`.
pub struct TestEnv {
  pub temp: TempDir,
  pub project_dir: PathBuf,
}

impl TestEnv {
  pub fn new(build: &str, recipe_name: &str, recipe: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let project_dir = temp.path().join("HelloWorld");
    std::fs::create_dir_all(&project_dir).unwrap();
    let env = Self { temp, project_dir };
    env.write_file("gdk-config.json", &config_json(build));
    env.write_file(recipe_name, recipe);
    env
  }

  /// Zip project whose recipe references the project archive.
  pub fn zip_project() -> Self {
    let env = Self::new(r#"{ "build_system": "zip" }"#, "recipe.json", &recipe_json("HelloWorld.zip"));
    env.write_file("main.py", "print('hello')\n");
    env
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.project_dir.join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn build_dir(&self) -> PathBuf {
    self.project_dir.join("greengrass-build")
  }

  pub fn artifacts_dir(&self) -> PathBuf {
    self.build_dir().join("artifacts").join(COMPONENT_NAME).join("1.0.0")
  }

  pub fn built_recipe(&self, name: &str) -> PathBuf {
    self.build_dir().join("recipes").join(name)
  }

  /// `gdk component build` pointed at this project.
  pub fn build_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("gdk");
    cmd
      .args(["component", "build", "--project-dir"])
      .arg(&self.project_dir)
      .env_remove("GDK_LOG");
    cmd
  }
}

pub fn read_json(path: &Path) -> serde_json::Value {
  let content = std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
  serde_json::from_str(&content).unwrap()
}
