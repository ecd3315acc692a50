//! Finalized recipe output.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use tracing::info;

use super::types::BuildError;
use crate::config::ProjectConfig;
use crate::recipe::RecipeFormat;

/// Write the in-memory recipe to `<recipes-dir>/<recipe file name>`.
///
/// The format follows the source recipe's extension. The destination is
/// created before serializing, so a failed write can leave it truncated.
pub fn write_recipe(config: &ProjectConfig) -> Result<PathBuf, BuildError> {
  let Some(file_name) = config.recipe_file.file_name() else {
    return Err(BuildError::RecipeWrite {
      path: config.recipe_file.clone(),
      message: "recipe path has no file name".to_string(),
    });
  };
  let path = config.paths.recipes_dir.join(file_name);
  let format = RecipeFormat::from_path(&config.recipe_file);

  info!(path = %path.display(), format = ?format, "writing build recipe");
  let file = File::create(&path).map_err(|e| BuildError::RecipeWrite {
    path: path.clone(),
    message: e.to_string(),
  })?;

  config
    .recipe
    .write_to(BufWriter::new(file), format)
    .map_err(|e| BuildError::RecipeWrite {
      path: path.clone(),
      message: e.to_string(),
    })?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::build::BuildSystem;
  use crate::build::stage::prepare_build_directories;
  use crate::recipe::Recipe;
  use crate::util::testutil::{TestProject, recipe_with_uris};
  use serde_yaml::Value;

  fn staged(recipe_name: &str) -> TestProject {
    let mut project = TestProject::new(BuildSystem::Zip, recipe_with_uris(&["s3://b/hello.py"]));
    project.config.recipe_file = project.project_dir().join(recipe_name);
    prepare_build_directories(&project.config).unwrap();
    project
  }

  #[test]
  fn json_recipe_written_as_json() {
    let project = staged("recipe.json");

    let path = write_recipe(&project.config).unwrap();

    assert_eq!(path, project.config.paths.recipes_dir.join("recipe.json"));
    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["ComponentName"], "com.example.HelloWorld");
    assert_eq!(value["Manifests"][0]["Artifacts"][0]["URI"], "s3://b/hello.py");
  }

  #[test]
  fn yaml_recipe_written_as_yaml() {
    let project = staged("recipe.yaml");

    let path = write_recipe(&project.config).unwrap();

    assert_eq!(path, project.config.paths.recipes_dir.join("recipe.yaml"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&content).is_err());
    let parsed = Recipe::parse(&content, RecipeFormat::Yaml).unwrap();
    assert_eq!(parsed, project.config.recipe);
  }

  #[test]
  fn writes_the_in_memory_recipe() {
    let mut project = staged("recipe.json");
    project.write_file("recipe.json", r#"{"ComponentName": "on-disk"}"#);
    project
      .config
      .recipe
      .set_field("ComponentName", Value::String("in-memory".to_string()));

    let path = write_recipe(&project.config).unwrap();

    let written = Recipe::load(&path).unwrap();
    assert_eq!(written.field("ComponentName").and_then(Value::as_str), Some("in-memory"));
  }

  #[test]
  fn failed_serialization_leaves_destination_behind() {
    let mut project = staged("recipe.json");
    project.config.recipe = Recipe::parse("? [a, b]\n: pair\n", RecipeFormat::Yaml).unwrap();

    let err = write_recipe(&project.config).unwrap_err();

    let destination = project.config.paths.recipes_dir.join("recipe.json");
    match &err {
      BuildError::RecipeWrite { path, message } => {
        assert_eq!(path, &destination);
        assert!(message.contains("key must be a string"), "{message}");
      }
      other => panic!("expected RecipeWrite, got {:?}", other),
    }
    assert!(destination.is_file());
  }

  #[test]
  fn missing_recipes_dir_is_recipe_write_error() {
    let project = TestProject::new(BuildSystem::Zip, Recipe::default());

    let err = write_recipe(&project.config).unwrap_err();

    assert!(matches!(err, BuildError::RecipeWrite { .. }));
    assert!(err.to_string().starts_with("Failed to create build recipe file at"));
  }
}
