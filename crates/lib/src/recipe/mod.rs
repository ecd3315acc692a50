//! Recipe documents.
//!
//! A recipe is read from and written back to the same format, chosen by the
//! recipe file's extension: `.yaml`/`.yml` is YAML, anything else is JSON.

mod types;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

pub use types::{Artifact, ArtifactMut, ArtifactUri, Manifest, Recipe, bucket_artifact_uri};

/// Errors reading or writing a recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
  #[error("failed to read recipe {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("invalid JSON recipe: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid YAML recipe: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

/// Serialization format of a recipe file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFormat {
  Json,
  Yaml,
}

impl RecipeFormat {
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => RecipeFormat::Yaml,
      _ => RecipeFormat::Json,
    }
  }
}

impl Recipe {
  pub fn parse(content: &str, format: RecipeFormat) -> Result<Self, RecipeError> {
    match format {
      RecipeFormat::Json => Ok(serde_json::from_str(content)?),
      RecipeFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
  }

  /// Read and parse a recipe file, picking the format from its extension.
  pub fn load(path: &Path) -> Result<Self, RecipeError> {
    let content = fs::read_to_string(path).map_err(|e| RecipeError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    Self::parse(&content, RecipeFormat::from_path(path))
  }

  /// Serialize the recipe into `writer`.
  ///
  /// JSON is pretty-printed with four-space indentation.
  pub fn write_to<W: Write>(&self, mut writer: W, format: RecipeFormat) -> Result<(), RecipeError> {
    match format {
      RecipeFormat::Json => {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
      }
      RecipeFormat::Yaml => serde_yaml::to_writer(&mut writer, self)?,
    }
    writer.flush()?;
    Ok(())
  }
}
