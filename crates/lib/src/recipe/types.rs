//! Recipe document types.
//!
//! A recipe is held as the ordered mapping it was read from, so keys keep
//! their position, explicit nulls survive and user data may use non-string
//! keys. The build only reads `Manifests[].Artifacts[].URI` and only ever
//! rewrites `URI`; the views below expose those keys, treating a missing key
//! or a value of the wrong shape as absent.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::consts::{BUCKET_SCHEME, CONTAINER_SCHEME};

const MANIFESTS_KEY: &str = "Manifests";
const ARTIFACTS_KEY: &str = "Artifacts";
const URI_KEY: &str = "URI";

/// A component recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(Mapping);

/// A per-platform section of a recipe.
#[derive(Debug, Clone, Copy)]
pub struct Manifest<'a>(&'a Mapping);

/// An artifact entry inside a manifest.
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a>(&'a Mapping);

/// An artifact entry whose URI can be rewritten in place.
#[derive(Debug)]
pub struct ArtifactMut<'a>(&'a mut Mapping);

/// What an artifact URI points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactUri<'a> {
  /// An image reference in a container registry. Never resolved on disk.
  Container(&'a str),
  /// A file expected in the build output, identified by its final path segment.
  File { file_name: &'a str },
}

impl<'a> ArtifactUri<'a> {
  pub fn parse(uri: &'a str) -> Self {
    if uri
      .split_once(':')
      .is_some_and(|(scheme, _)| scheme.eq_ignore_ascii_case(CONTAINER_SCHEME))
    {
      return ArtifactUri::Container(uri);
    }

    let file_name = uri.rsplit('/').next().unwrap_or(uri);
    ArtifactUri::File { file_name }
  }
}

impl Recipe {
  /// A top-level value of the recipe.
  pub fn field(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  /// Set a top-level value, keeping the key's position if it already exists.
  pub fn set_field(&mut self, key: &str, value: Value) {
    self.0.insert(Value::String(key.to_string()), value);
  }

  /// The recipe's manifests, or `None` when `Manifests` is missing or not a list.
  pub fn manifests(&self) -> Option<impl Iterator<Item = Manifest<'_>>> {
    let manifests = self.0.get(MANIFESTS_KEY)?.as_sequence()?;
    Some(manifests.iter().filter_map(Value::as_mapping).map(Manifest))
  }

  /// Iterate over every artifact of every manifest.
  ///
  /// Manifests without `Artifacts` contribute nothing.
  pub fn artifacts(&self) -> impl Iterator<Item = Artifact<'_>> {
    self.manifests().into_iter().flatten().flat_map(Manifest::artifacts)
  }

  pub fn artifacts_mut(&mut self) -> impl Iterator<Item = ArtifactMut<'_>> {
    self
      .0
      .get_mut(MANIFESTS_KEY)
      .and_then(Value::as_sequence_mut)
      .into_iter()
      .flatten()
      .filter_map(Value::as_mapping_mut)
      .filter_map(|manifest| manifest.get_mut(ARTIFACTS_KEY))
      .filter_map(Value::as_sequence_mut)
      .flatten()
      .filter_map(Value::as_mapping_mut)
      .map(ArtifactMut)
  }
}

impl<'a> Manifest<'a> {
  pub fn artifacts(self) -> impl Iterator<Item = Artifact<'a>> {
    let entries: &'a Mapping = self.0;
    entries
      .get(ARTIFACTS_KEY)
      .and_then(Value::as_sequence)
      .into_iter()
      .flatten()
      .filter_map(Value::as_mapping)
      .map(Artifact)
  }
}

impl<'a> Artifact<'a> {
  pub fn uri(&self) -> Option<&'a str> {
    let entry: &'a Mapping = self.0;
    entry.get(URI_KEY).and_then(Value::as_str)
  }
}

impl ArtifactMut<'_> {
  pub fn uri(&self) -> Option<&str> {
    self.0.get(URI_KEY).and_then(Value::as_str)
  }

  pub fn set_uri(&mut self, uri: String) {
    self.0.insert(Value::String(URI_KEY.to_string()), Value::String(uri));
  }
}

/// Canonical bucket URI of an artifact built for a component version.
pub fn bucket_artifact_uri(bucket: &str, component_name: &str, component_version: &str, file_name: &str) -> String {
  format!(
    "{}://{}/artifacts/{}/{}/{}",
    BUCKET_SCHEME, bucket, component_name, component_version, file_name
  )
}
