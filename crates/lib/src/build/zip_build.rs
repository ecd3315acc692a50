//! Intrinsic zip build.
//!
//! Copies the project tree (minus ignored paths) into
//! `<project>/zip-build/<project-name>` and archives that copy as
//! `<project>/zip-build/<project-name>.zip`.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::systems::{BuildSystem, UnsupportedBuildSystem, resolve_output_folders};
use crate::config::ProjectConfig;
use crate::consts::{BUILD_DIR_NAME, CONFIG_FILE_NAME, ZIP_BUILD_DIR_NAME};
use crate::util::fs::clean_dir;

/// Names never copied into the zip build, in addition to the build root, the
/// zip output folder, the project descriptor and the recipe.
const DEFAULT_IGNORES: [&str; 3] = [".*", "test*", "node_modules"];

/// A zip build failure.
#[derive(Debug, Error)]
#[error("Failed to zip the component in default build mode.\n{0}")]
pub struct ZipBuildError(pub ZipStep);

/// The step of the zip build that failed.
#[derive(Debug, Error)]
pub enum ZipStep {
  #[error(transparent)]
  Resolve(#[from] UnsupportedBuildSystem),

  #[error("no output folder resolved for the zip build")]
  NoOutputFolder,

  #[error("project directory {} has no name", path.display())]
  NoProjectName { path: PathBuf },

  #[error("failed to clean {}: {source}", path.display())]
  Clean { path: PathBuf, source: io::Error },

  #[error("invalid exclude pattern '{pattern}': {source}")]
  Pattern {
    pattern: String,
    source: glob::PatternError,
  },

  #[error("failed to walk {}: {source}", path.display())]
  Walk { path: PathBuf, source: walkdir::Error },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },

  #[error("failed to create archive {}: {source}", path.display())]
  Archive {
    path: PathBuf,
    source: zip::result::ZipError,
  },
}

/// Decides which project paths stay out of the zip build.
///
/// Each pattern is matched against the entry's file name and against its path
/// relative to the project root (with `/` separators).
#[derive(Debug)]
pub struct ZipIgnore {
  root: PathBuf,
  patterns: Vec<Pattern>,
}

impl ZipIgnore {
  /// Build the ignore set for a project: defaults plus the configured excludes.
  pub fn for_project(config: &ProjectConfig) -> Result<Self, ZipStep> {
    let mut literals = vec![
      BUILD_DIR_NAME.to_string(),
      ZIP_BUILD_DIR_NAME.to_string(),
      CONFIG_FILE_NAME.to_string(),
    ];
    if let Some(recipe_name) = config.recipe_file.file_name() {
      literals.push(recipe_name.to_string_lossy().into_owned());
    }

    let mut patterns: Vec<Pattern> = literals.iter().map(|name| literal_pattern(name)).collect();
    for pattern in DEFAULT_IGNORES.iter().map(|p| p.to_string()).chain(config.zip_excludes.iter().cloned()) {
      let compiled = Pattern::new(&pattern).map_err(|e| ZipStep::Pattern { pattern, source: e })?;
      patterns.push(compiled);
    }

    Ok(Self {
      root: config.paths.project_dir.clone(),
      patterns,
    })
  }

  pub fn is_ignored(&self, path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy());
    let relative = path.strip_prefix(&self.root).ok().map(slash_path);

    self.patterns.iter().any(|pattern| {
      name.as_deref().is_some_and(|n| pattern.matches(n))
        || relative.as_deref().is_some_and(|r| !r.is_empty() && pattern.matches(r))
    })
  }
}

fn literal_pattern(name: &str) -> Pattern {
  // An escaped literal always compiles.
  Pattern::new(&Pattern::escape(name)).unwrap_or_default()
}

/// Join path components with `/`, as zip entry names and glob matching expect.
fn slash_path(path: &Path) -> String {
  path
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

/// Run the zip build, returning the path of the created archive.
pub fn build_zip(config: &ProjectConfig) -> Result<PathBuf, ZipBuildError> {
  zip_project(config).map_err(ZipBuildError)
}

fn zip_project(config: &ProjectConfig) -> Result<PathBuf, ZipStep> {
  let project_dir = &config.paths.project_dir;
  let zip_dir = resolve_output_folders(BuildSystem::Zip, project_dir)?
    .into_iter()
    .next()
    .ok_or(ZipStep::NoOutputFolder)?;
  let project_name = project_dir.file_name().ok_or_else(|| ZipStep::NoProjectName {
    path: project_dir.clone(),
  })?;

  info!(path = %zip_dir.display(), "building component with the zip build system");
  clean_dir(&zip_dir)
    .and_then(|()| fs::create_dir_all(&zip_dir))
    .map_err(|e| ZipStep::Clean {
      path: zip_dir.clone(),
      source: e,
    })?;

  let copy_dir = zip_dir.join(project_name);
  let ignore = ZipIgnore::for_project(config)?;
  copy_project(project_dir, &copy_dir, &ignore)?;

  let mut archive_name = project_name.to_os_string();
  archive_name.push(".zip");
  let archive_path = zip_dir.join(archive_name);
  archive_dir(&copy_dir, &archive_path)?;

  info!(archive = %archive_path.display(), "created zip archive");
  Ok(archive_path)
}

/// Copy `source` into `dest`, skipping ignored entries (and everything below them).
///
/// Symbolic links are copied as what they point to.
fn copy_project(source: &Path, dest: &Path, ignore: &ZipIgnore) -> Result<(), ZipStep> {
  let walker = WalkDir::new(source)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| entry.depth() == 0 || !ignore.is_ignored(entry.path()));

  for entry in walker {
    let entry = entry.map_err(|e| ZipStep::Walk {
      path: source.to_path_buf(),
      source: e,
    })?;
    let Ok(relative) = entry.path().strip_prefix(source) else {
      continue;
    };
    let target = dest.join(relative);

    let copied = if entry.file_type().is_dir() {
      fs::create_dir_all(&target)
    } else {
      debug!(path = %relative.display(), "copying into zip build");
      fs::copy(entry.path(), &target).map(|_| ())
    };
    copied.map_err(|e| ZipStep::Copy {
      from: entry.path().to_path_buf(),
      to: target.clone(),
      source: e,
    })?;
  }
  Ok(())
}

/// Write every entry below `source_dir` into a deflated zip archive at `archive_path`.
fn archive_dir(source_dir: &Path, archive_path: &Path) -> Result<(), ZipStep> {
  let archive_err = |source: zip::result::ZipError| ZipStep::Archive {
    path: archive_path.to_path_buf(),
    source,
  };

  let file = File::create(archive_path).map_err(|e| archive_err(e.into()))?;
  let mut writer = ZipWriter::new(file);
  let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

  for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|e| ZipStep::Walk {
      path: source_dir.to_path_buf(),
      source: e,
    })?;
    let Ok(relative) = entry.path().strip_prefix(source_dir) else {
      continue;
    };
    let name = slash_path(relative);

    if entry.file_type().is_dir() {
      writer.add_directory(format!("{}/", name), options).map_err(archive_err)?;
    } else {
      writer.start_file(name, options).map_err(archive_err)?;
      let mut input = File::open(entry.path()).map_err(|e| archive_err(e.into()))?;
      io::copy(&mut input, &mut writer).map_err(|e| archive_err(e.into()))?;
    }
  }

  writer.finish().map_err(archive_err)?;
  Ok(())
}
