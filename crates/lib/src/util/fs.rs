//! Filesystem helpers.
//!
//! Existence checks that never fail (an unreadable path simply does not exist),
//! a directory removal that treats a missing directory as already clean, and
//! lookup of resource files installed next to the executable.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::STATIC_DIR_NAME;

/// Returns true if `path` exists and is a regular file.
pub fn file_exists(path: &Path) -> bool {
  debug!(path = %path.display(), "checking if file exists");
  path.is_file()
}

/// Returns true if `path` exists and is a directory.
pub fn dir_exists(path: &Path) -> bool {
  debug!(path = %path.display(), "checking if directory exists");
  path.is_dir()
}

/// Returns true if `path` is an existing directory with no entries.
pub fn is_directory_empty(path: &Path) -> bool {
  match path.read_dir() {
    Ok(mut entries) => entries.next().is_none(),
    Err(_) => false,
  }
}

/// Recursively delete a directory.
///
/// A directory that does not exist is not an error.
pub fn clean_dir(path: &Path) -> io::Result<()> {
  debug!(path = %path.display(), "deleting directory if it exists");
  match std::fs::remove_dir_all(path) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e),
  }
}

/// Path of `name` inside the `static` folder next to the running executable.
///
/// Returns `None` when the executable cannot be located or the file does not exist.
pub fn static_file_path(name: &str) -> Option<PathBuf> {
  let exe = std::env::current_exe().ok()?;
  let exe = dunce::canonicalize(&exe).unwrap_or(exe);
  static_file_in(exe.parent()?, name)
}

fn static_file_in(install_dir: &Path, name: &str) -> Option<PathBuf> {
  let path = install_dir.join(STATIC_DIR_NAME).join(name);
  file_exists(&path).then_some(path)
}
