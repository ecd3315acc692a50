//! Shared utilities.
//!
//! Filesystem helpers used by the build stages, plus test helpers.

pub mod fs;

#[cfg(test)]
pub mod testutil;
