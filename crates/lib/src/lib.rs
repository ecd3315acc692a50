//! gdk-lib: build orchestration for Greengrass components.
//!
//! This crate holds everything the `gdk` binary needs to turn a component
//! project into deployable build output:
//! - `config`: loads `gdk-config.json` and the component recipe into a `ProjectConfig`
//! - `recipe`: typed recipe documents that round-trip through JSON and YAML
//! - `build`: stages the build root, runs the build system, reconciles artifacts
//!   against the recipe and writes the finalized recipe

pub mod build;
pub mod config;
pub mod consts;
pub mod recipe;
pub mod util;
