use gdk_lib::build::BuildSystem;
use gdk_lib::consts::{APP_NAME, CONFIG_FILE_NAME, RECIPE_FILE_NAMES};

use crate::output::print_stat;

pub fn cmd_info() {
  println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
  let systems: Vec<&str> = BuildSystem::ALL.iter().map(|system| system.as_str()).collect();
  print_stat("Build systems", systems.join(", "));
  print_stat("Project config", CONFIG_FILE_NAME);
  print_stat("Recipe files", RECIPE_FILE_NAMES.join(", "));
}
