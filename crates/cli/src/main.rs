mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// Environment variable holding `tracing` filter directives.
const LOG_ENV: &str = "GDK_LOG";

/// gdk - build Greengrass components
#[derive(Parser)]
#[command(name = "gdk")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  debug: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Work with the component in a project directory
  Component {
    #[command(subcommand)]
    command: ComponentCommands,
  },

  /// Show version and supported build systems
  Info,
}

#[derive(Subcommand)]
enum ComponentCommands {
  /// Build the component artifacts and recipe into greengrass-build/
  Build {
    /// Project directory containing gdk-config.json
    #[arg(short, long, default_value = ".")]
    project_dir: PathBuf,

    /// Use the zip build regardless of the configured build system
    #[arg(long)]
    force_zip: bool,

    /// Output format for the build summary
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.debug { "debug" } else { "info" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Component { command } => match command {
      ComponentCommands::Build {
        project_dir,
        force_zip,
        format,
      } => cmd::cmd_build(&project_dir, force_zip, format),
    },
    Commands::Info => {
      cmd::cmd_info();
      Ok(())
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      output::print_error(&err.to_string());
      ExitCode::FAILURE
    }
  }
}
