//! Terminal output for the `gdk` commands.
//!
//! Status lines go to stdout, errors to stderr. Colors are only emitted when
//! the target stream supports them.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const ARTIFACT: &str = "→";
}

const SIZE_UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// Human-readable artifact size, in binary units.
pub fn format_bytes(bytes: u64) -> String {
  if bytes < 1024 {
    return format!("{bytes} B");
  }
  let mut value = bytes as f64 / 1024.0;
  let mut unit = 0;
  while value >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
    value /= 1024.0;
    unit += 1;
  }
  format!("{value:.1} {}", SIZE_UNITS[unit])
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  match secs {
    60.. => format!("{}m {}s", secs / 60, secs % 60),
    1.. => format!("{secs}.{:02}s", duration.subsec_millis() / 10),
    0 => format!("{}ms", duration.subsec_millis()),
  }
}

pub fn print_success(message: impl Display) {
  println!("{} {message}", symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()));
}

pub fn print_info(message: impl Display) {
  println!("{} {message}", symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()));
}

/// Print an error, one line per line of `message`.
///
/// Build failures carry the failed stage on the first line and its cause
/// below, so continuation lines are indented under the symbol.
pub fn print_error(message: &str) {
  let mut lines = message.lines();
  let first = lines.next().unwrap_or_default();
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    first.if_supports_color(Stream::Stderr, |s| s.red())
  );
  for line in lines {
    eprintln!("  {}", line.if_supports_color(Stream::Stderr, |s| s.red()));
  }
}

pub fn print_stat(label: &str, value: impl Display) {
  println!("  {}: {value}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}

/// Print a staged artifact with its size when it can be read.
pub fn print_artifact(path: &Path) {
  let size = std::fs::metadata(path).map(|m| format_bytes(m.len()));
  let arrow = symbols::ARTIFACT.if_supports_color(Stream::Stdout, |s| s.cyan());
  match size {
    Ok(size) => println!("  {arrow} {} ({size})", path.display()),
    Err(_) => println!("  {arrow} {}", path.display()),
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize build output to JSON")?;
  println!("{json}");
  Ok(())
}
