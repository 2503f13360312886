//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// legdq - data-quality reports for legislative sessions
///
/// Writes one `{state}_{session}_data_quality.json` file for every
/// session of the given state that has at least one bill.
///
/// Examples:
///   legdq Virginia --data ./snapshots
///   legdq va --data va.json --output-dir reports --pretty
///   legdq --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// State name or postal abbreviation (e.g. "Virginia" or "va")
    ///
    /// Used as given in the report file names.
    #[arg(value_name = "STATE", required_unless_present = "init_config")]
    pub state: Option<String>,

    /// Snapshot file or directory of snapshot files
    ///
    /// Overrides `store.path` from the config file.
    #[arg(short, long, value_name = "PATH", env = "LEGDQ_DATA")]
    pub data: Option<PathBuf>,

    /// Directory to write the session reports to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .legdq.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON reports
    #[arg(long)]
    pub pretty: bool,

    /// Keep going when a session fails, logging the error
    ///
    /// By default the first failing session aborts the run.
    #[arg(long)]
    pub keep_going: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .legdq.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The state argument, empty if not set (should be validated first).
    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        let state = self.state();
        if state.trim().is_empty() {
            return Err("State must not be empty".to_string());
        }

        // The state ends up in file names
        if state.contains(['/', '\\']) {
            return Err(format!("State must not contain path separators: {}", state));
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref data) = self.data {
            if !data.exists() {
                return Err(format!("Data path does not exist: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `general.verbose` from the config file;
    /// `--quiet` overrides it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
