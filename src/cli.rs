//! CLI argument parsing for the unattended-config tool.
//!
//! Uses clap derive macros for declarative argument definitions. The tool
//! is a thin inspection/authoring surface over the library: it validates,
//! prints, and writes unattended config files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and author unattended-installation config files.
#[derive(Parser, Debug)]
#[command(name = "unattended-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a config file.
    ///
    /// Exits 0 if the file parses and validates, 2 if it does not exist,
    /// and 1 with a diagnostic naming the offending section otherwise.
    Validate(ValidateArgs),

    /// Print the parsed configuration.
    Show(ShowArgs),

    /// Write a fresh config file, backing up any existing one.
    ///
    /// Omitted flags are omitted from the file rather than written as
    /// empty keys. Prints the backup file name when one is made.
    Write(WriteArgs),
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the config file.
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the config file.
    pub path: PathBuf,

    /// Print as JSON instead of a human-readable summary.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Path to write the config file to.
    pub path: PathBuf,

    /// Locale identifier (e.g. pt_BR.utf8).
    #[arg(long)]
    pub locale: Option<String>,

    /// Image filename to install.
    #[arg(long)]
    pub image: Option<String>,

    /// Block device pattern: a full path for an exact match, or a bare
    /// prefix matched against device basenames.
    #[arg(long = "block-device")]
    pub block_device: Option<String>,

    /// DMI vendor string for a [Computer 1] section.
    #[arg(long)]
    pub vendor: Option<String>,

    /// DMI product string for a [Computer 1] section.
    #[arg(long)]
    pub product: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
