//! Unattended-installation configuration for an OS installer.
//!
//! An administrator drops a keyfile next to the installer image describing
//! how to run an installation without interactive prompts: which locale to
//! use, which machines the file applies to, and which image goes onto
//! which block device. This crate is the one place where parsing that
//! file, validating it with precise diagnostics, and persisting it
//! crash-safely intersect; the installer's UI and imaging pipeline consume
//! the [`Config`] it produces.
//!
//! ```no_run
//! use unattended_config::Config;
//!
//! match Config::load("/run/media/installer/unattended.ini") {
//!     Ok(config) => {
//!         if config.matches_device("/dev/sda") {
//!             // proceed with config.image() ...
//!         }
//!     }
//!     Err(e) if e.is_not_found() => {
//!         // no unattended config present; run interactively
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod keyfile;

pub use config::{
    ComputerMatch, ComputerMatcher, Config, ConfigFields, DeviceMatcher, ImageSpec,
    derive_backup_name, write_config,
};
pub use error::{LoadError, WriteError};
