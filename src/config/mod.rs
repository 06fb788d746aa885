//! Unattended-installation configuration.
//!
//! This module owns the on-disk format: loading and validating a config
//! file into a read-only [`Config`], the matching predicates the installer
//! asks of it, and writing a fresh file back with backup semantics.

mod load;
mod matching;
mod model;
mod write;


// Re-export public API
pub use load::SETTINGS_SECTION;
pub use model::{ComputerMatch, ComputerMatcher, Config, DeviceMatcher, ImageSpec};
pub use write::{ConfigFields, derive_backup_name, write_config};
