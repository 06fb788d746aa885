//! Error types for the unattended configuration subsystem.
//!
//! Uses thiserror for derive macros. Validation errors carry structured
//! context (section kind and ordinal) so callers can match on fields,
//! while the rendered message names the offending section for end users.

use crate::keyfile;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A required key of a `[Computer N]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerKey {
    Vendor,
    Product,
}

impl ComputerKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ComputerKey::Vendor => "vendor",
            ComputerKey::Product => "product",
        }
    }
}

impl fmt::Display for ComputerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying cause of a [`LoadError::Read`].
#[derive(Debug, Error)]
pub enum ReadCause {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Parse(#[from] keyfile::ParseError),
}

/// Structural problem with the `[Image]` section(s) of a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// More than one image section was declared.
    #[error("more than one image section declared: {}", render_image_ordinals(.ordinals))]
    Duplicate { ordinals: Vec<usize> },

    /// A `block-device` key with an empty value. An empty pattern would
    /// match every device, which is what omitting the key already means,
    /// so a blank value is treated as an authoring mistake.
    #[error("Image {ordinal} has an empty 'block-device' value; omit the key to match any device")]
    EmptyBlockDevice { ordinal: usize },
}

fn render_image_ordinals(ordinals: &[usize]) -> String {
    let names: Vec<String> = ordinals.iter().map(|n| format!("Image {n}")).collect();
    names.join(" and ")
}

/// Errors returned by [`Config::load`](crate::Config::load).
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file exists at the configured path.
    ///
    /// Deliberately not wrapped in a domain message: a missing unattended
    /// config is a normal outcome for the installer, and callers are
    /// expected to proceed without one rather than report an error.
    #[error(transparent)]
    NotFound(io::Error),

    /// The path exists but could not be read as a UTF-8 keyfile.
    #[error("failed to read unattended config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReadCause,
    },

    /// A `[Computer N]` section is missing a required key.
    #[error("Computer {ordinal} is missing the '{key}' key")]
    InvalidComputer { ordinal: usize, key: ComputerKey },

    /// The `[Image]` section(s) are structurally invalid.
    #[error("{0}")]
    InvalidImage(ImageError),
}

impl LoadError {
    /// True when the path simply did not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}

/// Errors returned by [`write_config`](crate::write_config).
#[derive(Debug, Error)]
pub enum WriteError {
    /// The target path has no usable file name to derive a backup from.
    #[error("config path '{path}' has no file name")]
    InvalidPath { path: PathBuf },

    /// The target path exists but is a directory, which backup-by-rename
    /// must not relocate.
    #[error("config path '{path}' is a directory")]
    TargetIsDirectory { path: PathBuf },

    /// A field value that cannot be represented in the keyfile format:
    /// a line break would start a new line and inject sections or keys
    /// the caller never asked for.
    #[error("value for '{key}' must not contain line breaks")]
    UnwritableValue { key: &'static str },

    /// Renaming the pre-existing file to its backup name failed. The
    /// original file is left untouched when this happens.
    #[error("failed to back up existing config '{path}' as '{backup}': {source}")]
    Backup {
        path: PathBuf,
        backup: String,
        #[source]
        source: io::Error,
    },

    /// Writing the new config file failed. Any pre-existing content has
    /// already been preserved under its backup name by this point.
    #[error("failed to write unattended config '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_computer_message_names_section_and_key() {
        let err = LoadError::InvalidComputer {
            ordinal: 2,
            key: ComputerKey::Vendor,
        };
        assert_eq!(err.to_string(), "Computer 2 is missing the 'vendor' key");
    }

    #[test]
    fn duplicate_image_message_names_every_ordinal() {
        let err = LoadError::InvalidImage(ImageError::Duplicate {
            ordinals: vec![1, 2],
        });
        let message = err.to_string();
        assert!(message.contains("Image 1"));
        assert!(message.contains("Image 2"));
    }

    #[test]
    fn empty_block_device_message_names_section() {
        let err = LoadError::InvalidImage(ImageError::EmptyBlockDevice { ordinal: 1 });
        assert!(err.to_string().contains("Image 1"));
        assert!(err.to_string().contains("block-device"));
    }

    #[test]
    fn not_found_passes_through_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = LoadError::NotFound(io_err);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no such file");
    }
}
