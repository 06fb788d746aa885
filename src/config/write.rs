//! Writing a fresh unattended config file, preserving any existing one.
//!
//! The write sequence is: rename any pre-existing file at the target path
//! to a collision-free backup name in the same directory, then atomically
//! write the new content (temp file + rename). The old content survives
//! under the backup name even if the new write fails, and the target path
//! never holds a half-written file.
//!
//! Concurrent writes to the same path race at the filesystem level (last
//! rename wins); callers needing exclusion must provide their own.

use super::load::{
    BLOCK_DEVICE_KEY, FILENAME_KEY, IMAGE_SECTION, LOCALE_KEY, PRODUCT_KEY, SETTINGS_SECTION,
    VENDOR_KEY,
};
use crate::error::WriteError;
use crate::fs::atomic_write;
use crate::keyfile::Builder;
use chrono::Local;
use std::fs;
use std::path::Path;

/// Field values to serialize. `None` fields are omitted from the file
/// entirely rather than written as empty keys, so a subsequent load
/// round-trips to the same optionality.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigFields<'a> {
    pub locale: Option<&'a str>,
    pub image_filename: Option<&'a str>,
    pub block_device: Option<&'a str>,
    pub vendor: Option<&'a str>,
    pub product: Option<&'a str>,
}

/// Serialize `fields` to `path`, backing up any existing file first.
///
/// Returns the file name of the backup when one was made, or `None` when
/// nothing pre-existed at `path`. At most one `[Computer 1]` section is
/// emitted, driven by whether vendor/product are supplied; this writer
/// never appends to multi-computer files.
pub fn write_config<P: AsRef<Path>>(
    path: P,
    fields: &ConfigFields<'_>,
) -> Result<Option<String>, WriteError> {
    let path = path.as_ref();

    // Validate before touching the filesystem: a rejected write must not
    // have renamed anything away.
    check_writable(LOCALE_KEY, fields.locale)?;
    check_writable(VENDOR_KEY, fields.vendor)?;
    check_writable(PRODUCT_KEY, fields.product)?;
    check_writable(FILENAME_KEY, fields.image_filename)?;
    check_writable(BLOCK_DEVICE_KEY, fields.block_device)?;

    if path.is_dir() {
        return Err(WriteError::TargetIsDirectory {
            path: path.to_owned(),
        });
    }

    let backup = if path.exists() {
        Some(back_up_existing(path)?)
    } else {
        None
    };

    atomic_write(path, render(fields).as_bytes()).map_err(|e| WriteError::Write {
        path: path.to_owned(),
        source: e,
    })?;

    Ok(backup)
}

/// A value containing a line break would terminate its `key=value` line
/// early and turn the remainder into sections or keys the caller never
/// supplied, so such values are rejected up front.
fn check_writable(key: &'static str, value: Option<&str>) -> Result<(), WriteError> {
    match value {
        Some(v) if v.contains(['\n', '\r']) => Err(WriteError::UnwritableValue { key }),
        _ => Ok(()),
    }
}

/// Rename the existing file at `path` out of the way, returning the
/// backup's file name.
fn back_up_existing(path: &Path) -> Result<String, WriteError> {
    let basename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| WriteError::InvalidPath {
            path: path.to_owned(),
        })?;
    let parent = path.parent().unwrap_or(Path::new(""));

    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let mut backup = derive_backup_name(basename, &stamp);
    let mut attempt = 1;
    while parent.join(&backup).exists() {
        attempt += 1;
        backup = derive_backup_name(basename, &format!("{stamp}-{attempt}"));
    }

    fs::rename(path, parent.join(&backup)).map_err(|e| WriteError::Backup {
        path: path.to_owned(),
        backup: backup.clone(),
        source: e,
    })?;

    Ok(backup)
}

/// Derive a backup file name from `basename`, inserting `uniquifier`
/// before the extension so the extension (if any) is preserved:
/// `unattended.ini` becomes `unattended.<uniquifier>.ini`, `unattended`
/// becomes `unattended.<uniquifier>`. Pure string logic, no filesystem
/// access.
pub fn derive_backup_name(basename: &str, uniquifier: &str) -> String {
    match basename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => {
            format!("{stem}.{uniquifier}.{extension}")
        }
        _ => format!("{basename}.{uniquifier}"),
    }
}

fn render(fields: &ConfigFields<'_>) -> String {
    let mut builder = Builder::new();

    if let Some(locale) = fields.locale {
        builder.section(SETTINGS_SECTION);
        builder.entry(LOCALE_KEY, locale);
    }

    if fields.vendor.is_some() || fields.product.is_some() {
        builder.section("Computer 1");
        if let Some(vendor) = fields.vendor {
            builder.entry(VENDOR_KEY, vendor);
        }
        if let Some(product) = fields.product {
            builder.entry(PRODUCT_KEY, product);
        }
    }

    if fields.image_filename.is_some() || fields.block_device.is_some() {
        builder.section(IMAGE_SECTION);
        if let Some(filename) = fields.image_filename {
            builder.entry(FILENAME_KEY, filename);
        }
        if let Some(pattern) = fields.block_device {
            builder.entry(BLOCK_DEVICE_KEY, pattern);
        }
    }

    builder.finish()
}
