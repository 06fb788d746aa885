//! Atomic file writes.
//!
//! All writes follow the same pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target path
//!
//! On POSIX, `rename()` within one filesystem is atomic and replaces the
//! destination, so readers observe either the old file or the complete new
//! one, never a partial write. On crash, a stray `.{filename}.tmp` may
//! remain in the target directory.
//!
//! The parent directory is not created here: the installer writes next to
//! an existing config location, and a missing parent is a caller error
//! surfaced as `NotFound` from the rename or create.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically write `content` to `path`.
///
/// The target file is either fully replaced or left untouched; errors from
/// any intermediate step clean up the temporary file.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let temp_path = temp_path_for(path)?;

    write_and_sync(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    // Sync the directory entry so the rename is durable too.
    #[cfg(unix)]
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        })
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Temporary file path in the same directory as the target, so the final
/// rename stays on one filesystem.
fn temp_path_for(target: &Path) -> io::Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new(""));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;

    Ok(parent.join(format!(".{filename}.tmp")))
}

fn write_and_sync(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(e);
    }

    Ok(())
}
