//! Filesystem helpers for the file-backed key-value store.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Write `data` to `destination` through a sibling temp file and a rename.
///
/// Readers either see the previous document or the new one, never a torn write.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, written, synced, or renamed.
pub fn write_atomic(destination: &Path, data: &[u8]) -> io::Result<()> {
    let parent = destination.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent")
    })?;
    let filename = destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid file name"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(io::Error::other)?
        .as_nanos();
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;
    if let Err(err) = file.write_all(data).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    drop(file);

    replace_file(&temp_path, destination)
}

/// Move `source` over `destination`, retrying once after removing the target.
///
/// `fs::rename` refuses to overwrite on some platforms (notably Windows).
/// The source is removed if the retry fails too.
pub fn replace_file(source: &Path, destination: &Path) -> io::Result<()> {
    if let Err(first) = fs::rename(source, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(source, destination).map_err(|retry| {
            let _ = fs::remove_file(source);
            io::Error::new(
                retry.kind(),
                format!("rename failed (initial: {}, retry: {})", first, retry),
            )
        })?;
    }
    Ok(())
}
