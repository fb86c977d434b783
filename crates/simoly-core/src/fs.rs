//! Filesystem utilities for atomic writes of exported documents.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{FormError, Result};

/// Write `data` to `destination` via a synced temp file and a rename.
///
/// The temp file lives next to the destination so the rename stays on one
/// filesystem. Readers see either the old contents or the new ones.
pub fn write_atomic(destination: &Path, data: &[u8]) -> Result<()> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let filename = destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| FormError::InvalidInput("Invalid destination filename".to_string()))?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| FormError::Storage(format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| FormError::Storage(format!("Temp file create failed: {}", e)))?;
    file.write_all(data)
        .map_err(|e| FormError::Storage(format!("Temp file write failed: {}", e)))?;
    file.sync_all()
        .map_err(|e| FormError::Storage(format!("Temp file sync failed: {}", e)))?;

    rename_with_fallback(&temp_path, destination)
        .map_err(|e| FormError::Storage(format!("Atomic rename failed: {}", e)))
}

/// Rename a file, removing the destination first on platforms where rename
/// refuses to replace an existing file.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("form.json");

        write_atomic(&dest, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "{}");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("form.json");
        File::create(&dest).unwrap().write_all(b"old").unwrap();

        write_atomic(&dest, b"new").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_rename_overwrites_existing() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.txt");
        let dest = dir.path().join("dest.txt");

        File::create(&dest).unwrap().write_all(b"old").unwrap();
        File::create(&temp).unwrap().write_all(b"new").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }
}
