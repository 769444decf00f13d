//! File I/O utilities with atomic writes
//!
//! Settings files and generated artifacts are written to a temporary sibling
//! and renamed into place, so a failed write never leaves a truncated file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExpenseError;

/// Write raw bytes to a file atomically (write to temp, then rename)
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            ));
        }
    }

    let temp_path = temp_path_for(path);

    let result = (|| {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write JSON to a file atomically, creating parent directories
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let contents = serde_json::to_vec_pretty(data)
        .map_err(|e| ExpenseError::Config(format!("Failed to serialize data: {}", e)))?;

    write_bytes_atomic(path, &contents)
        .map_err(|e| ExpenseError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
