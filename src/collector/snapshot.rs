// src/collector/snapshot.rs
//! Publishing a snapshot without ever exposing a half-written file.

use crate::error::{CollectError, Result};
use crate::types::Snapshot;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `snapshot` next to `path`, then renames it over `path`.
///
/// # Errors
/// Returns error if serialization, the temp write, or the rename fails. The
/// previously published file is untouched in every failure case.
pub fn publish(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let body = snapshot.to_json_pretty()?;
    let temp_path = temp_path_for(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(source, parent))?;
    }

    if let Err(e) = write_synced(&temp_path, body.as_bytes()) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(e, &temp_path));
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        io_error(source, path)
    })
}

#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("snapshot"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn io_error(source: std::io::Error, path: &Path) -> CollectError {
    CollectError::Io {
        source,
        path: path.display().to_string(),
    }
}
