//! Filesystem primitives used by the pipeline.
//!
//! Each helper maps `std::io::Error` into the matching [`SnapDiffError`] variant so
//! callers can propagate with `?`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{io_err, SnapDiffError};

/// Reads a required input file.
pub fn read_required(path: &Path) -> Result<String, SnapDiffError> {
    fs::read_to_string(path).map_err(|e| io_err!(Read, path, e))
}

/// Reads a file that may legitimately be absent.
pub fn read_optional(path: &Path) -> Result<Option<String>, SnapDiffError> {
    if !path.exists() {
        return Ok(None);
    }
    read_required(path).map(Some)
}

/// Writes `contents`, creating parent directories when missing.
pub fn write(path: &Path, contents: &str) -> Result<(), SnapDiffError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).map_err(|e| io_err!(Write, path, e))
}

/// Removes `path` if it exists. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool, SnapDiffError> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| io_err!(Remove, path, e))?;
    Ok(true)
}

pub fn ensure_dir(path: &Path) -> Result<(), SnapDiffError> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| io_err!(CreateDir, path, e))
}

/// Lists the file names directly inside `dir`, sorted.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>, SnapDiffError> {
    let entries = fs::read_dir(dir).map_err(|e| io_err!(ListDir, dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err!(ListDir, dir, e))?;
        let path: PathBuf = entry.path();
        if !path.is_file() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
