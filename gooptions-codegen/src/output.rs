//! Destination resolution and writing.

use crate::error::CodegenError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the default file name for a record type: `User` -> `user_options.go`.
#[must_use]
pub fn default_file_name(type_name: &str) -> String {
    format!("{type_name}_options.go").to_lowercase()
}

/// Resolves where the generated file goes.
///
/// Without an explicit destination the default file name is used. Relative
/// paths are joined onto `source_dir`.
#[must_use]
pub fn resolve_destination(
    type_name: &str,
    source_dir: &Path,
    destination: Option<&Path>,
) -> PathBuf {
    let destination = match destination {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_file_name(type_name)),
    };

    if destination.is_absolute() {
        destination
    } else {
        source_dir.join(destination)
    }
}

/// Writes `contents` to `path`, creating parent directories.
///
/// The contents go to a temporary file next to the destination which is
/// then renamed over it, so a failed write leaves no partial output.
///
/// # Errors
/// Returns `CodegenError::Output` if the destination cannot be written.
pub fn write_output(path: &Path, contents: &str) -> Result<(), CodegenError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&dir).map_err(|e| CodegenError::output(path, e))?;

    let mut file =
        tempfile::NamedTempFile::new_in(&dir).map_err(|e| CodegenError::output(path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| CodegenError::output(path, e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| CodegenError::output(path, e))?;
    file.persist(path)
        .map_err(|e| CodegenError::output(path, e.error))?;

    tracing::info!("wrote {}", path.display());
    Ok(())
}
