use crate::shared::error::SyncError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum size accepted for `syncdate.json` (1 MB)
pub const MAX_STATE_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is checked, not its target.
/// A path that does not exist yet passes.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            anyhow::bail!(
                "Failed to read metadata for {} operation on {}: {}",
                operation,
                path.display(),
                e
            )
        }
    };

    if metadata.is_symlink() {
        return Err(SyncError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} operations on symbolic links are not allowed",
                operation
            ),
            hint: "Replace the symbolic link with a regular file or directory".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        return Err(SyncError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed; use a regular file".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates that a relative path stays inside the directory it is joined to
///
/// Record paths are derived from identifiers returned by the API, so they
/// must be plain relative paths without `..`, root or prefix components.
pub fn validate_relative_path(relative: &Path) -> Result<()> {
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));

    if escapes || relative.as_os_str().is_empty() {
        return Err(SyncError::SecurityError {
            path: relative.to_path_buf(),
            reason: "Path escapes the mirror repository".to_string(),
            hint: "Record identifiers must not contain path separators or '..'".to_string(),
        }
        .into());
    }

    Ok(())
}
