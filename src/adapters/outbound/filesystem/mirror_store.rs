use super::record_encoding::{encode_record, encode_sync_state};
use crate::mirror::domain::{Record, SyncState};
use crate::mirror::services::RecordLayout;
use crate::ports::outbound::{MirrorStore, WriteOutcome};
use crate::shared::error::SyncError;
use crate::shared::security::{
    validate_file_size, validate_not_symlink, validate_regular_file, validate_relative_path,
    MAX_STATE_FILE_SIZE,
};
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// FileSystemMirrorStore adapter for the mirror directory
///
/// This adapter implements the MirrorStore port. Writes go through a
/// temporary file in the target directory followed by a rename, so an
/// interrupted run never leaves a half-written record behind.
pub struct FileSystemMirrorStore {
    root: PathBuf,
}

impl FileSystemMirrorStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sync_state_path(&self) -> PathBuf {
        self.root.join(RecordLayout::SYNC_STATE_FILE)
    }

    /// Creates the directories leading to `relative` and checks that none
    /// of them, nor the target itself, is a symbolic link
    fn prepare_target(&self, relative: &Path) -> Result<PathBuf> {
        validate_relative_path(relative)?;

        let mut current = self.root.clone();
        let mut components = relative.components().peekable();
        while let Some(component) = components.next() {
            current.push(component);
            validate_not_symlink(&current, "write")?;
            if components.peek().is_some() && !current.is_dir() {
                fs::create_dir(&current).map_err(|e| SyncError::FileWriteError {
                    path: current.clone(),
                    details: format!("Failed to create directory: {}", e),
                })?;
            }
        }

        Ok(current)
    }

    /// Replaces `path` with `content` atomically
    fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
        let write_error = |details: String| SyncError::FileWriteError {
            path: path.to_path_buf(),
            details,
        };

        let parent = path
            .parent()
            .ok_or_else(|| write_error("Path has no parent directory".to_string()))?;

        let mut temp_file =
            NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
        temp_file
            .write_all(content)
            .map_err(|e| write_error(e.to_string()))?;

        // Temp files are created 0600; mirror files are meant to be world readable
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp_file
                .as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(|e| write_error(e.to_string()))?;
        }
        temp_file
            .persist(path)
            .map_err(|e| write_error(e.error.to_string()))?;

        Ok(())
    }
}

impl MirrorStore for FileSystemMirrorStore {
    fn write_record(&self, record: &Record) -> Result<WriteOutcome> {
        let relative = RecordLayout::relative_path(record.id());
        let path = self.prepare_target(&relative)?;
        let encoded = encode_record(record.document())?;

        let outcome = match fs::read(&path) {
            Ok(existing) if existing == encoded => return Ok(WriteOutcome::Unchanged),
            Ok(_) => WriteOutcome::Updated,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => WriteOutcome::Created,
            Err(e) => {
                return Err(SyncError::FileReadError {
                    path,
                    details: e.to_string(),
                }
                .into())
            }
        };

        Self::write_atomically(&path, &encoded)?;
        Ok(outcome)
    }

    fn load_sync_state(&self) -> Result<SyncState> {
        let path = self.sync_state_path();

        if fs::symlink_metadata(&path).is_err() {
            return Err(SyncError::SyncStateNotFound { path }.into());
        }

        validate_regular_file(&path, RecordLayout::SYNC_STATE_FILE)?;
        let metadata = fs::metadata(&path).map_err(|e| SyncError::FileReadError {
            path: path.clone(),
            details: e.to_string(),
        })?;
        validate_file_size(metadata.len(), &path, MAX_STATE_FILE_SIZE)?;

        let content = fs::read_to_string(&path).map_err(|e| SyncError::FileReadError {
            path: path.clone(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SyncError::SyncStateParseError {
                path,
                details: e.to_string(),
            }
            .into()
        })
    }

    fn save_sync_state(&self, state: &SyncState) -> Result<()> {
        let path = self.prepare_target(Path::new(RecordLayout::SYNC_STATE_FILE))?;
        let encoded = encode_sync_state(state)?;
        Self::write_atomically(&path, &encoded)
    }
}
