use crate::mirror::domain::{Record, SyncState};
use crate::shared::Result;

/// Result of persisting one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record did not exist in the mirror
    Created,
    /// The record existed with different content
    Updated,
    /// The record existed with identical content and was not rewritten
    Unchanged,
}

/// MirrorStore port for the on-disk mirror
///
/// This port abstracts where records and the sync state are kept, so the
/// sync use case can run against an in-memory store in tests.
pub trait MirrorStore {
    /// Persists a record at its layout path
    ///
    /// # Errors
    /// Returns an error if the record cannot be encoded or written
    fn write_record(&self, record: &Record) -> Result<WriteOutcome>;

    /// Loads `syncdate.json`
    ///
    /// # Errors
    /// Returns `SyncError::SyncStateNotFound` if the file does not exist
    /// and `SyncError::SyncStateParseError` if it cannot be parsed
    fn load_sync_state(&self) -> Result<SyncState>;

    /// Overwrites `syncdate.json`
    fn save_sync_state(&self, state: &SyncState) -> Result<()>;
}
