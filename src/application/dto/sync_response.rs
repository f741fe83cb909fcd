use crate::mirror::domain::{RecordKind, SyncMode, SyncState, Timestamp};
use crate::mirror::domain::timestamp::format_timestamp;
use crate::ports::outbound::WriteOutcome;
use std::fmt;

/// Per-kind counters of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSummary {
    pub kind: RecordKind,
    /// Records received from the API
    pub fetched: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Greatest `lastModified` among the fetched records
    pub latest_modified: Option<Timestamp>,
}

impl KindSummary {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fetched: 0,
            created: 0,
            updated: 0,
            unchanged: 0,
            latest_modified: None,
        }
    }

    pub fn record(&mut self, outcome: WriteOutcome) {
        self.fetched += 1;
        match outcome {
            WriteOutcome::Created => self.created += 1,
            WriteOutcome::Updated => self.updated += 1,
            WriteOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl fmt::Display for KindSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} fetched, {} created, {} updated, {} unchanged",
            self.kind.display_name(),
            self.fetched,
            self.created,
            self.updated,
            self.unchanged
        )?;
        if let Some(latest) = &self.latest_modified {
            write!(f, " (latest lastModified {})", format_timestamp(latest))?;
        }
        Ok(())
    }
}

/// Result of the commit step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { pushed: bool },
    /// Nothing staged, so nothing was committed
    NoChanges,
}

/// SyncResponse - Internal response DTO from the mirror sync use case
#[derive(Debug, Clone)]
pub struct SyncResponse {
    pub mode: SyncMode,
    pub summaries: Vec<KindSummary>,
    /// The sync state written to disk, if the mode tracks one
    pub sync_state: Option<SyncState>,
    /// None = commit was not requested
    pub commit: Option<CommitOutcome>,
}

impl SyncResponse {
    pub fn total_fetched(&self) -> usize {
        self.summaries.iter().map(|summary| summary.fetched).sum()
    }

    pub fn summary(&self, kind: RecordKind) -> Option<&KindSummary> {
        self.summaries.iter().find(|summary| summary.kind == kind)
    }
}
