use crate::mirror::domain::date_window::MAX_WINDOW_DAYS;
use crate::mirror::domain::{SyncMode, Timestamp};
use crate::mirror::policies::RetryPolicy;
use std::time::Duration;

/// What to do after a successful sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOptions {
    /// Commit message; `{timestamp}` is replaced with the run timestamp
    pub message: String,
    /// Push the commit to the upstream branch
    pub push: bool,
}

impl CommitOptions {
    pub const DEFAULT_MESSAGE: &'static str = "NVD sync {timestamp}";

    pub fn new(message: String, push: bool) -> Self {
        Self { message, push }
    }

    /// Expands the `{timestamp}` placeholder
    pub fn render_message(&self, timestamp: &str) -> String {
        self.message.replace("{timestamp}", timestamp)
    }
}

/// SyncRequest - Internal request DTO for the mirror sync use case
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub mode: SyncMode,
    /// Upper bound of an incremental window and the run timestamp
    pub now: Timestamp,
    /// Longest `lastMod` range sent in a single query
    pub max_window_days: u32,
    pub retry_policy: RetryPolicy,
    /// Pause between two page requests
    pub request_delay: Duration,
    /// None = leave the working tree uncommitted
    pub commit: Option<CommitOptions>,
}

impl SyncRequest {
    pub fn new(mode: SyncMode, now: Timestamp) -> Self {
        let retry_policy = RetryPolicy::for_mode(
            &mode,
            RetryPolicy::DEFAULT_MAX_RETRIES,
            Duration::from_secs(RetryPolicy::DEFAULT_DELAY_SECS),
        );
        Self {
            mode,
            now,
            max_window_days: MAX_WINDOW_DAYS,
            retry_policy,
            request_delay: Duration::ZERO,
            commit: None,
        }
    }

    pub fn with_max_window_days(mut self, days: u32) -> Self {
        self.max_window_days = days;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_commit(mut self, commit: CommitOptions) -> Self {
        self.commit = Some(commit);
        self
    }
}
