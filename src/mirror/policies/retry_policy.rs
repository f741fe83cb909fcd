use crate::mirror::domain::SyncMode;
use crate::shared::error::SyncError;
use std::time::Duration;

/// Why a page request failed, as far as retrying is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The API answered with a non-success status
    Status(u16),
    /// No usable answer (connection, timeout, truncated body)
    Transport,
}

impl FetchFailure {
    /// Classifies an error returned by an `NvdRepository`
    ///
    /// Returns `None` for errors that are not fetch failures at all
    /// (malformed data, local I/O), which are never retried.
    pub fn classify(error: &anyhow::Error) -> Option<Self> {
        error
            .chain()
            .find_map(|cause| match cause.downcast_ref::<SyncError>() {
                Some(SyncError::ApiError { status, .. }) => Some(FetchFailure::Status(*status)),
                Some(SyncError::TransportError { .. }) => Some(FetchFailure::Transport),
                _ => None,
            })
    }

    /// 404 means the requested record or parameters do not exist
    pub fn is_permanent(&self) -> bool {
        matches!(self, FetchFailure::Status(404))
    }
}

/// Retry policy for NVD page requests
///
/// The NVD API is regularly slow or unavailable for minutes at a time, so
/// failures other than 404 are retried after a fixed delay. A resync
/// must not lose hours of progress to an outage and retries without limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: Option<u32>,
    delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_RETRIES: u32 = 100;
    pub const DEFAULT_DELAY_SECS: u64 = 10;

    pub fn limited(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries: Some(max_retries),
            delay,
        }
    }

    pub fn unlimited(delay: Duration) -> Self {
        Self {
            max_retries: None,
            delay,
        }
    }

    /// Limited retries for incremental and single-record runs, unlimited for a resync
    pub fn for_mode(mode: &SyncMode, max_retries: u32, delay: Duration) -> Self {
        if mode.is_resync() {
            Self::unlimited(delay)
        } else {
            Self::limited(max_retries, delay)
        }
    }

    /// Decides whether `retry_number` (1 for the first retry) may be attempted
    pub fn should_retry(&self, failure: FetchFailure, retry_number: u32) -> bool {
        if failure.is_permanent() {
            return false;
        }
        match self.max_retries {
            Some(max) => retry_number <= max,
            None => true,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Human readable `n/max` counter for progress messages
    pub fn describe_retry(&self, retry_number: u32) -> String {
        match self.max_retries {
            Some(max) => format!("{}/{}", retry_number, max),
            None => format!("{}/unlimited", retry_number),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::limited(
            Self::DEFAULT_MAX_RETRIES,
            Duration::from_secs(Self::DEFAULT_DELAY_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_never_retried() {
        let policy = RetryPolicy::unlimited(Duration::ZERO);
        assert!(!policy.should_retry(FetchFailure::Status(404), 1));
    }

    #[test]
    fn test_limited_policy_stops_after_max() {
        let policy = RetryPolicy::limited(3, Duration::ZERO);
        assert!(policy.should_retry(FetchFailure::Status(503), 1));
        assert!(policy.should_retry(FetchFailure::Transport, 3));
        assert!(!policy.should_retry(FetchFailure::Status(503), 4));
    }

    #[test]
    fn test_zero_retries_fails_fast() {
        let policy = RetryPolicy::limited(0, Duration::ZERO);
        assert!(!policy.should_retry(FetchFailure::Status(500), 1));
    }

    #[test]
    fn test_unlimited_policy_keeps_retrying() {
        let policy = RetryPolicy::unlimited(Duration::from_secs(10));
        assert!(policy.should_retry(FetchFailure::Status(503), 10_000));
        assert_eq!(policy.max_retries(), None);
        assert_eq!(policy.describe_retry(7), "7/unlimited");
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), Some(100));
        assert_eq!(policy.delay(), Duration::from_secs(10));
        assert_eq!(policy.describe_retry(1), "1/100");
    }

    #[test]
    fn test_classify_errors() {
        let api: anyhow::Error = SyncError::ApiError {
            status: 503,
            url: "u".to_string(),
            details: "d".to_string(),
        }
        .into();
        assert_eq!(FetchFailure::classify(&api), Some(FetchFailure::Status(503)));

        let transport: anyhow::Error = SyncError::TransportError {
            url: "u".to_string(),
            details: "timed out".to_string(),
        }
        .into();
        assert_eq!(
            FetchFailure::classify(&transport.context("page 3")),
            Some(FetchFailure::Transport)
        );

        let other = anyhow::anyhow!("disk full");
        assert_eq!(FetchFailure::classify(&other), None);
    }

    #[test]
    fn test_for_mode() {
        let delay = Duration::from_secs(1);
        assert_eq!(
            RetryPolicy::for_mode(&SyncMode::Incremental, 5, delay).max_retries(),
            Some(5)
        );
        assert_eq!(
            RetryPolicy::for_mode(&SyncMode::Resync, 5, delay).max_retries(),
            None
        );
    }
}
