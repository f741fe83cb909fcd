use crate::mirror::domain::RecordKind;
use crate::mirror::policies::{FetchFailure, RetryPolicy};
use crate::mirror::services::NvdQuery;
use crate::ports::outbound::{NvdPage, NvdRepository, ProgressReporter};
use crate::shared::error::SyncError;
use crate::shared::Result;
use serde_json::Value;
use std::time::Duration;

/// FetchRecordsUseCase - Paginates one NVD query with retries
///
/// Pages are handed to the caller as they arrive instead of being collected,
/// so a full resync never holds the whole dataset in memory.
///
/// # Type Parameters
/// * `NR` - NvdRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct FetchRecordsUseCase<'a, NR, PR> {
    repository: &'a NR,
    progress_reporter: &'a PR,
    retry_policy: &'a RetryPolicy,
    request_delay: Duration,
}

impl<'a, NR, PR> FetchRecordsUseCase<'a, NR, PR>
where
    NR: NvdRepository,
    PR: ProgressReporter,
{
    pub fn new(
        repository: &'a NR,
        progress_reporter: &'a PR,
        retry_policy: &'a RetryPolicy,
        request_delay: Duration,
    ) -> Self {
        Self {
            repository,
            progress_reporter,
            retry_policy,
            request_delay,
        }
    }

    /// Fetches every page of `query`, calling `on_page` with each page's items
    ///
    /// The retry budget covers the whole pagination: retries spent on one
    /// page are not available to the next.
    ///
    /// # Returns
    /// Number of items received
    ///
    /// # Errors
    /// Fails on the first error that the retry policy gives up on, on a
    /// stalled page, or on any error returned by `on_page`.
    pub async fn fetch_all<F>(
        &self,
        kind: RecordKind,
        query: &NvdQuery,
        mut on_page: F,
    ) -> Result<usize>
    where
        F: FnMut(Vec<Value>) -> Result<()>,
    {
        let mut start_index: u64 = 0;
        let mut received: usize = 0;
        let mut retries_used: u32 = 0;

        loop {
            if start_index > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            let mut page = self
                .fetch_page_with_retry(kind, query, start_index, &mut retries_used)
                .await?;
            let items = std::mem::take(&mut page.items);

            received += items.len();
            on_page(items)?;

            let next_index = page.next_index();
            self.progress_reporter.report_progress(
                next_index.min(page.total_results) as usize,
                page.total_results as usize,
                Some(kind.display_name()),
            );

            if page.is_last() {
                return Ok(received);
            }
            if page.results_per_page == 0 {
                return Err(SyncError::PaginationStalled {
                    url: page.url,
                    start_index,
                    total_results: page.total_results,
                }
                .into());
            }
            start_index = next_index;
        }
    }

    async fn fetch_page_with_retry(
        &self,
        kind: RecordKind,
        query: &NvdQuery,
        start_index: u64,
        retries_used: &mut u32,
    ) -> Result<NvdPage> {
        loop {
            let error = match self.repository.fetch_page(kind, query, start_index).await {
                Ok(page) => return Ok(page),
                Err(error) => error,
            };

            let retryable = FetchFailure::classify(&error)
                .is_some_and(|failure| self.retry_policy.should_retry(failure, *retries_used + 1));
            if !retryable {
                return Err(error);
            }

            *retries_used += 1;
            let reason = error.to_string();
            self.progress_reporter.report_warning(&format!(
                "⚠️  {}. Trying again ({}) in {} seconds...",
                reason.lines().next().unwrap_or_default(),
                self.retry_policy.describe_retry(*retries_used),
                self.retry_policy.delay().as_secs()
            ));
            tokio::time::sleep(self.retry_policy.delay()).await;
        }
    }
}
