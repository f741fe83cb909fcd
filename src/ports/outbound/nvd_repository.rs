use crate::mirror::domain::RecordKind;
use crate::mirror::services::NvdQuery;
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One page of an NVD API 2.0 response
#[derive(Debug, Clone, PartialEq)]
pub struct NvdPage {
    /// URL the page was requested from (for diagnostics)
    pub url: String,
    pub results_per_page: u64,
    pub start_index: u64,
    pub total_results: u64,
    /// Elements of the kind's result array, untouched
    pub items: Vec<Value>,
}

impl NvdPage {
    /// Index of the first record after this page
    pub fn next_index(&self) -> u64 {
        self.start_index + self.results_per_page
    }

    /// Whether the API has no more records after this page
    pub fn is_last(&self) -> bool {
        self.next_index() >= self.total_results
    }
}

/// NvdRepository port for reading records from the NVD REST API
///
/// Implementations make exactly one request per call. Retrying and
/// pagination belong to the caller.
///
/// # Errors
/// Failed requests must surface as `SyncError::ApiError` (non-success
/// status) or `SyncError::TransportError` (no usable response), so the
/// caller's retry policy can tell them apart.
#[async_trait]
pub trait NvdRepository: Send + Sync {
    /// Fetches the page starting at `start_index` for `query`
    async fn fetch_page(
        &self,
        kind: RecordKind,
        query: &NvdQuery,
        start_index: u64,
    ) -> Result<NvdPage>;
}
