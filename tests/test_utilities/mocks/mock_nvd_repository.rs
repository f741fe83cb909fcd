use async_trait::async_trait;
use nvd_sync::prelude::*;
use nvd_sync::shared::error::SyncError;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub kind: RecordKind,
    pub params: Vec<(String, String)>,
    pub start_index: u64,
}

#[derive(Default)]
struct State {
    records: HashMap<RecordKind, Vec<Value>>,
    page_size: Option<usize>,
    failures: VecDeque<SyncError>,
    requests: Vec<RecordedRequest>,
}

/// Mock NvdRepository serving canned records in pages
///
/// Queries by identifier return only the matching record; window filters
/// are ignored. Scripted failures are returned before any page.
#[derive(Default, Clone)]
pub struct MockNvdRepository {
    state: Arc<Mutex<State>>,
}

impl MockNvdRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, kind: RecordKind, records: Vec<Value>) -> Self {
        self.state.lock().unwrap().records.insert(kind, records);
        self
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        self.state.lock().unwrap().page_size = Some(page_size);
        self
    }

    pub fn fail_next(self, error: SyncError) -> Self {
        self.state.lock().unwrap().failures.push_back(error);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl NvdRepository for MockNvdRepository {
    async fn fetch_page(
        &self,
        kind: RecordKind,
        query: &NvdQuery,
        start_index: u64,
    ) -> Result<NvdPage> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            kind,
            params: query.params().to_vec(),
            start_index,
        });

        if let Some(error) = state.failures.pop_front() {
            return Err(error.into());
        }

        let id_filter = query
            .params()
            .iter()
            .find(|(key, _)| key == kind.id_param())
            .map(|(_, value)| value.clone());
        let matching: Vec<Value> = state
            .records
            .get(&kind)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|record| match &id_filter {
                Some(id) => record[kind.object_key()][kind.id_field()] == id.as_str(),
                None => true,
            })
            .collect();

        let total = matching.len();
        let page_size = state.page_size.unwrap_or(2000);
        let items: Vec<Value> = matching
            .into_iter()
            .skip(start_index as usize)
            .take(page_size)
            .collect();

        Ok(NvdPage {
            url: format!("mock://{}?startIndex={}", kind.endpoint(), start_index),
            results_per_page: items.len() as u64,
            start_index,
            total_results: total as u64,
            items,
        })
    }
}
