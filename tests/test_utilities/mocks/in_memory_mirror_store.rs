use nvd_sync::prelude::*;
use nvd_sync::shared::error::SyncError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    records: HashMap<String, Value>,
    sync_state: Option<SyncState>,
    saves: usize,
}

/// In-memory MirrorStore keyed by record identifier
#[derive(Default, Clone)]
pub struct InMemoryMirrorStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryMirrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync_state(self, sync_state: SyncState) -> Self {
        self.state.lock().unwrap().sync_state = Some(sync_state);
        self
    }

    pub fn record(&self, id: &str) -> Option<Value> {
        self.state.lock().unwrap().records.get(id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    pub fn sync_state(&self) -> Option<SyncState> {
        self.state.lock().unwrap().sync_state.clone()
    }

    pub fn save_count(&self) -> usize {
        self.state.lock().unwrap().saves
    }
}

impl MirrorStore for InMemoryMirrorStore {
    fn write_record(&self, record: &Record) -> Result<WriteOutcome> {
        let mut state = self.state.lock().unwrap();
        let previous = state
            .records
            .insert(record.id().to_string(), record.document().clone());
        Ok(match previous {
            None => WriteOutcome::Created,
            Some(previous) if previous == *record.document() => WriteOutcome::Unchanged,
            Some(_) => WriteOutcome::Updated,
        })
    }

    fn load_sync_state(&self) -> Result<SyncState> {
        self.state
            .lock()
            .unwrap()
            .sync_state
            .clone()
            .ok_or_else(|| {
                SyncError::SyncStateNotFound {
                    path: RecordLayout::SYNC_STATE_FILE.into(),
                }
                .into()
            })
    }

    fn save_sync_state(&self, sync_state: &SyncState) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.sync_state = Some(sync_state.clone());
        state.saves += 1;
        Ok(())
    }
}
