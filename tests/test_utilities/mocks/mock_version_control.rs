use async_trait::async_trait;
use nvd_sync::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock VersionControl recording the commands it receives
#[derive(Clone)]
pub struct MockVersionControl {
    staged_changes: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockVersionControl {
    pub fn new(staged_changes: bool) -> Self {
        Self {
            staged_changes,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VersionControl for MockVersionControl {
    async fn stage(&self, paths: &[&str]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("add {}", paths.join(" ")));
        Ok(())
    }

    async fn has_staged_changes(&self, _paths: &[&str]) -> Result<bool> {
        self.calls.lock().unwrap().push("diff --cached".to_string());
        Ok(self.staged_changes)
    }

    async fn commit(&self, _paths: &[&str], message: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("commit {}", message));
        Ok(())
    }

    async fn push(&self) -> Result<()> {
        self.calls.lock().unwrap().push("push".to_string());
        Ok(())
    }
}
