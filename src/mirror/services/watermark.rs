use crate::mirror::domain::{Record, Timestamp};

/// Newest `lastModified` among the records persisted in a run
#[derive(Debug, Clone, Default)]
pub struct Watermark {
    latest: Option<Timestamp>,
}

impl Watermark {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &Record) {
        let candidate = record.last_modified();
        match self.latest {
            Some(latest) if latest >= *candidate => {}
            _ => self.latest = Some(*candidate),
        }
    }

    pub fn latest(&self) -> Option<&Timestamp> {
        self.latest.as_ref()
    }
}
