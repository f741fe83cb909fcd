use crate::mirror::domain::{RecordId, RecordKind};
use std::path::PathBuf;

/// Where things live inside the mirror repository
///
/// ```text
/// <root>/cve/<year>/<CVE-ID>.json
/// <root>/cpematch/<first two chars>/<matchCriteriaId>.json
/// <root>/syncdate.json
/// ```
pub struct RecordLayout;

impl RecordLayout {
    pub const SYNC_STATE_FILE: &'static str = "syncdate.json";

    /// Path of a record relative to the mirror root
    pub fn relative_path(id: &RecordId) -> PathBuf {
        PathBuf::from(id.kind().storage_root())
            .join(id.bucket())
            .join(format!("{}.json", id.as_str()))
    }

    /// Mirror paths that are staged and committed after a sync
    pub fn tracked_paths() -> Vec<&'static str> {
        vec![
            RecordKind::Cve.storage_root(),
            RecordKind::CpeMatch.storage_root(),
            Self::SYNC_STATE_FILE,
        ]
    }
}
