use super::record::RecordId;
use super::record_kind::RecordKind;

/// What a single run synchronizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncMode {
    /// Records modified since `syncdate.json`, then update it
    Incremental,
    /// Every record, then write a fresh `syncdate.json`
    Resync,
    /// One CVE; `syncdate.json` is left alone
    SingleCve(RecordId),
    /// One CPE match criteria; `syncdate.json` is left alone
    SingleMatchCriteria(RecordId),
}

impl SyncMode {
    /// Whether this mode reads and writes `syncdate.json`
    pub fn tracks_sync_state(&self) -> bool {
        matches!(self, SyncMode::Incremental | SyncMode::Resync)
    }

    /// Record kinds visited by this mode, in processing order
    pub fn kinds(&self) -> Vec<RecordKind> {
        match self {
            SyncMode::Incremental | SyncMode::Resync => RecordKind::SYNC_ORDER.to_vec(),
            SyncMode::SingleCve(_) => vec![RecordKind::Cve],
            SyncMode::SingleMatchCriteria(_) => vec![RecordKind::CpeMatch],
        }
    }

    pub fn is_resync(&self) -> bool {
        matches!(self, SyncMode::Resync)
    }

    pub fn describe(&self) -> String {
        match self {
            SyncMode::Incremental => "incremental sync".to_string(),
            SyncMode::Resync => "full resync".to_string(),
            SyncMode::SingleCve(id) => format!("single CVE {}", id),
            SyncMode::SingleMatchCriteria(id) => format!("single match criteria {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_tracking_state() {
        assert!(SyncMode::Incremental.tracks_sync_state());
        assert!(SyncMode::Resync.tracks_sync_state());

        let id = RecordId::new(RecordKind::Cve, "CVE-2024-0001").unwrap();
        assert!(!SyncMode::SingleCve(id).tracks_sync_state());
    }

    #[test]
    fn test_kinds_per_mode() {
        assert_eq!(
            SyncMode::Resync.kinds(),
            vec![RecordKind::CpeMatch, RecordKind::Cve]
        );

        let id = RecordId::new(
            RecordKind::CpeMatch,
            "36FBCF0F-8CEE-474C-8A04-5075AF53FAF4",
        )
        .unwrap();
        assert_eq!(
            SyncMode::SingleMatchCriteria(id).kinds(),
            vec![RecordKind::CpeMatch]
        );
    }

    #[test]
    fn test_describe() {
        let id = RecordId::new(RecordKind::Cve, "CVE-2024-0001").unwrap();
        assert_eq!(SyncMode::SingleCve(id).describe(), "single CVE CVE-2024-0001");
        assert_eq!(SyncMode::Resync.describe(), "full resync");
    }
}
