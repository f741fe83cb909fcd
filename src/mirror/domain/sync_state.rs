use super::record_kind::RecordKind;
use super::timestamp::{self, Timestamp};
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Last-modified window of one record kind in `syncdate.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncWindow {
    #[serde(rename = "lastModStartDate")]
    pub last_mod_start_date: String,
    #[serde(rename = "lastModEndDate")]
    pub last_mod_end_date: String,
}

impl SyncWindow {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            last_mod_start_date: start.to_string(),
            last_mod_end_date: end.to_string(),
        }
    }
}

/// Contents of `syncdate.json`
///
/// `lastModEndDate` of each section is where the next incremental run
/// starts; it is the newest `lastModified` seen by the previous run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    pub vulnerabilities: SyncWindow,
    #[serde(rename = "matchStrings")]
    pub match_strings: SyncWindow,
}

impl SyncState {
    pub const EPOCH: &'static str = "1970-01-01";

    /// State a resync starts from
    pub fn epoch() -> Self {
        Self {
            vulnerabilities: SyncWindow::new(Self::EPOCH, Self::EPOCH),
            match_strings: SyncWindow::new(Self::EPOCH, Self::EPOCH),
        }
    }

    pub fn section(&self, kind: RecordKind) -> &SyncWindow {
        match kind {
            RecordKind::Cve => &self.vulnerabilities,
            RecordKind::CpeMatch => &self.match_strings,
        }
    }

    fn section_mut(&mut self, kind: RecordKind) -> &mut SyncWindow {
        match kind {
            RecordKind::Cve => &mut self.vulnerabilities,
            RecordKind::CpeMatch => &mut self.match_strings,
        }
    }

    /// Moves a kind's window forward after a run that persisted records
    ///
    /// The previous end becomes the new start and the watermark becomes the
    /// new end, both normalized.
    pub fn advance(&mut self, kind: RecordKind, watermark: &Timestamp) -> Result<()> {
        let section = self.section_mut(kind);

        section.last_mod_start_date =
            timestamp::normalize_timestamp(Some(section.last_mod_end_date.as_str()), watermark)?;
        section.last_mod_end_date = timestamp::format_timestamp(watermark);
        Ok(())
    }
}
