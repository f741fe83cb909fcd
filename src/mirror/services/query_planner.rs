use crate::mirror::domain::timestamp::{self, Timestamp};
use crate::mirror::domain::{DateWindow, RecordId, RecordKind, SyncMode, SyncState};
use crate::shared::error::SyncError;
use crate::shared::Result;

/// Filter parameters of one paginated NVD query (without `startIndex`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NvdQuery {
    params: Vec<(String, String)>,
}

impl NvdQuery {
    /// Every record of a kind
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// A single record by identifier
    pub fn for_id(id: &RecordId) -> Self {
        Self {
            params: vec![(id.kind().id_param().to_string(), id.as_str().to_string())],
        }
    }

    /// Records last modified inside `window`
    pub fn for_window(window: &DateWindow) -> Self {
        Self {
            params: vec![
                ("lastModStartDate".to_string(), window.start_param()),
                ("lastModEndDate".to_string(), window.end_param()),
            ],
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn describe(&self) -> String {
        if self.params.is_empty() {
            return "all records".to_string();
        }
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Turns a sync mode into the queries to run for one record kind
pub struct QueryPlanner;

impl QueryPlanner {
    /// Plans the queries for `kind`
    ///
    /// An incremental sync starts at the kind's last `lastModEndDate` and
    /// ends at `now`, split into windows the API accepts. A kind that the
    /// mode does not cover gets no queries.
    pub fn plan(
        mode: &SyncMode,
        kind: RecordKind,
        state: Option<&SyncState>,
        now: &Timestamp,
        max_window_days: u32,
    ) -> Result<Vec<NvdQuery>> {
        match mode {
            SyncMode::Resync => Ok(vec![NvdQuery::unfiltered()]),
            SyncMode::SingleCve(id) | SyncMode::SingleMatchCriteria(id) => {
                if id.kind() == kind {
                    Ok(vec![NvdQuery::for_id(id)])
                } else {
                    Ok(vec![])
                }
            }
            SyncMode::Incremental => {
                let state = state.ok_or_else(|| SyncError::Validation {
                    message: "An incremental sync needs the previous sync state".to_string(),
                })?;
                let start = timestamp::parse_timestamp(&state.section(kind).last_mod_end_date)?;
                let window = DateWindow::new(start, *now);

                Ok(window
                    .split(max_window_days)
                    .iter()
                    .map(NvdQuery::for_window)
                    .collect())
            }
        }
    }
}
