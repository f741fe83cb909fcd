use crate::application::dto::{CommitOptions, CommitOutcome, KindSummary, SyncRequest, SyncResponse};
use crate::application::use_cases::FetchRecordsUseCase;
use crate::mirror::domain::timestamp::format_timestamp;
use crate::mirror::domain::{Record, RecordKind, SyncMode, SyncState};
use crate::mirror::services::{QueryPlanner, RecordLayout, Watermark};
use crate::ports::outbound::{MirrorStore, NvdRepository, ProgressReporter, VersionControl};
use crate::shared::error::SyncError;
use crate::shared::Result;

/// SyncMirrorUseCase - Core use case for mirroring NVD records
///
/// This use case orchestrates one sync run using generic dependency
/// injection for all infrastructure dependencies: it plans the queries
/// for the requested mode, paginates them, writes every record, advances
/// `syncdate.json` and optionally commits the result.
///
/// # Type Parameters
/// * `NR` - NvdRepository implementation
/// * `MS` - MirrorStore implementation
/// * `PR` - ProgressReporter implementation
/// * `VC` - VersionControl implementation (optional)
pub struct SyncMirrorUseCase<NR, MS, PR, VC> {
    nvd_repository: NR,
    mirror_store: MS,
    progress_reporter: PR,
    version_control: Option<VC>,
}

impl<NR, MS, PR, VC> SyncMirrorUseCase<NR, MS, PR, VC>
where
    NR: NvdRepository,
    MS: MirrorStore,
    PR: ProgressReporter,
    VC: VersionControl,
{
    /// Creates a new SyncMirrorUseCase with injected dependencies
    pub fn new(
        nvd_repository: NR,
        mirror_store: MS,
        progress_reporter: PR,
        version_control: Option<VC>,
    ) -> Self {
        Self {
            nvd_repository,
            mirror_store,
            progress_reporter,
            version_control,
        }
    }

    /// Executes one sync run
    ///
    /// Any fetch error aborts the run before the sync state is written or
    /// anything is committed.
    pub async fn execute(&self, request: SyncRequest) -> Result<SyncResponse> {
        self.progress_reporter
            .report(&format!("🔄 Starting {}", request.mode.describe()));

        // Step 1: Load the sync state the mode works from
        let mut sync_state = self.initial_sync_state(&request.mode)?;

        // Step 2: Mirror each record kind and advance its section
        let mut summaries = Vec::new();
        for kind in request.mode.kinds() {
            let summary = self.sync_kind(&request, kind, sync_state.as_ref()).await?;
            if let (Some(state), Some(latest)) = (sync_state.as_mut(), &summary.latest_modified) {
                state.advance(kind, latest)?;
            }
            summaries.push(summary);
        }

        // Step 3: Persist the advanced sync state
        if let Some(state) = &sync_state {
            self.mirror_store.save_sync_state(state)?;
            self.progress_reporter
                .report(&format!("📝 Updated {}", RecordLayout::SYNC_STATE_FILE));
        }

        // Step 4: Commit if requested
        let commit = match &request.commit {
            Some(options) => Some(self.commit_changes(options, &request).await?),
            None => None,
        };

        Ok(SyncResponse {
            mode: request.mode,
            summaries,
            sync_state,
            commit,
        })
    }

    fn initial_sync_state(&self, mode: &SyncMode) -> Result<Option<SyncState>> {
        match mode {
            SyncMode::Incremental => {
                let state = self.mirror_store.load_sync_state()?;
                for kind in RecordKind::SYNC_ORDER {
                    self.progress_reporter.report(&format!(
                        "📖 {}: {} modified since {}",
                        RecordLayout::SYNC_STATE_FILE,
                        kind.state_section(),
                        state.section(kind).last_mod_end_date
                    ));
                }
                Ok(Some(state))
            }
            SyncMode::Resync => Ok(Some(SyncState::epoch())),
            SyncMode::SingleCve(_) | SyncMode::SingleMatchCriteria(_) => Ok(None),
        }
    }

    /// Fetches and writes all records of `kind` for the request's mode
    async fn sync_kind(
        &self,
        request: &SyncRequest,
        kind: RecordKind,
        sync_state: Option<&SyncState>,
    ) -> Result<KindSummary> {
        let queries = QueryPlanner::plan(
            &request.mode,
            kind,
            sync_state,
            &request.now,
            request.max_window_days,
        )?;

        let fetcher = FetchRecordsUseCase::new(
            &self.nvd_repository,
            &self.progress_reporter,
            &request.retry_policy,
            request.request_delay,
        );
        let mut summary = KindSummary::new(kind);
        let mut watermark = Watermark::new();

        for (index, query) in queries.iter().enumerate() {
            if index > 0 && !request.request_delay.is_zero() {
                tokio::time::sleep(request.request_delay).await;
            }
            self.progress_reporter.report(&format!(
                "📥 Fetching {} records ({})",
                kind.display_name(),
                query.describe()
            ));

            fetcher
                .fetch_all(kind, query, |items| {
                    for item in items {
                        let record = Record::from_document(kind, item)?;
                        let outcome = self.mirror_store.write_record(&record)?;
                        watermark.observe(&record);
                        summary.record(outcome);
                    }
                    Ok(())
                })
                .await?;
        }

        summary.latest_modified = watermark.latest().copied();

        if summary.fetched == 0 && !request.mode.tracks_sync_state() {
            self.progress_reporter.report_warning(&format!(
                "⚠️  The NVD API returned no record for {}",
                request.mode.describe()
            ));
        }
        self.progress_reporter
            .report_completion(&format!("✅ {}", summary));

        Ok(summary)
    }

    /// Stages the mirror paths and commits them if anything changed
    async fn commit_changes(
        &self,
        options: &CommitOptions,
        request: &SyncRequest,
    ) -> Result<CommitOutcome> {
        let version_control = self.version_control.as_ref().ok_or_else(|| SyncError::Validation {
            message: "Commit requested but no version control is configured".to_string(),
        })?;

        let paths = RecordLayout::tracked_paths();
        version_control.stage(&paths).await?;

        if !version_control.has_staged_changes(&paths).await? {
            self.progress_reporter
                .report("ℹ️  No changes to commit");
            return Ok(CommitOutcome::NoChanges);
        }

        let message = options.render_message(&format_timestamp(&request.now));
        version_control.commit(&paths, &message).await?;
        self.progress_reporter
            .report_completion(&format!("✅ Committed: {}", message));

        if options.push {
            version_control.push().await?;
            self.progress_reporter.report_completion("✅ Pushed");
        }

        Ok(CommitOutcome::Committed {
            pushed: options.push,
        })
    }
}
