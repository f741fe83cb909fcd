mod cli;

use cli::Args;
use nvd_sync::adapters::outbound::console::StderrProgressReporter;
use nvd_sync::adapters::outbound::filesystem::FileSystemMirrorStore;
use nvd_sync::adapters::outbound::network::{NvdClient, NvdClientConfig};
use nvd_sync::adapters::outbound::vcs::GitCli;
use nvd_sync::application::dto::{CommitOptions, CommitOutcome, SyncRequest, SyncResponse};
use nvd_sync::application::use_cases::SyncMirrorUseCase;
use nvd_sync::config::{discover_config, load_config_from_path, Settings, SettingsOverrides};
use nvd_sync::mirror::domain::{timestamp, RecordId, RecordKind, SyncMode};
use nvd_sync::mirror::policies::RetryPolicy;
use nvd_sync::ports::outbound::ProgressReporter;
use nvd_sync::shared::error::{ExitCode, SyncError};
use nvd_sync::shared::Result;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    validate_repository_path(&args.path)?;

    // Merge config file, command line and defaults
    let config_file = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&args.path)?,
    };
    let settings = Settings::resolve(
        config_file,
        SettingsOverrides {
            api_url: args.api_url.clone(),
            api_key: args.api_key.clone(),
            commit: args.commit,
            push: args.push,
            commit_message: args.message.clone(),
        },
    )?;

    let mode = sync_mode(&args)?;

    // Create adapters (Dependency Injection)
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };
    let nvd_client = NvdClient::new(NvdClientConfig {
        base_url: settings.api_url.clone(),
        api_key: settings.api_key.clone(),
        timeout: settings.timeout,
    })?;
    if !nvd_client.has_api_key() {
        progress_reporter.report(&format!(
            "ℹ️  No NVD API key configured; waiting {} ms between requests",
            settings.request_delay.as_millis()
        ));
    }
    let mirror_store = FileSystemMirrorStore::new(args.path.clone());
    let version_control = settings.commit.then(|| {
        GitCli::new(
            args.path.clone(),
            settings.author_name.clone(),
            settings.author_email.clone(),
        )
    });

    // Create request
    let retry_policy = RetryPolicy::for_mode(&mode, settings.max_retries, settings.retry_delay);
    let mut request = SyncRequest::new(mode, timestamp::now())
        .with_max_window_days(settings.max_window_days)
        .with_retry_policy(retry_policy)
        .with_request_delay(settings.request_delay);
    if settings.commit {
        request = request.with_commit(CommitOptions::new(
            settings.commit_message.clone(),
            settings.push,
        ));
    }

    // Execute use case
    let use_case = SyncMirrorUseCase::new(
        nvd_client,
        mirror_store,
        progress_reporter,
        version_control,
    );
    let response = use_case.execute(request).await?;

    print!("{}", format_summary(&response));

    Ok(())
}

/// Picks the sync mode from the mutually exclusive mode flags
fn sync_mode(args: &Args) -> Result<SyncMode> {
    if let Some(id) = &args.cveid {
        return Ok(SyncMode::SingleCve(RecordId::new(RecordKind::Cve, id)?));
    }
    if let Some(id) = &args.matchid {
        return Ok(SyncMode::SingleMatchCriteria(RecordId::new(
            RecordKind::CpeMatch,
            id,
        )?));
    }
    if args.resync {
        return Ok(SyncMode::Resync);
    }
    Ok(SyncMode::Incremental)
}

/// Run summary printed on stdout
fn format_summary(response: &SyncResponse) -> String {
    let mut output = format!("nvd-sync: {}\n", response.mode.describe());
    for summary in &response.summaries {
        output.push_str(&format!("  {}\n", summary));
    }
    match response.commit {
        Some(CommitOutcome::Committed { pushed: true }) => {
            output.push_str("  commit: created and pushed\n")
        }
        Some(CommitOutcome::Committed { pushed: false }) => output.push_str("  commit: created\n"),
        Some(CommitOutcome::NoChanges) => output.push_str("  commit: no changes\n"),
        None => {}
    }
    output
}

fn validate_repository_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SyncError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for the mirror root
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| SyncError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(SyncError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: "Security: Repository path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(SyncError::InvalidRepositoryPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
