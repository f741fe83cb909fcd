//! nvd-sync - NVD mirror for git repositories
//!
//! This library keeps a directory of JSON files in step with the NVD REST
//! API 2.0: one file per CVE and per CPE match criteria, plus
//! `syncdate.json` recording how far each kind has been mirrored. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`mirror`): Records, sync state, windows and retry policy
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): NVD client, mirror store, git, console output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use nvd_sync::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = SyncMirrorUseCase::new(
//!     NvdClient::new(NvdClientConfig::default())?,
//!     FileSystemMirrorStore::new(PathBuf::from(".")),
//!     StderrProgressReporter::new(),
//!     None::<GitCli>,
//! );
//!
//! let request = SyncRequest::new(SyncMode::Incremental, now());
//! let response = use_case.execute(request).await?;
//! for summary in &response.summaries {
//!     println!("{}", summary);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod mirror;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemMirrorStore;
    pub use crate::adapters::outbound::network::{NvdClient, NvdClientConfig};
    pub use crate::adapters::outbound::vcs::GitCli;
    pub use crate::application::dto::{
        CommitOptions, CommitOutcome, KindSummary, SyncRequest, SyncResponse,
    };
    pub use crate::application::use_cases::SyncMirrorUseCase;
    pub use crate::mirror::domain::timestamp::now;
    pub use crate::mirror::domain::{
        DateWindow, Record, RecordId, RecordKind, SyncMode, SyncState, SyncWindow, Timestamp,
    };
    pub use crate::mirror::policies::{FetchFailure, RetryPolicy};
    pub use crate::mirror::services::{NvdQuery, QueryPlanner, RecordLayout, Watermark};
    pub use crate::ports::outbound::{
        MirrorStore, NvdPage, NvdRepository, ProgressReporter, VersionControl, WriteOutcome,
    };
    pub use crate::shared::Result;
}
