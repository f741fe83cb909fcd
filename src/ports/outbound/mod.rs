/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach the NVD API, the mirror directory, git and the console.
pub mod mirror_store;
pub mod nvd_repository;
pub mod progress_reporter;
pub mod version_control;

pub use mirror_store::{MirrorStore, WriteOutcome};
pub use nvd_repository::{NvdPage, NvdRepository};
pub use progress_reporter::ProgressReporter;
pub use version_control::VersionControl;
