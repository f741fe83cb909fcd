/// Mock implementations for testing
mod in_memory_mirror_store;
mod mock_nvd_repository;
mod mock_progress_reporter;
mod mock_version_control;

pub use in_memory_mirror_store::InMemoryMirrorStore;
pub use mock_nvd_repository::MockNvdRepository;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_version_control::MockVersionControl;
