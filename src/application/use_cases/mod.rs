/// Use cases module containing application business logic orchestration
mod fetch_records;
mod sync_mirror;

pub use fetch_records::FetchRecordsUseCase;
pub use sync_mirror::SyncMirrorUseCase;
