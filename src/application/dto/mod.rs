/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod sync_request;
mod sync_response;

pub use sync_request::{CommitOptions, SyncRequest};
pub use sync_response::{CommitOutcome, KindSummary, SyncResponse};
