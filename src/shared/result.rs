/// Result alias used throughout nvd-sync.
///
/// Typed failures are `SyncError` values carried inside `anyhow::Error`,
/// so callers can add context with `?` and still downcast at the edge.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
