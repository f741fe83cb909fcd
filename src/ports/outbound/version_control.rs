use crate::shared::Result;
use async_trait::async_trait;

/// VersionControl port for publishing the mirror
///
/// Implementations operate on the mirror repository only; paths are
/// relative to its root.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Stages additions, modifications and deletions under `paths`
    async fn stage(&self, paths: &[&str]) -> Result<()>;

    /// Whether anything under `paths` is staged for commit
    async fn has_staged_changes(&self, paths: &[&str]) -> Result<bool>;

    /// Commits the staged changes under `paths`, leaving anything else
    /// in the index uncommitted
    async fn commit(&self, paths: &[&str], message: &str) -> Result<()>;

    /// Pushes the current branch to its upstream
    async fn push(&self) -> Result<()>;
}
