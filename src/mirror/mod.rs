/// Mirror domain - record kinds, sync state and the rules that
/// decide what to fetch and where it lands on disk.
pub mod domain;
pub mod policies;
pub mod services;
