pub mod retry_policy;

pub use retry_policy::{FetchFailure, RetryPolicy};
