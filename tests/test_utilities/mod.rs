/// Shared helpers for integration and e2e tests
#[allow(dead_code)]
pub mod mocks;
#[allow(dead_code)]
pub mod nvd_server;
