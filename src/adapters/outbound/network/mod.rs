/// Network adapters for the NVD REST API
mod nvd_client;

pub use nvd_client::{NvdClient, NvdClientConfig};
