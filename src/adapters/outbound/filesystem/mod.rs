/// Filesystem adapters for the mirror directory
mod mirror_store;
mod record_encoding;

pub use mirror_store::FileSystemMirrorStore;
pub use record_encoding::{encode_record, encode_sync_state, MirrorJsonFormatter};
