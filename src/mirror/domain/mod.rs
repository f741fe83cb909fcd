pub mod date_window;
pub mod record;
pub mod record_kind;
pub mod sync_mode;
pub mod sync_state;
pub mod timestamp;

pub use date_window::DateWindow;
pub use record::{Record, RecordId};
pub use record_kind::RecordKind;
pub use sync_mode::SyncMode;
pub use sync_state::{SyncState, SyncWindow};
pub use timestamp::Timestamp;
