pub mod query_planner;
pub mod record_layout;
pub mod watermark;

pub use query_planner::{NvdQuery, QueryPlanner};
pub use record_layout::RecordLayout;
pub use watermark::Watermark;
