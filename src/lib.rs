pub mod app;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod joints;
pub mod models;
pub mod report;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use filter::{filter_entries, DateRange};
pub use report::{build_report, Report, ReportMode};
pub use state::AppState;
pub use stats::{summarize, SummaryStats};
pub use storage::{load_data, resolve_data_path};
pub use store::{KeyValueStore, MemoryStorage, Record, RecordKind, RecordStore};
