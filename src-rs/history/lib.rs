pub mod store;
pub mod types;

pub use store::{TaskHistory, HISTORY_LIMIT};
pub use types::{HistoryEntry, HistoryRow};
