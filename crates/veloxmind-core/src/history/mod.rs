mod entry;
mod store;

pub use entry::{HistoryEntry, DEFAULT_TEMPLATE_ID};
pub use store::{HistoryStore, DEFAULT_MAX_HISTORY};
