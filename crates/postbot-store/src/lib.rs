//! Append-only history logs.
//!
//! Each log is keyed by name (`news_log`, `facts_log`, ...) and holds one
//! entry per line, oldest first. Entries are only ever appended.

pub mod azure;
pub mod error;
pub mod file;
pub mod log;
pub mod memory;

mod retry;
mod signing;

pub use azure::AzureBlobLog;
pub use error::StoreError;
pub use file::FileLog;
pub use log::{normalize_entry, parse_entries, HistoryLog};
pub use memory::MemoryLog;
