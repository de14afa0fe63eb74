//! Core utilities shared by every command
//!
//! - `cache`: data directory layout and file helpers
//! - `backup`: timestamped copies before overwrite

pub mod backup;
pub mod cache;

// Re-export commonly used items for convenience
pub use backup::create_backup;
pub use cache::{is_stale, try_read_to_string, write_string, write_string_atomic, DataPaths};
