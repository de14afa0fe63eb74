//! Sleeper fantasy platform: API client, payload types and on-disk caches.

pub mod cache_settings;
pub mod http;
pub mod types;

pub use http::SleeperClient;
pub use types::{League, PlayerCatalog, PlayerInfo, Roster, User};
