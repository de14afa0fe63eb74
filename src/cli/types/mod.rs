//! Type-safe wrappers for Sleeper and stats-site identifiers.

pub mod ids;
pub mod time;

pub use ids::{LeagueId, OwnerId, PfrId, PlayerId};
pub use time::Season;
