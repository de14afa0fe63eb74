//! Pro-Football-Reference style stats site: paced fetching, table
//! normalization and player id resolution.

pub mod columns;
pub mod fetcher;
pub mod ids;
pub mod table;

pub use fetcher::{FetchConfig, FetchOutcome, RetryPolicy, StatsFetcher};
pub use ids::{IdMapper, IdTable};
pub use table::{StatColumn, StatValue, WeeklyStatTable};
