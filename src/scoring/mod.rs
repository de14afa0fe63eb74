//! League scoring
//!
//! - `stat_kind`: scored statistics and their column / Sleeper key table
//! - `weights`: points per unit built from league settings
//! - `engine`: weekly and season totals written back into the document

pub mod engine;
pub mod stat_kind;
pub mod weights;

pub use engine::{round2, score_document, score_season, ScoringSummary};
pub use stat_kind::StatKind;
pub use weights::ScoringWeightTable;
