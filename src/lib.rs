//! Sleeper Fantasy Football Stats Library
//!
//! Pulls rosters and scoring settings from the Sleeper API, scrapes weekly
//! game logs for every rostered player from a Pro-Football-Reference style
//! stats site, and keeps both in one JSON league document per league.
//!
//! ## Features
//!
//! - **Id mapping**: Sleeper ids resolved to stats-site ids through a
//!   crosswalk table, with birth-date confirmed guesses as fallback
//! - **Paced fetching**: one request at a time, bounded retries on 503/504,
//!   and a hard stop on 429
//! - **Reconciliation**: daily roster diffs written as transaction logs
//! - **Scoring**: weekly and season fantasy points from league weights
//! - **Export**: the whole document as one flat CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sleeper_ffl::{
//!     commands::{build::handle_build, common::RunOptions},
//!     core::DataPaths,
//!     database::snapshot::YearSelection,
//!     LeagueId, Season,
//! };
//!
//! # async fn example() -> sleeper_ffl::Result<()> {
//! let opts = RunOptions::new(DataPaths::resolve(None));
//! let years = YearSelection::Explicit(vec![Season::new(2024)]);
//! handle_build(&opts, Some(LeagueId::new("1075600889420845056")), years, false, false).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your Sleeper league ID to avoid passing it in every command:
//! ```bash
//! export SLEEPER_LEAGUE_ID=1075600889420845056
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod database;
pub mod error;
pub mod export;
pub mod logging;
pub mod pfr;
pub mod scoring;
pub mod sleeper;

// Re-export commonly used types
pub use cli::types::{LeagueId, OwnerId, PfrId, PlayerId, Season};
pub use error::{FflError, Result};
pub use sleeper::types::{League, PlayerInfo};

pub const LEAGUE_ID_ENV_VAR: &str = "SLEEPER_LEAGUE_ID";
