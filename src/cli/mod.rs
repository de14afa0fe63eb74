//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{LeagueId, Season};

use crate::database::snapshot::YearSelection;

/// Options accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Data directory (or set `SLEEPER_FFL_DATA_DIR`).
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log at debug level.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    /// Seconds to wait between stats-site game log requests.
    #[clap(long, global = true)]
    pub pace_secs: Option<u64>,

    /// Only log to the terminal, not to `logs/sleeper-ffl.log`.
    #[clap(long, global = true)]
    pub no_log_file: bool,
}

/// Which seasons of game logs to fetch.
#[derive(Debug, Args)]
pub struct YearArgs {
    /// Season to fetch (repeatable): `-y 2022 -y 2023`. Defaults to the current season.
    #[clap(long = "year", short = 'y')]
    pub years: Vec<Season>,

    /// Fetch every season the player has played.
    #[clap(long, conflicts_with = "years")]
    pub career: bool,
}

impl YearArgs {
    pub fn selection(&self) -> YearSelection {
        if self.career {
            YearSelection::Career
        } else if self.years.is_empty() {
            YearSelection::Explicit(vec![Season::default()])
        } else {
            YearSelection::Explicit(self.years.clone())
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download (or reuse) Sleeper's NFL player catalog.
    Players {
        /// Re-download even if the cached copy is fresh.
        #[clap(long)]
        refresh: bool,
    },

    /// Fetch and cache league settings, and show the scoring weights.
    League {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Force refresh from Sleeper, overwriting the cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Build the league document from current rosters plus game logs.
    Build {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        #[clap(flatten)]
        years: YearArgs,

        /// Start from an empty document instead of extending the stored one.
        #[clap(long)]
        fresh: bool,

        /// Re-download the player catalog and id table.
        #[clap(long)]
        refresh: bool,
    },

    /// Reconcile stored rosters with Sleeper and log the transactions.
    Update {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Season to fetch game logs for newly added players.
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Re-download the player catalog and id table.
        #[clap(long)]
        refresh: bool,
    },

    /// Refresh game logs for every player in the stored document.
    Stats {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        #[clap(flatten)]
        years: YearArgs,

        /// Re-download the player catalog and id table.
        #[clap(long)]
        refresh: bool,
    },

    /// Compute fantasy points for every stored game log.
    Score {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Re-fetch league scoring settings.
        #[clap(long)]
        refresh: bool,
    },

    /// Write the stored document as CSV.
    Export {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output file (defaults to `database/{league-id}.csv` in the data directory).
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Rename legacy `Unnamed...` stat columns in the stored document.
    Clean {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "sleeper-ffl", about = "Sleeper fantasy football stats and scoring", version)]
pub struct Cli {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}
