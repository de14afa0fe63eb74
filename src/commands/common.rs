//! Shared setup for commands that talk to Sleeper or the stats site.

use std::future::Future;
use tracing::{error, info, warn};

use crate::{
    core::DataPaths,
    database::{
        models::LeagueDocument,
        snapshot::{roster_snapshot, BuildReport, RosterSnapshot},
        store::save_document,
    },
    pfr::{
        fetcher::{FetchConfig, StatsFetcher, PFR_BASE_URL},
        ids::{load_or_fetch_id_table, IdMapper, ID_TABLE_URL},
    },
    sleeper::{
        cache_settings::load_or_fetch_player_catalog,
        http::{SleeperClient, SLEEPER_BASE_URL},
        types::PlayerCatalog,
    },
    FflError, LeagueId, Result,
};

/// Where to find everything a run needs. Production uses [`Default`];
/// tests swap the URLs for a mock server and zero the pacing.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub paths: DataPaths,
    pub fetch: FetchConfig,
    pub sleeper_base_url: String,
    pub pfr_base_url: String,
    pub id_table_url: String,
}

impl RunOptions {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            fetch: FetchConfig::default(),
            sleeper_base_url: SLEEPER_BASE_URL.to_string(),
            pfr_base_url: PFR_BASE_URL.to_string(),
            id_table_url: ID_TABLE_URL.to_string(),
        }
    }

    pub fn sleeper_client(&self) -> Result<SleeperClient> {
        SleeperClient::with_base_url(&self.sleeper_base_url)
    }
}

/// Clients and lookup tables for a build, update or stats run.
pub struct PipelineContext {
    pub league_id: LeagueId,
    pub sleeper: SleeperClient,
    pub fetcher: StatsFetcher,
    pub catalog: PlayerCatalog,
    pub mapper: IdMapper,
}

impl PipelineContext {
    /// Load the player catalog and id table (downloading them when stale)
    /// and build both HTTP clients.
    pub async fn load(opts: &RunOptions, league_id: LeagueId, refresh: bool) -> Result<Self> {
        let sleeper = opts.sleeper_client()?;
        let fetcher = StatsFetcher::with_base_url(&opts.pfr_base_url, opts.fetch.retry)?;

        let catalog = load_or_fetch_player_catalog(&sleeper, &opts.paths, refresh).await?;
        info!("Player catalog has {} players", catalog.len());
        let table =
            load_or_fetch_id_table(fetcher.client(), &opts.paths, &opts.id_table_url, refresh)
                .await?;

        Ok(Self {
            league_id,
            sleeper,
            fetcher,
            catalog,
            mapper: IdMapper::new(table),
        })
    }

    /// Current rosters paired with their owners, without stats.
    pub async fn roster_snapshot(&self) -> Result<Vec<RosterSnapshot>> {
        let rosters = self.sleeper.get_rosters(&self.league_id).await?;
        let users = self.sleeper.get_users(&self.league_id).await?;
        if rosters.is_empty() {
            return Err(FflError::NoData);
        }
        Ok(roster_snapshot(&rosters, &users, &self.catalog))
    }
}

/// Drive `work` to completion unless Ctrl-C arrives first. An interrupt
/// drops `work` and returns [`FflError::Interrupted`].
pub async fn until_interrupted<F, T>(work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::pin!(work);
    tokio::select! {
        result = &mut work => result,
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => {
                warn!("Interrupted, keeping players merged so far");
                Err(FflError::Interrupted)
            }
            Err(e) => {
                warn!("Cannot listen for Ctrl-C ({}), running without it", e);
                work.await
            }
        },
    }
}

/// Save `doc` after a fetch run, however it ended. A run stopped by a rate
/// limit or an interrupt still writes what it merged, through the same
/// backup-then-replace path, and then reports the stop.
pub fn save_after_run(
    outcome: Result<()>,
    doc: &LeagueDocument,
    opts: &RunOptions,
    league_id: &LeagueId,
    report: &BuildReport,
) -> Result<()> {
    match &outcome {
        Ok(()) => info!(
            "Run finished: {} players, {} seasons fetched, {} missing, {} without a stats id",
            report.players,
            report.seasons_fetched,
            report.seasons_failed,
            report.unresolved.len()
        ),
        Err(e) if e.is_rate_limit() || matches!(e, FflError::Interrupted) => {
            error!("Run stopped early: {}", e)
        }
        Err(e) => error!("Run failed: {}", e),
    }

    save_document(
        &opts.paths.league_database(league_id),
        doc,
        &opts.paths.backups_dir(),
    )?;
    outcome
}
