//! `update` command: reconcile stored rosters with Sleeper.

use chrono::Local;
use tracing::info;

use crate::{
    cli::types::OwnerId,
    database::{
        reconcile::{apply_changes, reconcile},
        snapshot::{BuildReport, SnapshotBuilder, YearSelection},
        store::{load_document, write_transaction_log},
    },
    sleeper::types::PlayerInfo,
    FflError, LeagueId, Result, Season,
};

use super::{
    common::{save_after_run, until_interrupted, PipelineContext, RunOptions},
    resolve_league_id,
};

/// Handle the update command
///
/// Diffs the stored document against today's rosters, writes the day's
/// transaction log, drops removed players, then fetches `season` game logs
/// for every newly added player.
pub async fn handle_update(
    opts: &RunOptions,
    league_id: Option<LeagueId>,
    season: Season,
    refresh: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let mut doc = load_document(&opts.paths.league_database(&league_id))?;

    let ctx = PipelineContext::load(opts, league_id.clone(), refresh).await?;
    let snapshot = ctx.roster_snapshot().await?;

    let changes = reconcile(&doc, &snapshot, &ctx.catalog);
    let log_path = write_transaction_log(
        &opts.paths.transactions_dir(&league_id),
        &league_id,
        Local::now().date_naive(),
        &changes.transactions,
    )?;
    apply_changes(&mut doc, &snapshot, &changes, &ctx.catalog);

    let added: Vec<(OwnerId, PlayerInfo)> = changes
        .added()
        .filter_map(|(owner, id)| ctx.catalog.get(id).map(|info| (owner.clone(), info.clone())))
        .collect();
    info!("Fetching {} game logs for {} new players", season, added.len());

    let builder = SnapshotBuilder::new(&ctx.fetcher, &ctx.mapper, &ctx.catalog, opts.fetch);
    let years = YearSelection::Explicit(vec![season]);
    let mut report = BuildReport::default();
    let outcome = until_interrupted(async {
        for (owner_id, info) in &added {
            builder
                .merge_player(owner_id, info, &years, &mut doc, &mut report)
                .await?;
        }
        Ok::<(), FflError>(())
    })
    .await;

    save_after_run(outcome, &doc, opts, &league_id, &report)?;

    println!(
        "✓ {} transactions written to {}",
        changes.transactions.len(),
        log_path.display()
    );
    for team in changes.teams.iter().filter(|t| !t.is_empty()) {
        println!(
            "  {}: +{} -{}",
            team.display_name,
            team.added.len(),
            team.removed.len()
        );
    }
    Ok(())
}
