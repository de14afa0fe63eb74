//! `stats` command: refresh game logs for every stored player.

use crate::{
    database::{
        snapshot::{BuildReport, SnapshotBuilder, YearSelection},
        store::load_document,
    },
    LeagueId, Result,
};

use super::{
    common::{save_after_run, until_interrupted, PipelineContext, RunOptions},
    resolve_league_id,
};

/// Handle the stats command
pub async fn handle_stats(
    opts: &RunOptions,
    league_id: Option<LeagueId>,
    years: YearSelection,
    refresh: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let mut doc = load_document(&opts.paths.league_database(&league_id))?;
    let ctx = PipelineContext::load(opts, league_id.clone(), refresh).await?;

    let builder = SnapshotBuilder::new(&ctx.fetcher, &ctx.mapper, &ctx.catalog, opts.fetch);
    let mut report = BuildReport::default();
    let outcome = until_interrupted(builder.refresh_stats(&years, &mut doc, &mut report)).await;

    save_after_run(outcome, &doc, opts, &league_id, &report)?;
    println!(
        "✓ Refreshed {} seasons for {} players",
        report.seasons_fetched, report.players
    );
    Ok(())
}
