//! `build` command: create or extend a league document with game logs.

use tracing::info;

use crate::{
    database::{
        models::LeagueDocument,
        snapshot::{BuildReport, SnapshotBuilder, YearSelection},
        store::load_document_or_default,
    },
    LeagueId, Result,
};

use super::{
    common::{save_after_run, until_interrupted, PipelineContext, RunOptions},
    resolve_league_id,
};

/// Handle the build command
///
/// With `fresh` the stored document is ignored and rebuilt from scratch
/// (the old file is still backed up before it is replaced). Otherwise
/// players already stored keep their other seasons and only the requested
/// ones are replaced or appended.
pub async fn handle_build(
    opts: &RunOptions,
    league_id: Option<LeagueId>,
    years: YearSelection,
    fresh: bool,
    refresh: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let ctx = PipelineContext::load(opts, league_id.clone(), refresh).await?;
    let snapshot = ctx.roster_snapshot().await?;

    let mut doc = if fresh {
        LeagueDocument::default()
    } else {
        load_document_or_default(&opts.paths.league_database(&league_id))?
    };
    info!(
        "Building {} teams into a document with {} players",
        snapshot.len(),
        doc.player_count()
    );

    let builder = SnapshotBuilder::new(&ctx.fetcher, &ctx.mapper, &ctx.catalog, opts.fetch);
    let mut report = BuildReport::default();
    let outcome = until_interrupted(builder.build(&snapshot, &years, &mut doc, &mut report)).await;

    save_after_run(outcome, &doc, opts, &league_id, &report)?;
    println!(
        "✓ Built {} teams / {} players into {}",
        doc.teams.len(),
        doc.player_count(),
        opts.paths.league_database(&league_id).display()
    );
    Ok(())
}
