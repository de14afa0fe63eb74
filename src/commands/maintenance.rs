//! `score` and `clean` commands: offline passes over a stored document.

use tracing::warn;

use crate::{
    database::{
        clean::clean_placeholder_columns,
        store::{load_document, save_document},
    },
    scoring::{score_document, ScoringWeightTable},
    sleeper::cache_settings::load_or_fetch_league,
    LeagueId, Result,
};

use super::{common::RunOptions, resolve_league_id};

/// Handle the score command
///
/// Weights come from the league's Sleeper scoring settings (cached unless
/// `refresh` is set). Every season is rescored from its game log.
pub async fn handle_score(opts: &RunOptions, league_id: Option<LeagueId>, refresh: bool) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let path = opts.paths.league_database(&league_id);
    let mut doc = load_document(&path)?;

    let client = opts.sleeper_client()?;
    let league = load_or_fetch_league(&client, &opts.paths, &league_id, refresh).await?;
    let weights = ScoringWeightTable::from_league(&league);
    if weights.is_empty() {
        warn!("League {} scores none of the stored stat columns", league_id);
    }

    let summary = score_document(&mut doc, &weights);
    save_document(&path, &doc, &opts.paths.backups_dir())?;

    println!(
        "✓ Scored {} seasons for {} players",
        summary.seasons, summary.players
    );
    Ok(())
}

/// Handle the clean command
pub fn handle_clean(opts: &RunOptions, league_id: Option<LeagueId>) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let path = opts.paths.league_database(&league_id);
    let mut doc = load_document(&path)?;

    let renamed = clean_placeholder_columns(&mut doc);
    if renamed > 0 {
        save_document(&path, &doc, &opts.paths.backups_dir())?;
    }

    println!("✓ Renamed {} placeholder columns", renamed);
    Ok(())
}
