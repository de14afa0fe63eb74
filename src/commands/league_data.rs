//! `players` and `league` commands: refresh the cached Sleeper data.

use tracing::info;

use crate::{
    scoring::ScoringWeightTable,
    sleeper::cache_settings::{load_or_fetch_league, load_or_fetch_player_catalog},
    LeagueId, Result,
};

use super::{common::RunOptions, resolve_league_id};

/// Handle the players command
pub async fn handle_players(opts: &RunOptions, refresh: bool) -> Result<()> {
    let client = opts.sleeper_client()?;
    let catalog = load_or_fetch_player_catalog(&client, &opts.paths, refresh).await?;

    println!(
        "✓ {} players cached at {}",
        catalog.len(),
        opts.paths.player_catalog().display()
    );
    Ok(())
}

/// Handle the league command
pub async fn handle_league(
    opts: &RunOptions,
    league_id: Option<LeagueId>,
    refresh: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;

    if refresh {
        info!("Fetching fresh league settings from Sleeper");
    } else {
        info!("Loading league settings (cached if available)");
    }

    let client = opts.sleeper_client()?;
    let league = load_or_fetch_league(&client, &opts.paths, &league_id, refresh).await?;
    let weights = ScoringWeightTable::from_league(&league);

    println!("✓ League settings loaded");
    println!(
        "League: {} ({}), season {}",
        league.name,
        league.league_id,
        league.season.as_deref().unwrap_or("unknown")
    );
    println!(
        "Scoring settings: {} keys, {} scored game log columns",
        league.scoring_settings.len(),
        weights.len()
    );
    for (kind, points) in weights.iter() {
        println!("  {:<24} {:>6}", kind.column(), points);
    }
    Ok(())
}
