//! `export` command: write a league document as CSV.

use std::path::PathBuf;

use crate::{database::store::load_document, export::export_csv, LeagueId, Result};

use super::{common::RunOptions, resolve_league_id};

/// Handle the export command
pub fn handle_export(
    opts: &RunOptions,
    league_id: Option<LeagueId>,
    output: Option<PathBuf>,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let doc = load_document(&opts.paths.league_database(&league_id))?;

    let output = output.unwrap_or_else(|| opts.paths.csv_export(&league_id));
    let rows = export_csv(&doc, &output)?;

    println!("✓ Exported {} rows to {}", rows, output.display());
    Ok(())
}
