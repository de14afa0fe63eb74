//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Result;
use clap::Parser;
use sleeper_ffl::{
    cli::{Cli, Commands},
    commands::{
        build::handle_build,
        common::RunOptions,
        export::handle_export,
        league_data::{handle_league, handle_players},
        maintenance::{handle_clean, handle_score},
        stats::handle_stats,
        update::handle_update,
    },
    core::DataPaths,
    logging::{initialize_logging, LOG_FILE_NAME},
};
use std::time::Duration;

/// Run the CLI. Everything is sequential, so a single-threaded runtime is
/// enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let app = Cli::parse();

    let paths = DataPaths::resolve(app.global.data_dir.clone());
    let log_file = (!app.global.no_log_file).then(|| paths.logs_dir().join(LOG_FILE_NAME));
    initialize_logging(app.global.verbose, log_file.as_deref())?;

    let mut opts = RunOptions::new(paths);
    if let Some(secs) = app.global.pace_secs {
        opts.fetch.pace = Duration::from_secs(secs);
    }

    match app.command {
        Commands::Players { refresh } => handle_players(&opts, refresh).await?,

        Commands::League { league_id, refresh } => handle_league(&opts, league_id, refresh).await?,

        Commands::Build {
            league_id,
            years,
            fresh,
            refresh,
        } => handle_build(&opts, league_id, years.selection(), fresh, refresh).await?,

        Commands::Update {
            league_id,
            season,
            refresh,
        } => handle_update(&opts, league_id, season, refresh).await?,

        Commands::Stats {
            league_id,
            years,
            refresh,
        } => handle_stats(&opts, league_id, years.selection(), refresh).await?,

        Commands::Score { league_id, refresh } => handle_score(&opts, league_id, refresh).await?,

        Commands::Export { league_id, output } => handle_export(&opts, league_id, output)?,

        Commands::Clean { league_id } => handle_clean(&opts, league_id)?,
    }

    Ok(())
}
