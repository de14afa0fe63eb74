//! Fantasy point computation over stored game logs.
//!
//! Every weighted cell contributes `round2(weight * value)`; cells that do
//! not parse as numbers contribute 0. Contributions for the same row are
//! summed and the sum rounded again. Results are written next to the
//! columns, never into them, so scoring the same document twice gives the
//! same numbers.

use tracing::{debug, info};

use crate::database::models::{LeagueDocument, SeasonStats, WeeklyPoints};
use crate::scoring::weights::ScoringWeightTable;


/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-row points for one season.
pub fn score_season(stats: &SeasonStats, weights: &ScoringWeightTable) -> WeeklyPoints {
    let mut points = WeeklyPoints::new();

    for (column, values) in &stats.columns {
        let Some(weight) = weights.weight_for_column(column) else {
            continue;
        };
        for (row, value) in values {
            let contribution = value.as_f64().map(|v| round2(weight * v)).unwrap_or(0.0);
            debug!("{} row {}: {} -> {}", column, row, value, contribution);
            *points.entry(*row).or_insert(0.0) += contribution;
        }
    }

    for total in points.values_mut() {
        *total = round2(*total);
    }
    points
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringSummary {
    pub players: usize,
    pub seasons: usize,
}

/// Recompute `fantasy_points` and `fantasy_points_total` for every season
/// of every player, overwriting earlier results.
pub fn score_document(doc: &mut LeagueDocument, weights: &ScoringWeightTable) -> ScoringSummary {
    let mut summary = ScoringSummary::default();

    for team in &mut doc.teams {
        for entry in &mut team.players {
            info!("Calculating fantasy points for {}", entry.key());
            summary.players += 1;

            for stats in entry.record.yearly_stats.values_mut() {
                let points = score_season(stats, weights);
                stats.fantasy_points_total = Some(round2(points.values().sum()));
                stats.fantasy_points = Some(points);
                summary.seasons += 1;
            }
        }
    }

    summary
}
