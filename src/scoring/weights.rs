//! League scoring weights keyed by statistic kind.

use std::collections::BTreeMap;
use tracing::debug;

use crate::pfr::columns::strip_placeholder;
use crate::scoring::stat_kind::StatKind;
use crate::sleeper::types::League;

/// Points per unit for each scored kind. Kinds the league does not score
/// are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringWeightTable {
    weights: BTreeMap<StatKind, f64>,
}

impl ScoringWeightTable {
    pub fn new(weights: BTreeMap<StatKind, f64>) -> Self {
        Self { weights }
    }

    /// Build from Sleeper's `scoring_settings` map.
    pub fn from_scoring_settings(settings: &BTreeMap<String, f64>) -> Self {
        let mut weights = BTreeMap::new();
        for kind in StatKind::ALL {
            match settings.get(kind.scoring_key()) {
                Some(points) => {
                    weights.insert(kind, *points);
                }
                None => debug!("League does not score {} ({})", kind, kind.scoring_key()),
            }
        }
        Self { weights }
    }

    pub fn from_league(league: &League) -> Self {
        Self::from_scoring_settings(&league.scoring_settings)
    }

    pub fn weight(&self, kind: StatKind) -> Option<f64> {
        self.weights.get(&kind).copied()
    }

    /// Weight for a stored column name, after dropping any `Unnamed...`
    /// placeholder prefix.
    pub fn weight_for_column(&self, column: &str) -> Option<f64> {
        StatKind::from_column(strip_placeholder(column)).and_then(|kind| self.weight(kind))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f64)> + '_ {
        self.weights.iter().map(|(k, w)| (*k, *w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_from_scoring_settings() {
        let table = ScoringWeightTable::from_scoring_settings(&settings(&[
            ("pass_yd", 0.04),
            ("st_td", 6.0),
            ("idp_sack", 2.0),
            ("bonus_rec_te", 0.5),
        ]));

        assert_eq!(table.weight(StatKind::PassYards), Some(0.04));
        assert_eq!(table.weight(StatKind::KickReturnTd), Some(6.0));
        assert_eq!(table.weight(StatKind::PuntReturnTd), Some(6.0));
        assert_eq!(table.weight(StatKind::RushYards), None);
        // unknown Sleeper keys are ignored
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_weight_for_placeholder_column() {
        let table = ScoringWeightTable::from_scoring_settings(&settings(&[("idp_sack", 2.0)]));

        assert_eq!(table.weight_for_column("Unnamed: 23_level_0_Sk"), Some(2.0));
        assert_eq!(table.weight_for_column("Sk"), Some(2.0));
        assert_eq!(table.weight_for_column("Passing_Sk"), None);
    }
}
