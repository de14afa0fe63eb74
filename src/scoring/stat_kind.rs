//! Scored statistic kinds.

use std::fmt;

/// A statistic the league can award points for.
///
/// Each kind knows the stored game log column it reads and the Sleeper
/// `scoring_settings` key its weight comes from. Several kinds may share a
/// scoring key (kick and punt return touchdowns are both `st_td`).
///
/// ```rust
/// use sleeper_ffl::scoring::StatKind;
///
/// let kind = StatKind::from_column("Passing_Yds").unwrap();
/// assert_eq!(kind, StatKind::PassYards);
/// assert_eq!(kind.scoring_key(), "pass_yd");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKind {
    PassYards,
    PassTd,
    PassInt,
    TwoPointConversion,
    RushYards,
    RushTd,
    Receptions,
    RecYards,
    RecTd,
    KickReturnYards,
    KickReturnTd,
    PuntReturnYards,
    PuntReturnTd,
    Fumbles,
    FumblesLost,
    FumbleReturnYards,
    FumbleReturnTd,
    ForcedFumbles,
    FumbleRecoveries,
    DefInterceptions,
    DefInterceptionYards,
    DefInterceptionTd,
    PassesDefended,
    Sacks,
    QbHits,
    TacklesForLoss,
    SoloTackles,
    AssistedTackles,
    Safeties,
}

impl StatKind {
    pub const ALL: [StatKind; 29] = [
        StatKind::PassYards,
        StatKind::PassTd,
        StatKind::PassInt,
        StatKind::TwoPointConversion,
        StatKind::RushYards,
        StatKind::RushTd,
        StatKind::Receptions,
        StatKind::RecYards,
        StatKind::RecTd,
        StatKind::KickReturnYards,
        StatKind::KickReturnTd,
        StatKind::PuntReturnYards,
        StatKind::PuntReturnTd,
        StatKind::Fumbles,
        StatKind::FumblesLost,
        StatKind::FumbleReturnYards,
        StatKind::FumbleReturnTd,
        StatKind::ForcedFumbles,
        StatKind::FumbleRecoveries,
        StatKind::DefInterceptions,
        StatKind::DefInterceptionYards,
        StatKind::DefInterceptionTd,
        StatKind::PassesDefended,
        StatKind::Sacks,
        StatKind::QbHits,
        StatKind::TacklesForLoss,
        StatKind::SoloTackles,
        StatKind::AssistedTackles,
        StatKind::Safeties,
    ];

    /// Stored game log column this kind is read from.
    pub fn column(&self) -> &'static str {
        match self {
            // Passing_Yds.1 is sack yardage and is not scored
            StatKind::PassYards => "Passing_Yds",
            StatKind::PassTd => "Passing_TD",
            StatKind::PassInt => "Passing_Int",
            StatKind::TwoPointConversion => "Scoring_2PM",
            StatKind::RushYards => "Rushing_Yds",
            StatKind::RushTd => "Rushing_TD",
            StatKind::Receptions => "Receiving_Rec",
            StatKind::RecYards => "Receiving_Yds",
            StatKind::RecTd => "Receiving_TD",
            StatKind::KickReturnYards => "Kick Returns_Yds",
            StatKind::KickReturnTd => "Kick Returns_TD",
            StatKind::PuntReturnYards => "Punt Returns_Yds",
            StatKind::PuntReturnTd => "Punt Returns_TD",
            StatKind::Fumbles => "Fumbles_Fmb",
            StatKind::FumblesLost => "Fumbles_FL",
            StatKind::FumbleReturnYards => "Fumbles_Yds",
            StatKind::FumbleReturnTd => "Fumbles_TD",
            StatKind::ForcedFumbles => "Fumbles_FF",
            StatKind::FumbleRecoveries => "Fumbles_FR",
            StatKind::DefInterceptions => "Def Interceptions_Int",
            StatKind::DefInterceptionYards => "Def Interceptions_Yds",
            StatKind::DefInterceptionTd => "Def Interceptions_TD",
            StatKind::PassesDefended => "Def Interceptions_PD",
            StatKind::Sacks => "Sk",
            StatKind::QbHits => "Tackles_QBHits",
            StatKind::TacklesForLoss => "Tackles_TFL",
            StatKind::SoloTackles => "Tackles_Solo",
            StatKind::AssistedTackles => "Tackles_Ast",
            StatKind::Safeties => "Scoring_Sfty",
        }
    }

    /// Sleeper `scoring_settings` key holding this kind's points per unit.
    pub fn scoring_key(&self) -> &'static str {
        match self {
            StatKind::PassYards => "pass_yd",
            StatKind::PassTd => "pass_td",
            StatKind::PassInt => "pass_int",
            // the stats site does not split passing and rushing conversions
            StatKind::TwoPointConversion => "pass_2pt",
            StatKind::RushYards => "rush_yd",
            StatKind::RushTd => "rush_td",
            StatKind::Receptions => "rec",
            StatKind::RecYards => "rec_yd",
            StatKind::RecTd => "rec_td",
            StatKind::KickReturnYards => "kr_yd",
            StatKind::KickReturnTd | StatKind::PuntReturnTd => "st_td",
            StatKind::PuntReturnYards => "pr_yd",
            StatKind::Fumbles => "fum",
            StatKind::FumblesLost => "fum_lost",
            StatKind::FumbleReturnYards => "fum_ret_yd",
            StatKind::FumbleReturnTd | StatKind::DefInterceptionTd => "idp_def_td",
            StatKind::ForcedFumbles => "idp_ff",
            StatKind::FumbleRecoveries => "idp_fum_rec",
            StatKind::DefInterceptions => "idp_int",
            StatKind::DefInterceptionYards => "int_ret_yd",
            StatKind::PassesDefended => "idp_pass_def",
            StatKind::Sacks => "idp_sack",
            StatKind::QbHits => "idp_qb_hit",
            StatKind::TacklesForLoss => "idp_tkl_loss",
            StatKind::SoloTackles => "idp_tkl_solo",
            StatKind::AssistedTackles => "idp_tkl_ast",
            StatKind::Safeties => "idp_safe",
        }
    }

    /// Kind stored under `column`, if any. Expects placeholder prefixes to
    /// have been stripped already.
    pub fn from_column(column: &str) -> Option<StatKind> {
        StatKind::ALL.into_iter().find(|kind| kind.column() == column)
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}
