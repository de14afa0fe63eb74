//! Stats-site column aliases.
//!
//! Every cell on a game log table carries a `data-stat` attribute with a
//! stable machine name (`pass_yds`, `rush_td`, ...). Those are mapped once
//! to the human readable `Group_Stat` names stored in league documents and
//! matched by the scoring engine.

/// `data-stat` alias → stored column name.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("year_id", "Year"),
    ("game_date", "Date"),
    ("game_num", "G#"),
    ("week_num", "Week"),
    ("age", "Age"),
    ("team", "Tm"),
    ("team_name_abbr", "Tm"),
    ("game_location", "Home"),
    ("opp", "Opp"),
    ("opp_name_abbr", "Opp"),
    ("game_result", "Result"),
    ("gs", "GS"),
    ("pass_cmp", "Passing_Cmp"),
    ("pass_att", "Passing_Att"),
    ("pass_cmp_perc", "Passing_Cmp%"),
    ("pass_yds", "Passing_Yds"),
    ("pass_td", "Passing_TD"),
    ("pass_int", "Passing_Int"),
    ("pass_rating", "Passing_Rate"),
    ("pass_sacked", "Passing_Sk"),
    ("pass_sacked_yds", "Passing_SkYds"),
    ("pass_yds_per_att", "Passing_Y/A"),
    ("pass_adj_yds_per_att", "Passing_AY/A"),
    ("rush_att", "Rushing_Att"),
    ("rush_yds", "Rushing_Yds"),
    ("rush_yds_per_att", "Rushing_Y/A"),
    ("rush_td", "Rushing_TD"),
    ("targets", "Receiving_Tgt"),
    ("rec", "Receiving_Rec"),
    ("rec_yds", "Receiving_Yds"),
    ("rec_yds_per_rec", "Receiving_Y/R"),
    ("rec_td", "Receiving_TD"),
    ("catch_pct", "Receiving_Ctch%"),
    ("rec_yds_per_tgt", "Receiving_Y/Tgt"),
    ("two_pt_md", "Scoring_2PM"),
    ("all_td", "Scoring_TD"),
    ("scoring", "Scoring_Pts"),
    ("safety_md", "Scoring_Sfty"),
    ("sacks", "Sk"),
    ("tackles_solo", "Tackles_Solo"),
    ("tackles_assists", "Tackles_Ast"),
    ("tackles_combined", "Tackles_Comb"),
    ("tackles_loss", "Tackles_TFL"),
    ("qb_hits", "Tackles_QBHits"),
    ("fumbles", "Fumbles_Fmb"),
    ("fumbles_lost", "Fumbles_FL"),
    ("fumbles_forced", "Fumbles_FF"),
    ("fumbles_rec", "Fumbles_FR"),
    ("fumbles_rec_yds", "Fumbles_Yds"),
    ("fumbles_rec_td", "Fumbles_TD"),
    ("def_int", "Def Interceptions_Int"),
    ("def_int_yds", "Def Interceptions_Yds"),
    ("def_int_td", "Def Interceptions_TD"),
    ("pass_defended", "Def Interceptions_PD"),
    ("kick_ret", "Kick Returns_Rt"),
    ("kick_ret_yds", "Kick Returns_Yds"),
    ("kick_ret_yds_per_ret", "Kick Returns_Y/Rt"),
    ("kick_ret_td", "Kick Returns_TD"),
    ("punt_ret", "Punt Returns_Ret"),
    ("punt_ret_yds", "Punt Returns_Yds"),
    ("punt_ret_yds_per_ret", "Punt Returns_Y/R"),
    ("punt_ret_td", "Punt Returns_TD"),
    ("offense", "Off. Snaps_Num"),
    ("off_pct", "Off. Snaps_Pct"),
    ("defense", "Def. Snaps_Num"),
    ("def_pct", "Def. Snaps_Pct"),
    ("special_teams", "ST Snaps_Num"),
    ("st_pct", "ST Snaps_Pct"),
];

/// Columns whose non-empty values are stored as integers.
pub const GAME_NUMBER_COLUMN: &str = "G#";
pub const WEEK_COLUMN: &str = "Week";

/// Stored name for a `data-stat` alias, if it is one we know.
pub fn column_for_alias(alias: &str) -> Option<&'static str> {
    COLUMN_ALIASES
        .iter()
        .find(|(a, _)| *a == alias)
        .map(|(_, column)| *column)
}

/// True when a column must be coerced to an integer.
pub fn is_integer_column(column: &str) -> bool {
    column == GAME_NUMBER_COLUMN || column == WEEK_COLUMN
}

/// Drop the `Unnamed: N_level_0_` placeholder the flattener emits for
/// columns without a group header, keeping the real stat name after the
/// last underscore.
pub fn strip_placeholder(column: &str) -> &str {
    if column.starts_with("Unnamed") {
        column.rsplit('_').next().unwrap_or(column)
    } else {
        column
    }
}
