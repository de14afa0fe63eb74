//! HTML table normalization for stats-site pages.
//!
//! A page's first `<table>` becomes a [`WeeklyStatTable`]: column name →
//! row index → value. Grouped two-row headers are flattened to
//! `Group_Stat`, columns without a group become `Unnamed: N_level_0_Stat`,
//! and any column whose `data-stat` alias is known is renamed through
//! [`column_for_alias`]. Missing cells are stored as an empty string.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::cli::types::Season;
use crate::pfr::columns::{column_for_alias, is_integer_column, strip_placeholder};


/// A single cell. Untagged so documents stay plain JSON (`5`, `3.5`, `"@"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StatValue {
    /// The explicit "no value" sentinel.
    pub fn empty() -> Self {
        StatValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StatValue::Text(s) if s.trim().is_empty())
    }

    /// Numeric reading of the cell; text is parsed when it looks numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Int(i) => Some(*i as f64),
            StatValue::Float(f) if f.is_finite() => Some(*f),
            StatValue::Float(_) => None,
            StatValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(i) => write!(f, "{}", i),
            StatValue::Float(x) => write!(f, "{}", x),
            StatValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Row index → value for one column.
pub type StatColumn = BTreeMap<u32, StatValue>;

/// Column name → column.
pub type WeeklyStatTable = BTreeMap<String, StatColumn>;

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn colspan(cell: &ElementRef<'_>) -> usize {
    cell.value()
        .attr("colspan")
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Header row cells expanded by `colspan`, one label per column.
fn expand_header_row(row: &ElementRef<'_>, cells: &Selector) -> Vec<String> {
    let mut labels = Vec::new();
    for cell in row.select(cells) {
        let text = cell_text(&cell);
        for _ in 0..colspan(&cell) {
            labels.push(text.clone());
        }
    }
    labels
}

fn coerce(column: &str, text: &str) -> StatValue {
    if text.is_empty() {
        return StatValue::empty();
    }
    if is_integer_column(column) {
        return text
            .parse::<i64>()
            .map(StatValue::Int)
            .unwrap_or_else(|_| StatValue::Text(text.to_string()));
    }
    if let Ok(i) = text.parse::<i64>() {
        return StatValue::Int(i);
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => StatValue::Float(f),
        _ => StatValue::Text(text.to_string()),
    }
}

/// Column names for the table, flattened, aliased and de-duplicated the way
/// a dataframe reader would (`Yds`, `Yds.1`, ...).
fn column_names(header_rows: &[ElementRef<'_>], cells: &Selector) -> Vec<String> {
    let Some(bottom) = header_rows.last() else {
        return Vec::new();
    };

    let bottom_cells: Vec<(String, Option<String>)> = bottom
        .select(cells)
        .flat_map(|cell| {
            let text = cell_text(&cell);
            let alias = cell.value().attr("data-stat").map(str::to_string);
            std::iter::repeat((text, alias)).take(colspan(&cell))
        })
        .collect();

    let top = if header_rows.len() > 1 {
        Some(expand_header_row(&header_rows[0], cells))
    } else {
        None
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(bottom_cells.len());

    for (i, (label, alias)) in bottom_cells.iter().enumerate() {
        let flattened = match &top {
            Some(top) => match top.get(i).map(String::as_str) {
                Some(group) if !group.is_empty() => format!("{}_{}", group, label),
                _ => format!("Unnamed: {}_level_0_{}", i, label),
            },
            None => label.clone(),
        };

        let base = alias
            .as_deref()
            .and_then(column_for_alias)
            .map(str::to_string)
            .unwrap_or(flattened);

        let mut name = base.clone();
        let mut n = 1;
        while !seen.insert(name.clone()) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        names.push(name);
    }

    names
}

/// Normalize the first table on the page. Pages without a usable table
/// yield an empty map.
pub fn parse_first_table(html: &str) -> WeeklyStatTable {
    let mut table = WeeklyStatTable::new();

    let (Some(table_sel), Some(head_sel), Some(body_sel), Some(cell_sel)) = (
        selector("table"),
        selector("thead tr"),
        selector("tbody tr"),
        selector("th, td"),
    ) else {
        return table;
    };

    let document = Html::parse_document(html);
    let Some(element) = document.select(&table_sel).next() else {
        return table;
    };

    let header_rows: Vec<ElementRef<'_>> = element.select(&head_sel).collect();
    let names = column_names(&header_rows, &cell_sel);
    if names.is_empty() {
        return table;
    }

    let rows = element.select(&body_sel).filter(|row| {
        let class = row.value().attr("class").unwrap_or("");
        !class.split_whitespace().any(|c| c == "thead" || c == "spacer" || c == "over_header")
    });

    for (row_idx, row) in rows.enumerate() {
        let row_idx = row_idx as u32;

        let mut values: Vec<String> = Vec::with_capacity(names.len());
        for cell in row.select(&cell_sel) {
            values.push(cell_text(&cell));
            for _ in 1..colspan(&cell) {
                values.push(String::new());
            }
        }

        for (i, name) in names.iter().enumerate() {
            let text = values.get(i).map(String::as_str).unwrap_or("");
            table
                .entry(name.clone())
                .or_default()
                .insert(row_idx, coerce(name, text));
        }
    }

    table
}

/// The `data-birth` value on a player overview page (`YYYY-MM-DD`).
pub fn parse_birth_date(html: &str) -> Option<String> {
    let birth_sel = selector("span[data-birth]")?;
    let document = Html::parse_document(html);
    document
        .select(&birth_sel)
        .next()
        .and_then(|span| span.value().attr("data-birth"))
        .map(str::to_string)
}

/// Seasons listed in a table's `Year` column, in page order, without
/// duplicates. Decorations such as `2021*+` are stripped; career summary
/// rows are skipped.
pub fn season_years(table: &WeeklyStatTable) -> Vec<Season> {
    let Some(column) = table
        .iter()
        .find(|(name, _)| strip_placeholder(name) == "Year" || name.ends_with("_Year"))
        .map(|(_, column)| column)
    else {
        return Vec::new();
    };

    let mut years = Vec::new();
    for value in column.values() {
        if let Ok(season) = value.to_string().parse::<Season>() {
            if !years.contains(&season) {
                years.push(season);
            }
        }
    }
    years
}
