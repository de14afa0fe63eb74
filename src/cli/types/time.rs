//! Season years as they appear on the stats site and in stored documents.

use crate::error::{FflError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest season the stats site carries game logs for.
const FIRST_SEASON: u16 = 1920;

/// Type-safe wrapper for Season years
///
/// Serialized as a bare number so it can key a JSON object (`"2023": {...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The season a date falls in. January and February games belong to
    /// the previous year's season.
    pub fn containing(date: NaiveDate) -> Self {
        let year = date.year() as u16;
        if date.month() <= 2 {
            Self(year - 1)
        } else {
            Self(year)
        }
    }
}

impl Default for Season {
    /// The season in progress today.
    fn default() -> Self {
        Self::containing(Local::now().date_naive())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = FflError;

    /// Accepts `2023` as well as decorated values from the site such as
    /// `2023*` or `2023+` (Pro Bowl / All-Pro markers).
    fn from_str(s: &str) -> Result<Self> {
        let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.parse::<u16>() {
            Ok(year) if year >= FIRST_SEASON => Ok(Self(year)),
            _ => Err(FflError::InvalidSeason {
                value: s.to_string(),
            }),
        }
    }
}
