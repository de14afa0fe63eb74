//! Error types for the Sleeper fantasy football toolkit

use std::path::PathBuf;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, FflError>;

#[derive(Error, Debug)]
pub enum FflError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Invalid league ID: {value}")]
    InvalidLeagueId { value: String },

    #[error("Invalid season: {value}")]
    InvalidSeason { value: String },

    #[error("Rate limited by {url}; stopping further requests for this run")]
    RateLimited { url: String },

    #[error("League database not found at {}", path.display())]
    DatabaseNotFound { path: PathBuf },

    #[error("Sleeper API returned no data")]
    NoData,

    #[error("Interrupted by user")]
    Interrupted,
}

impl FflError {
    /// True for errors that mean "stop talking to the stats site for this run".
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, FflError::RateLimited { .. })
    }
}
