//! League document layer
//!
//! - `models`: the persisted document structures
//! - `snapshot`: building documents from rosters plus game logs
//! - `reconcile`: roster diffs and transaction records
//! - `clean`: legacy placeholder column renames
//! - `store`: loading, backed-up saving and transaction logs

pub mod clean;
pub mod models;
pub mod reconcile;
pub mod snapshot;
pub mod store;

pub use clean::clean_placeholder_columns;
pub use models::{
    LeagueDocument, PlayerRecord, RosterEntry, SeasonStats, TeamRoster, TransactionKind,
    TransactionRecord, WeeklyPoints,
};
pub use reconcile::{apply_changes, reconcile, Reconciliation, TeamChanges};
pub use snapshot::{roster_snapshot, BuildReport, RosterSnapshot, SnapshotBuilder, YearSelection};
pub use store::{load_document, load_document_or_default, save_document, write_transaction_log};
