//! Error types for instrument and ledger construction

use crate::timeline::Timestamp;
use thiserror::Error;

/// Failures raised while constructing instruments or building the ledger.
///
/// All variants are fatal: a failed instrument aborts the whole run rather
/// than silently omitting itself from the ledger.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A raw timestamp whose month part is not in 1..=12.
    #[error("invalid timestamp {0}: month must be in 1..=12")]
    InvalidTimestamp(u32),

    /// A range whose start falls after its end.
    #[error("invalid range {start}..{end}: start must not exceed end")]
    InvalidRange { start: Timestamp, end: Timestamp },

    /// A specified value vector that does not cover its column's range.
    #[error("column \"{name}\": expected {expected} values for its range, got {got}")]
    SeriesLengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// An external schedule whose bounds differ from the required range.
    #[error(
        "schedule for \"{name}\" spans {start}..{end}, expected exactly {expected_start}..{expected_end}"
    )]
    ScheduleRangeMismatch {
        name: String,
        expected_start: Timestamp,
        expected_end: Timestamp,
        start: Timestamp,
        end: Timestamp,
    },

    /// An external schedule that does not step by exactly one calendar month.
    #[error("schedule for \"{name}\" must step by one calendar month: {prev} is followed by {next}")]
    ScheduleGap {
        name: String,
        prev: Timestamp,
        next: Timestamp,
    },

    /// An external schedule file with no rows.
    #[error("schedule for \"{name}\" is empty")]
    EmptySchedule { name: String },

    /// An unrecognized appreciation/income mode string in the configuration.
    #[error("unknown {kind} type \"{value}\"")]
    UnknownScheduleType { kind: &'static str, value: String },

    /// `finalize` called on a builder with no registered instruments.
    #[error("no instruments registered; nothing to build a ledger from")]
    EmptyLedger,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
}
