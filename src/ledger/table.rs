//! Finalized ledger table keyed by timestamp

use crate::timeline::Timestamp;
use serde::Serialize;

/// Per-period cash total column name.
pub const NET_CASH: &str = "net_cash";
/// Per-period assets total column name.
pub const NET_ASSETS: &str = "net_assets";
/// Per-period liabilities total column name.
pub const NET_LIABILITIES: &str = "net_liabilities";
/// Cumulative cash balance column name.
pub const CASH_BALANCE: &str = "cash_balance";
/// Cumulative assets column name.
pub const ASSETS: &str = "assets";
/// Cumulative liabilities column name.
pub const LIABILITIES: &str = "liabilities";
/// Net worth column name (cash_balance + assets + liabilities).
pub const NET_WORTH: &str = "net_worth";

/// One named column of the finalized ledger, aligned to its timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// The aggregate table over `[min_start, max_end]` across all instruments:
/// every instrument column (zero-filled outside its own range), the three
/// per-period totals, and the four cumulative balance columns.
///
/// Write-once: built by `LedgerBuilder::finalize`, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Ledger {
    timestamps: Vec<Timestamp>,
    columns: Vec<LedgerColumn>,
}

impl Ledger {
    pub(crate) fn new(timestamps: Vec<Timestamp>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
        }
    }

    pub(crate) fn push_column(&mut self, name: String, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.timestamps.len());
        self.columns.push(LedgerColumn { name, values });
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Number of months in the ledger.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Values of the first column with this name, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = &LedgerColumn> {
        self.columns.iter()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    fn final_value(&self, name: &str) -> f64 {
        self.column(name)
            .and_then(|values| values.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Final balances at the end of the projection.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            months: self.len(),
            final_cash_balance: self.final_value(CASH_BALANCE),
            final_assets: self.final_value(ASSETS),
            final_liabilities: self.final_value(LIABILITIES),
            final_net_worth: self.final_value(NET_WORTH),
        }
    }
}

/// Summary statistics for a finalized ledger.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub months: usize,
    pub final_cash_balance: f64,
    pub final_assets: f64,
    pub final_liabilities: f64,
    pub final_net_worth: f64,
}
