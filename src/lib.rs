//! Net Worth Projector - monthly household net worth projections
//!
//! This library provides:
//! - A shared monthly timeline (`YYYYMM` timestamps)
//! - Tagged time-series columns with cash/assets/liabilities projections
//! - Instrument constructors: amortized loans, cash-flowing assets, income streams
//! - Ledger aggregation with per-period totals and cumulative balances
//! - JSON configuration and CSV schedule loading

pub mod column;
pub mod config;
pub mod error;
pub mod instrument;
pub mod ledger;
pub mod timeline;

// Re-export commonly used types
pub use column::{Column, Series, Tag};
pub use config::{build_instruments, load_config, Config};
pub use error::ProjectionError;
pub use instrument::FinancialInstrument;
pub use ledger::{Ledger, LedgerBuilder, LedgerSummary};
pub use timeline::{TimeIndex, Timestamp};
