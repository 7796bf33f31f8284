//! Ledger aggregation and the finalized master table

mod builder;
mod table;

pub use builder::LedgerBuilder;
pub use table::{
    Ledger, LedgerColumn, LedgerSummary, ASSETS, CASH_BALANCE, LIABILITIES, NET_ASSETS, NET_CASH,
    NET_LIABILITIES, NET_WORTH,
};
