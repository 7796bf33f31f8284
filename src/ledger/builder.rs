//! Ledger aggregation: fold every instrument's columns into one table

use super::table::{
    Ledger, ASSETS, CASH_BALANCE, LIABILITIES, NET_ASSETS, NET_CASH, NET_LIABILITIES, NET_WORTH,
};
use crate::column::Series;
use crate::error::ProjectionError;
use crate::instrument::FinancialInstrument;
use crate::timeline::{TimeIndex, Timestamp};
use log::{debug, info};
use rayon::prelude::*;

/// Accumulates registered instruments and builds the master ledger.
///
/// Owns its instruments exclusively; one builder produces one ledger.
#[derive(Debug, Default)]
pub struct LedgerBuilder {
    instruments: Vec<FinancialInstrument>,
    min_start: Option<Timestamp>,
    max_end: Option<Timestamp>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the instrument and extend the master range to cover every one
    /// of its columns.
    pub fn register(&mut self, instrument: FinancialInstrument) {
        for column in instrument.columns() {
            self.min_start = Some(match self.min_start {
                Some(current) => current.min(column.start()),
                None => column.start(),
            });
            self.max_end = Some(match self.max_end {
                Some(current) => current.max(column.end()),
                None => column.end(),
            });
        }
        debug!(
            "registered \"{}\" ({} columns)",
            instrument.name(),
            instrument.columns().len()
        );
        self.instruments.push(instrument);
    }

    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Build the finalized ledger.
    ///
    /// Merge policy: a period a column does not cover contributes 0 to every
    /// table it is folded into; missing data is never an error.
    pub fn finalize(self) -> Result<Ledger, ProjectionError> {
        let (start, end) = match (self.min_start, self.max_end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ProjectionError::EmptyLedger),
        };
        let index = TimeIndex::build(start, end)?;
        info!(
            "building ledger over {}..{}: {} months, {} instruments",
            start,
            end,
            index.len(),
            self.instruments.len()
        );

        // Warm every column cache up front. Materialization is pure and
        // memoized, so the parallel pass cannot change the fold below.
        self.instruments.par_iter().for_each(|instrument| {
            for column in instrument.columns() {
                column.series();
            }
        });

        let months = index.len();
        let mut ledger = Ledger::new(index.as_slice().to_vec());
        let mut net_cash = vec![0.0; months];
        let mut net_assets = vec![0.0; months];
        let mut net_liabilities = vec![0.0; months];

        for instrument in &self.instruments {
            for column in instrument.columns() {
                let mut merged = vec![0.0; months];
                accumulate(&index, column.series(), &mut merged);
                ledger.push_column(column.name().to_string(), merged);

                accumulate(&index, &column.net_cash_delta(), &mut net_cash);
                accumulate(&index, &column.assets_delta(), &mut net_assets);
                accumulate(&index, &column.liabilities_delta(), &mut net_liabilities);
            }
        }

        let cash_balance = running_total(&net_cash);
        let assets = running_total(&net_assets);
        let liabilities = running_total(&net_liabilities);

        // net worth sums the cumulative levels, not the per-period deltas
        let net_worth: Vec<f64> = cash_balance
            .iter()
            .zip(&assets)
            .zip(&liabilities)
            .map(|((cash, asset), liability)| cash + asset + liability)
            .collect();

        ledger.push_column(NET_CASH.to_string(), net_cash);
        ledger.push_column(NET_ASSETS.to_string(), net_assets);
        ledger.push_column(NET_LIABILITIES.to_string(), net_liabilities);
        ledger.push_column(CASH_BALANCE.to_string(), cash_balance);
        ledger.push_column(ASSETS.to_string(), assets);
        ledger.push_column(LIABILITIES.to_string(), liabilities);
        ledger.push_column(NET_WORTH.to_string(), net_worth);

        Ok(ledger)
    }
}

/// Point-wise add `series` into `into`, aligned on the master index.
fn accumulate(index: &TimeIndex, series: &Series, into: &mut [f64]) {
    for (ts, value) in series.iter() {
        if let Some(position) = index.position(ts) {
            into[position] += value;
        }
    }
}

fn running_total(deltas: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    deltas
        .iter()
        .map(|delta| {
            total += delta;
            total
        })
        .collect()
}
