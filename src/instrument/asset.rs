//! Cash-flowing asset: acquisition, appreciation, and income schedules

use super::{FinancialInstrument, Schedule};
use crate::column::{Column, Tag};
use crate::error::ProjectionError;
use crate::timeline::Timestamp;

/// How an asset's recorded value grows over time.
#[derive(Debug, Clone)]
pub enum AppreciationMode {
    /// Flat per-period value delta.
    Constant { amount: f64 },
    /// Externally supplied annual-percentage schedule, compounded forward
    /// from the acquisition cost. Must cover the asset's full range exactly.
    Specified { schedule: Schedule },
}

/// How an asset pays cash income.
#[derive(Debug, Clone)]
pub enum IncomeMode {
    /// Flat per-period cash amount.
    Constant { amount: f64 },
    /// A fraction of the asset's running value (cost plus cumulative
    /// appreciation), e.g. rent as a percentage of property value.
    Proportional { proportion: f64 },
}

/// Build an asset that costs cash up front, carries a basis, appreciates,
/// and pays income.
///
/// The configured `start` is the zero day: the purchase cash leaves and the
/// basis is recorded there. Constant schedules run over the window shifted
/// one month past both configured bounds; a specified appreciation schedule
/// spans `[zero_day, end + 1 month]` and is range-checked against that.
pub fn cash_flow_asset(
    name: &str,
    start: Timestamp,
    end: Timestamp,
    cost: f64,
    appreciation: AppreciationMode,
    income: IncomeMode,
) -> Result<FinancialInstrument, ProjectionError> {
    let zero_day = start;
    let flow_start = start.add_months(1);
    let flow_end = end.add_months(1);

    let appreciation_col = match appreciation {
        AppreciationMode::Constant { amount } => Column::constant(
            format!("{name} appreciation"),
            flow_start,
            flow_end,
            Tag::Assets,
            amount,
        )?,
        AppreciationMode::Specified { schedule } => {
            specified_appreciation(name, zero_day, flow_end, cost, &schedule)?
        }
    };

    let income_col = match income {
        IncomeMode::Constant { amount } => Column::constant(
            format!("{name} income"),
            flow_start,
            flow_end,
            Tag::Cash,
            amount,
        )?,
        IncomeMode::Proportional { proportion } => {
            proportional_income(name, cost, proportion, &appreciation_col)?
        }
    };

    let mut instrument = FinancialInstrument::new(name);
    instrument.push(Column::one_time(
        format!("{name} cost"),
        zero_day,
        Tag::Cash,
        -cost,
    )?);
    instrument.push(Column::one_time(
        format!("{name} basis"),
        zero_day,
        Tag::Assets,
        cost,
    )?);
    instrument.push(appreciation_col);
    instrument.push(income_col);

    Ok(instrument)
}

/// Compound `cost` forward along an annual-percentage schedule and emit the
/// per-period value deltas.
///
/// Each period compounds at the previous period's annual rate / 12, so the
/// first period holds the cost unchanged and emits a zero delta.
fn specified_appreciation(
    name: &str,
    zero_day: Timestamp,
    end: Timestamp,
    cost: f64,
    schedule: &Schedule,
) -> Result<Column, ProjectionError> {
    let column_name = format!("{name} appreciation");
    schedule.ensure_range(&column_name, zero_day, end)?;

    let annual_pcts: Vec<f64> = schedule.values().collect();
    let mut deltas = Vec::with_capacity(annual_pcts.len());
    let mut value = cost;
    deltas.push(0.0);
    for pct in &annual_pcts[..annual_pcts.len() - 1] {
        let next = value * (1.0 + pct / 12.0);
        deltas.push(next - value);
        value = next;
    }

    Column::specified(column_name, zero_day, end, Tag::Assets, deltas)
}

/// Income as a fixed fraction of the asset's running value.
///
/// Emitted over the appreciation column's own range so the running value and
/// the income always line up, whichever appreciation mode produced it.
fn proportional_income(
    name: &str,
    cost: f64,
    proportion: f64,
    appreciation: &Column,
) -> Result<Column, ProjectionError> {
    let mut value = cost;
    let income: Vec<f64> = appreciation
        .series()
        .values()
        .iter()
        .map(|delta| {
            value += delta;
            proportion * value
        })
        .collect();

    Column::specified(
        format!("{name} income"),
        appreciation.start(),
        appreciation.end(),
        Tag::Cash,
        income,
    )
}
