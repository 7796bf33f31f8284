//! Income streams: constant monthly amounts or externally supplied tables

use super::{FinancialInstrument, Schedule};
use crate::column::{Column, Tag};
use crate::error::ProjectionError;
use crate::timeline::Timestamp;

/// A flat monthly cash income over `[start, end]`.
pub fn simple_income_stream(
    name: &str,
    start: Timestamp,
    end: Timestamp,
    amount: f64,
) -> Result<FinancialInstrument, ProjectionError> {
    let mut instrument = FinancialInstrument::new(name);
    instrument.push(Column::constant(name, start, end, Tag::Cash, amount)?);
    Ok(instrument)
}

/// A cash income stream following an externally supplied monthly table,
/// optionally scaled by `percentage` (e.g. 0.5 to model a half share).
///
/// The stream's range is the schedule's own `[min, max]`; the schedule must
/// have one row per calendar month.
pub fn specified_income_stream(
    name: &str,
    schedule: &Schedule,
    percentage: Option<f64>,
) -> Result<FinancialInstrument, ProjectionError> {
    schedule.ensure_contiguous(name)?;
    let start = schedule
        .start()
        .ok_or_else(|| ProjectionError::EmptySchedule {
            name: name.to_string(),
        })?;
    let end = schedule.end().ok_or_else(|| ProjectionError::EmptySchedule {
        name: name.to_string(),
    })?;

    let scale = percentage.unwrap_or(1.0);
    let values: Vec<f64> = schedule.values().map(|v| v * scale).collect();

    let mut instrument = FinancialInstrument::new(name);
    instrument.push(Column::specified(name, start, end, Tag::Cash, values)?);
    Ok(instrument)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: u32) -> Timestamp {
        Timestamp::new(raw).unwrap()
    }

    #[test]
    fn test_simple_income_stream() {
        let instrument = simple_income_stream("salary", ts(202401), ts(202412), 5000.0).unwrap();
        assert_eq!(instrument.columns().len(), 1);

        let col = &instrument.columns()[0];
        assert_eq!(col.name(), "salary");
        assert_eq!(col.tag(), Tag::Cash);
        assert_eq!(col.series().len(), 12);
        assert!(col.series().values().iter().all(|&v| v == 5000.0));
    }

    #[test]
    fn test_specified_income_stream_spans_schedule() {
        let schedule = Schedule::new(vec![
            (ts(202411), 4000.0),
            (ts(202412), 4000.0),
            (ts(202501), 4200.0),
        ]);
        let instrument = specified_income_stream("contract", &schedule, None).unwrap();
        let col = &instrument.columns()[0];
        assert_eq!(col.start(), ts(202411));
        assert_eq!(col.end(), ts(202501));
        assert_eq!(col.series().values(), &[4000.0, 4000.0, 4200.0]);
    }

    #[test]
    fn test_specified_income_stream_percentage_scaling() {
        let schedule = Schedule::new(vec![(ts(202401), 4000.0), (ts(202402), 5000.0)]);
        let instrument = specified_income_stream("half", &schedule, Some(0.5)).unwrap();
        assert_eq!(
            instrument.columns()[0].series().values(),
            &[2000.0, 2500.0]
        );
    }

    #[test]
    fn test_specified_income_stream_rejects_gaps() {
        let schedule = Schedule::new(vec![(ts(202401), 4000.0), (ts(202403), 5000.0)]);
        let result = specified_income_stream("gappy", &schedule, None);
        assert!(matches!(result, Err(ProjectionError::ScheduleGap { .. })));
    }
}
