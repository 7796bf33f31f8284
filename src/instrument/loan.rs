//! Loan instrument: origination entries plus an amortized service schedule

use super::amortize::amortize;
use super::FinancialInstrument;
use crate::column::{Column, Tag};
use crate::error::ProjectionError;
use crate::timeline::{TimeIndex, Timestamp};

/// Build a level-payment loan.
///
/// The configured `start` is the zero day: the borrowed cash arrives and the
/// debt is recorded there. Service payments run over the window shifted one
/// month past both configured bounds, so a loan configured over
/// `[202401, 202412]` originates in January and is paid `202402..=202501`.
///
/// Columns produced:
/// - `"{name} cash"`: `+P` at the zero day (Cash)
/// - `"{name} liability"`: `-P` at the zero day (Liabilities; debt is a
///   negative addition so it depresses net worth)
/// - `"{name} service"`: `-payment` per period (Cash)
/// - `"{name} interest"`: interest portion per period (informational)
/// - `"{name} principal"`: principal portion per period (Liabilities,
///   positive; paying down debt moves the total back toward zero)
///
/// The service column already debits cash for interest plus principal; the
/// interest column is untagged so nothing is counted twice.
pub fn loan(
    name: &str,
    start: Timestamp,
    end: Timestamp,
    amount: f64,
    rate: f64,
) -> Result<FinancialInstrument, ProjectionError> {
    let zero_day = start;
    let service_start = start.add_months(1);
    let service_end = end.add_months(1);

    let term = TimeIndex::build(service_start, service_end)?.len();
    let schedule = amortize(amount, rate, term);

    let mut instrument = FinancialInstrument::new(name);
    instrument.push(Column::one_time(
        format!("{name} cash"),
        zero_day,
        Tag::Cash,
        amount,
    )?);
    instrument.push(Column::one_time(
        format!("{name} liability"),
        zero_day,
        Tag::Liabilities,
        -amount,
    )?);
    instrument.push(Column::constant(
        format!("{name} service"),
        service_start,
        service_end,
        Tag::Cash,
        -schedule.payment,
    )?);
    instrument.push(Column::specified(
        format!("{name} interest"),
        service_start,
        service_end,
        Tag::None,
        schedule.interest,
    )?);
    instrument.push(Column::specified(
        format!("{name} principal"),
        service_start,
        service_end,
        Tag::Liabilities,
        schedule.principal,
    )?);

    Ok(instrument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ts(raw: u32) -> Timestamp {
        Timestamp::new(raw).unwrap()
    }

    #[test]
    fn test_loan_column_set() {
        let instrument = loan("car", ts(202401), ts(202412), 1200.0, 0.12).unwrap();
        let names: Vec<&str> = instrument.columns().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "car cash",
                "car liability",
                "car service",
                "car interest",
                "car principal"
            ]
        );
    }

    #[test]
    fn test_loan_origination_entries() {
        let instrument = loan("car", ts(202401), ts(202412), 1200.0, 0.12).unwrap();
        let cash = &instrument.columns()[0];
        assert_eq!(cash.tag(), Tag::Cash);
        assert_eq!(cash.start(), ts(202401));
        assert_eq!(cash.series().values(), &[1200.0]);

        let liability = &instrument.columns()[1];
        assert_eq!(liability.tag(), Tag::Liabilities);
        assert_eq!(liability.series().values(), &[-1200.0]);
    }

    #[test]
    fn test_loan_service_window_is_shifted() {
        let instrument = loan("car", ts(202401), ts(202412), 1200.0, 0.12).unwrap();
        let service = &instrument.columns()[2];
        assert_eq!(service.start(), ts(202402));
        assert_eq!(service.end(), ts(202501));
        assert_eq!(service.series().len(), 12);
        assert!((service.series().values()[0] + 106.62).abs() < 0.01);
    }

    #[test]
    fn test_loan_principal_pays_down_debt() {
        let instrument = loan("car", ts(202401), ts(202412), 1200.0, 0.12).unwrap();
        let principal = &instrument.columns()[4];
        assert_eq!(principal.tag(), Tag::Liabilities);

        // origination -P plus all principal paydowns nets the debt to ~0
        let total_paydown: f64 = principal.series().values().iter().sum();
        assert_relative_eq!(total_paydown, 1200.0, max_relative = 1e-6);
    }

    #[test]
    fn test_loan_interest_is_informational() {
        let instrument = loan("car", ts(202401), ts(202412), 1200.0, 0.12).unwrap();
        let interest = &instrument.columns()[3];
        assert_eq!(interest.tag(), Tag::None);
        assert!(interest.net_cash_delta().values().iter().all(|&v| v == 0.0));
        assert!((interest.series().values()[0] - 12.0).abs() < 1e-9);
    }
}
