//! File loaders: JSON config and CSV schedule tables
//!
//! Schedule CSVs are two-column tables keyed by `YYYYMM` timestamp:
//! `timestamp,pct` for annual-percentage appreciation schedules and
//! `timestamp,income` for manually scheduled income streams.

use super::Config;
use crate::error::ProjectionError;
use crate::instrument::Schedule;
use crate::timeline::Timestamp;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load and deserialize a JSON configuration file.
pub fn load_config(path: &Path) -> Result<Config, ProjectionError> {
    let file = File::open(path)?;
    let config = serde_json::from_reader(file)?;
    Ok(config)
}

#[derive(Debug, serde::Deserialize)]
struct RateRow {
    timestamp: u32,
    pct: f64,
}

#[derive(Debug, serde::Deserialize)]
struct IncomeRow {
    timestamp: u32,
    income: f64,
}

/// Load an annual-percentage appreciation schedule from CSV.
pub fn load_rate_schedule(path: &Path) -> Result<Schedule, ProjectionError> {
    load_rate_schedule_from_reader(File::open(path)?)
}

/// Load an appreciation schedule from any reader (e.g. a string buffer).
pub fn load_rate_schedule_from_reader<R: Read>(reader: R) -> Result<Schedule, ProjectionError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for result in csv_reader.deserialize() {
        let row: RateRow = result?;
        entries.push((Timestamp::new(row.timestamp)?, row.pct));
    }
    Ok(Schedule::new(entries))
}

/// Load a manually scheduled income table from CSV.
pub fn load_income_schedule(path: &Path) -> Result<Schedule, ProjectionError> {
    load_income_schedule_from_reader(File::open(path)?)
}

/// Load an income schedule from any reader (e.g. a string buffer).
pub fn load_income_schedule_from_reader<R: Read>(reader: R) -> Result<Schedule, ProjectionError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for result in csv_reader.deserialize() {
        let row: IncomeRow = result?;
        entries.push((Timestamp::new(row.timestamp)?, row.income));
    }
    Ok(Schedule::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_schedule_from_reader() {
        let csv = "timestamp,pct\n202401,0.03\n202402,0.03\n202403,0.045\n";
        let schedule = load_rate_schedule_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.start().unwrap().raw(), 202401);
        assert_eq!(schedule.end().unwrap().raw(), 202403);
        let values: Vec<f64> = schedule.values().collect();
        assert_eq!(values, vec![0.03, 0.03, 0.045]);
    }

    #[test]
    fn test_income_schedule_from_reader() {
        let csv = "timestamp,income\n202411,1500\n202412,1500\n202501,1750\n";
        let schedule = load_income_schedule_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.end().unwrap().raw(), 202501);
    }

    #[test]
    fn test_schedule_rejects_bad_timestamp() {
        let csv = "timestamp,pct\n202401,0.03\n202413,0.03\n";
        let result = load_rate_schedule_from_reader(csv.as_bytes());
        assert!(matches!(
            result,
            Err(ProjectionError::InvalidTimestamp(202413))
        ));
    }

    #[test]
    fn test_schedule_rejects_malformed_row() {
        let csv = "timestamp,pct\n202401,not_a_number\n";
        let result = load_rate_schedule_from_reader(csv.as_bytes());
        assert!(matches!(result, Err(ProjectionError::Csv(_))));
    }

    #[test]
    fn test_load_demo_files() {
        let config = load_config(Path::new("demos/config.json")).unwrap();
        assert_eq!(config.loans.len(), 1);
        assert_eq!(config.assets.len(), 1);
        assert_eq!(config.incomes.len(), 2);

        let rates = load_rate_schedule(Path::new("demos/growth_schedule.csv")).unwrap();
        assert!(rates.ensure_contiguous("growth").is_ok());

        let income = load_income_schedule(Path::new("demos/contract_income.csv")).unwrap();
        assert!(income.ensure_contiguous("contract").is_ok());
    }
}
