//! JSON configuration model and instrument construction
//!
//! A config document groups instrument definitions under `loans`, `assets`,
//! and `incomes`. Mode strings (`appreciation_type`, `income_type`, income
//! `type`) are resolved here; their argument objects are decoded per mode,
//! mirroring the keyword-argument shape of the config format.

mod loader;

pub use loader::{
    load_config, load_income_schedule, load_income_schedule_from_reader, load_rate_schedule,
    load_rate_schedule_from_reader,
};

use crate::error::ProjectionError;
use crate::instrument::{
    cash_flow_asset, loan, simple_income_stream, specified_income_stream, AppreciationMode,
    FinancialInstrument, IncomeMode,
};
use crate::timeline::Timestamp;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration document. All sections are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub loans: Vec<LoanConfig>,
    #[serde(default)]
    pub assets: Vec<AssetConfig>,
    #[serde(default)]
    pub incomes: Vec<IncomeConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoanConfig {
    pub name: String,
    pub start_timestamp: u32,
    pub end_timestamp: u32,
    pub loan_amount: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    pub name: String,
    pub start_timestamp: u32,
    pub end_timestamp: u32,
    pub asset_cost: f64,
    pub appreciation_type: String,
    pub appreciation_args: serde_json::Value,
    pub income_type: String,
    pub income_args: serde_json::Value,
}

/// An income entry: either an externally scheduled stream (discriminated by
/// its `type`/`csv_path` fields) or a simple constant stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IncomeConfig {
    Specified(SpecifiedIncomeConfig),
    Simple(SimpleIncomeConfig),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleIncomeConfig {
    pub name: String,
    pub start_timestamp: u32,
    pub end_timestamp: u32,
    pub income_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecifiedIncomeConfig {
    pub name: String,
    pub csv_path: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConstantAppreciationArgs {
    appreciation_amount: f64,
}

#[derive(Debug, Deserialize)]
struct SpecifiedAppreciationArgs {
    csv_loc: String,
}

#[derive(Debug, Deserialize)]
struct ConstantIncomeArgs {
    income_amount: f64,
}

#[derive(Debug, Deserialize)]
struct ProportionalIncomeArgs {
    proportion: f64,
}

/// Construct every instrument the config describes, failing on the first
/// bad entry. Schedule CSV paths are resolved relative to `base_dir`
/// (normally the config file's directory).
pub fn build_instruments(
    config: &Config,
    base_dir: &Path,
) -> Result<Vec<FinancialInstrument>, ProjectionError> {
    let mut instruments = Vec::new();

    for cfg in &config.loans {
        let start = Timestamp::new(cfg.start_timestamp)?;
        let end = Timestamp::new(cfg.end_timestamp)?;
        debug!("building loan \"{}\"", cfg.name);
        instruments.push(loan(&cfg.name, start, end, cfg.loan_amount, cfg.rate)?);
    }

    for cfg in &config.assets {
        debug!("building asset \"{}\"", cfg.name);
        instruments.push(build_asset(cfg, base_dir)?);
    }

    for cfg in &config.incomes {
        match cfg {
            IncomeConfig::Specified(scheduled) => {
                if scheduled.kind != "manual_schedule" {
                    return Err(ProjectionError::UnknownScheduleType {
                        kind: "income",
                        value: scheduled.kind.clone(),
                    });
                }
                debug!("building scheduled income \"{}\"", scheduled.name);
                let schedule = load_income_schedule(&resolve(base_dir, &scheduled.csv_path))?;
                instruments.push(specified_income_stream(
                    &scheduled.name,
                    &schedule,
                    scheduled.percentage,
                )?);
            }
            IncomeConfig::Simple(simple) => {
                let start = Timestamp::new(simple.start_timestamp)?;
                let end = Timestamp::new(simple.end_timestamp)?;
                debug!("building income \"{}\"", simple.name);
                instruments.push(simple_income_stream(
                    &simple.name,
                    start,
                    end,
                    simple.income_amount,
                )?);
            }
        }
    }

    Ok(instruments)
}

fn build_asset(cfg: &AssetConfig, base_dir: &Path) -> Result<FinancialInstrument, ProjectionError> {
    let start = Timestamp::new(cfg.start_timestamp)?;
    let end = Timestamp::new(cfg.end_timestamp)?;

    let appreciation = match cfg.appreciation_type.as_str() {
        "constant" => {
            let args: ConstantAppreciationArgs =
                serde_json::from_value(cfg.appreciation_args.clone())?;
            AppreciationMode::Constant {
                amount: args.appreciation_amount,
            }
        }
        "specified" => {
            let args: SpecifiedAppreciationArgs =
                serde_json::from_value(cfg.appreciation_args.clone())?;
            let schedule = load_rate_schedule(&resolve(base_dir, &args.csv_loc))?;
            AppreciationMode::Specified { schedule }
        }
        other => {
            return Err(ProjectionError::UnknownScheduleType {
                kind: "appreciation",
                value: other.to_string(),
            })
        }
    };

    let income = match cfg.income_type.as_str() {
        "constant" => {
            let args: ConstantIncomeArgs = serde_json::from_value(cfg.income_args.clone())?;
            IncomeMode::Constant {
                amount: args.income_amount,
            }
        }
        "proportional" => {
            let args: ProportionalIncomeArgs = serde_json::from_value(cfg.income_args.clone())?;
            IncomeMode::Proportional {
                proportion: args.proportion,
            }
        }
        other => {
            return Err(ProjectionError::UnknownScheduleType {
                kind: "income",
                value: other.to_string(),
            })
        }
    };

    cash_flow_asset(&cfg.name, start, end, cfg.asset_cost, appreciation, income)
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerBuilder;

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = serde_json::from_str(r#"{}"#).unwrap();
        assert!(config.loans.is_empty());
        assert!(config.assets.is_empty());
        assert!(config.incomes.is_empty());
    }

    #[test]
    fn test_parse_income_variants() {
        let config: Config = serde_json::from_str(
            r#"{
                "incomes": [
                    {"name": "salary", "start_timestamp": 202401, "end_timestamp": 202412, "income_amount": 5000.0},
                    {"name": "contract", "csv_path": "contract.csv", "type": "manual_schedule", "percentage": 0.5}
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(config.incomes[0], IncomeConfig::Simple(_)));
        match &config.incomes[1] {
            IncomeConfig::Specified(scheduled) => {
                assert_eq!(scheduled.kind, "manual_schedule");
                assert_eq!(scheduled.percentage, Some(0.5));
            }
            other => panic!("expected specified income, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_appreciation_type_fails() {
        let config: Config = serde_json::from_str(
            r#"{
                "assets": [{
                    "name": "x", "start_timestamp": 202401, "end_timestamp": 202412,
                    "asset_cost": 1000.0,
                    "appreciation_type": "magic", "appreciation_args": {},
                    "income_type": "constant", "income_args": {"income_amount": 1.0}
                }]
            }"#,
        )
        .unwrap();

        let result = build_instruments(&config, Path::new("."));
        assert!(matches!(
            result,
            Err(ProjectionError::UnknownScheduleType { kind: "appreciation", .. })
        ));
    }

    #[test]
    fn test_unknown_income_kind_fails() {
        let config: Config = serde_json::from_str(
            r#"{
                "incomes": [
                    {"name": "x", "csv_path": "x.csv", "type": "telepathy"}
                ]
            }"#,
        )
        .unwrap();

        let result = build_instruments(&config, Path::new("."));
        assert!(matches!(
            result,
            Err(ProjectionError::UnknownScheduleType { kind: "income", .. })
        ));
    }

    #[test]
    fn test_bad_timestamp_in_config_fails() {
        let config: Config = serde_json::from_str(
            r#"{
                "loans": [{"name": "l", "start_timestamp": 202413, "end_timestamp": 202512,
                           "loan_amount": 1000.0, "rate": 0.05}]
            }"#,
        )
        .unwrap();

        let result = build_instruments(&config, Path::new("."));
        assert!(matches!(
            result,
            Err(ProjectionError::InvalidTimestamp(202413))
        ));
    }

    #[test]
    fn test_demo_config_builds_a_ledger() {
        let config = load_config(Path::new("demos/config.json")).unwrap();
        let instruments = build_instruments(&config, Path::new("demos")).unwrap();
        assert_eq!(instruments.len(), 4);

        let mut builder = LedgerBuilder::new();
        for instrument in instruments {
            builder.register(instrument);
        }
        let ledger = builder.finalize().unwrap();

        // loan service runs one month past the configured end, so the
        // master range does too
        assert_eq!(ledger.timestamps()[0].raw(), 202401);
        assert_eq!(ledger.timestamps()[ledger.len() - 1].raw(), 202701);
        assert!(ledger.column("net_worth").is_some());
    }
}
