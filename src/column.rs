//! Tagged time-series columns and the delta projection contract
//!
//! A `Column` is a named series over a sub-range of the timeline, tagged
//! with the one net total it contributes to. Every column answers all three
//! delta questions, returning zeros for the totals it does not affect, so
//! the ledger fold never needs to know what kind of column it is holding.

use crate::error::ProjectionError;
use crate::timeline::{TimeIndex, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which net total a column contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// Informational only (e.g. interest-paid detail); affects no total.
    None,
    /// Contributes to the running cash balance.
    Cash,
    /// Contributes to the assets total.
    Assets,
    /// Contributes to the liabilities total.
    Liabilities,
}

/// A materialized column: one value per timestamp over `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    timestamps: Vec<Timestamp>,
    values: Vec<f64>,
}

impl Series {
    fn from_index(index: &TimeIndex, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self {
            timestamps: index.as_slice().to_vec(),
            values,
        }
    }

    fn constant(index: &TimeIndex, amount: f64) -> Self {
        Self::from_index(index, vec![amount; index.len()])
    }

    fn zeros(index: &TimeIndex) -> Self {
        Self::constant(index, 0.0)
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(timestamp, value)` pairs in timeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }
}

/// How a column's values are produced when first materialized.
#[derive(Debug, Clone)]
enum ColumnSource {
    /// The same amount every period.
    Constant(f64),
    /// An explicit per-period value vector covering the whole range.
    Specified(Vec<f64>),
}

/// A named, tagged time series over `[start, end]`.
///
/// Materialization is lazy and memoized: the first call to `series` computes
/// the values, every later call returns the same allocation. Columns are
/// immutable after construction, so materialization order never matters.
#[derive(Debug)]
pub struct Column {
    name: String,
    index: TimeIndex,
    tag: Tag,
    source: ColumnSource,
    cache: OnceLock<Series>,
}

impl Column {
    /// A column holding `amount` in every period of `[start, end]`.
    pub fn constant(
        name: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
        tag: Tag,
        amount: f64,
    ) -> Result<Self, ProjectionError> {
        let index = TimeIndex::build(start, end)?;
        Ok(Self {
            name: name.into(),
            index,
            tag,
            source: ColumnSource::Constant(amount),
            cache: OnceLock::new(),
        })
    }

    /// A column holding one explicit value per period of `[start, end]`.
    ///
    /// `values` must cover the range exactly.
    pub fn specified(
        name: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
        tag: Tag,
        values: Vec<f64>,
    ) -> Result<Self, ProjectionError> {
        let name = name.into();
        let index = TimeIndex::build(start, end)?;
        if values.len() != index.len() {
            return Err(ProjectionError::SeriesLengthMismatch {
                name,
                expected: index.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            name,
            index,
            tag,
            source: ColumnSource::Specified(values),
            cache: OnceLock::new(),
        })
    }

    /// A column of a single value at one timestamp (origination entries).
    pub fn one_time(
        name: impl Into<String>,
        at: Timestamp,
        tag: Tag,
        amount: f64,
    ) -> Result<Self, ProjectionError> {
        Self::constant(name, at, at, tag, amount)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> Timestamp {
        self.index.start()
    }

    pub fn end(&self) -> Timestamp {
        self.index.end()
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Materialize the column's own value series, memoized.
    pub fn series(&self) -> &Series {
        self.cache.get_or_init(|| match &self.source {
            ColumnSource::Constant(amount) => Series::constant(&self.index, *amount),
            ColumnSource::Specified(values) => Series::from_index(&self.index, values.clone()),
        })
    }

    /// Own series iff tagged `Cash`, otherwise zeros over the same range.
    pub fn net_cash_delta(&self) -> Series {
        self.delta(Tag::Cash)
    }

    /// Own series iff tagged `Assets`, otherwise zeros over the same range.
    pub fn assets_delta(&self) -> Series {
        self.delta(Tag::Assets)
    }

    /// Own series iff tagged `Liabilities`, otherwise zeros over the same range.
    pub fn liabilities_delta(&self) -> Series {
        self.delta(Tag::Liabilities)
    }

    fn delta(&self, total: Tag) -> Series {
        if self.tag == total {
            self.series().clone()
        } else {
            Series::zeros(&self.index)
        }
    }
}
