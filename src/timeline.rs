//! Monthly timestamp encoding and the shared timeline index
//!
//! Every column in the system is keyed by an integer `YYYYMM` timestamp
//! (e.g. `202401` = January 2024). The timeline steps by one calendar month
//! with a 12 -> 1 rollover at year boundaries.

use crate::error::ProjectionError;
use serde::Serialize;
use std::fmt;

/// A calendar month encoded as `year * 100 + month`, `month` in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Validate and wrap a raw `YYYYMM` value.
    pub fn new(raw: u32) -> Result<Self, ProjectionError> {
        let month = raw % 100;
        if !(1..=12).contains(&month) {
            return Err(ProjectionError::InvalidTimestamp(raw));
        }
        Ok(Self(raw))
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn year(self) -> u32 {
        self.0 / 100
    }

    pub fn month(self) -> u32 {
        self.0 % 100
    }

    /// Zero-based month count since year 0, used for month arithmetic.
    fn ordinal(self) -> i64 {
        self.year() as i64 * 12 + self.month() as i64 - 1
    }

    /// Step forward by `months`, carrying years past December.
    pub fn add_months(self, months: u32) -> Self {
        let ordinal = self.ordinal() + months as i64;
        let year = (ordinal / 12) as u32;
        let month = (ordinal % 12) as u32 + 1;
        Self(year * 100 + month)
    }

    /// The next calendar month.
    pub fn next(self) -> Self {
        self.add_months(1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: Timestamp) -> i64 {
        other.ordinal() - self.ordinal()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered monthly timestamps from `start` to `end` inclusive.
///
/// Built once and consumed as a plain sequence; every column and the master
/// ledger share this construction so their rows always line up.
#[derive(Debug, Clone)]
pub struct TimeIndex {
    start: Timestamp,
    end: Timestamp,
    stamps: Vec<Timestamp>,
}

impl TimeIndex {
    /// Build the inclusive monthly sequence over `[start, end]`.
    ///
    /// Fails with `InvalidRange` when `start > end`; an empty timeline is
    /// never meaningful here.
    pub fn build(start: Timestamp, end: Timestamp) -> Result<Self, ProjectionError> {
        if start > end {
            return Err(ProjectionError::InvalidRange { start, end });
        }

        let mut stamps = Vec::with_capacity(start.months_until(end) as usize + 1);
        let mut current = start;
        while current <= end {
            stamps.push(current);
            current = current.next();
        }

        Ok(Self { start, end, stamps })
    }

    /// Build from raw `YYYYMM` bounds, validating both.
    pub fn from_raw(start: u32, end: u32) -> Result<Self, ProjectionError> {
        Self::build(Timestamp::new(start)?, Timestamp::new(end)?)
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn as_slice(&self) -> &[Timestamp] {
        &self.stamps
    }

    pub fn iter(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.stamps.iter().copied()
    }

    /// Row index of `ts` within this timeline, by month arithmetic.
    pub fn position(&self, ts: Timestamp) -> Option<usize> {
        if ts < self.start || ts > self.end {
            return None;
        }
        Some(self.start.months_until(ts) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_validation() {
        assert!(Timestamp::new(202401).is_ok());
        assert!(Timestamp::new(202412).is_ok());
        assert!(Timestamp::new(202400).is_err());
        assert!(Timestamp::new(202413).is_err());
        assert!(Timestamp::new(202499).is_err());
    }

    #[test]
    fn test_add_months_carries_years() {
        let nov = Timestamp::new(202311).unwrap();
        assert_eq!(nov.add_months(1).raw(), 202312);
        assert_eq!(nov.add_months(2).raw(), 202401);
        assert_eq!(nov.add_months(14).raw(), 202601);

        let dec = Timestamp::new(202312).unwrap();
        assert_eq!(dec.add_months(1).raw(), 202401);
        assert_eq!(dec.add_months(12).raw(), 202412);
    }

    #[test]
    fn test_months_until() {
        let a = Timestamp::new(202311).unwrap();
        let b = Timestamp::new(202402).unwrap();
        assert_eq!(a.months_until(b), 3);
        assert_eq!(b.months_until(a), -3);
        assert_eq!(a.months_until(a), 0);
    }

    #[test]
    fn test_index_simple() {
        let index = TimeIndex::from_raw(202401, 202403).unwrap();
        let raw: Vec<u32> = index.iter().map(|t| t.raw()).collect();
        assert_eq!(raw, vec![202401, 202402, 202403]);
    }

    #[test]
    fn test_index_year_rollover() {
        let index = TimeIndex::from_raw(202312, 202402).unwrap();
        let raw: Vec<u32> = index.iter().map(|t| t.raw()).collect();
        assert_eq!(raw, vec![202312, 202401, 202402]);
    }

    #[test]
    fn test_index_single_month() {
        let index = TimeIndex::from_raw(202406, 202406).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.start(), index.end());
    }

    #[test]
    fn test_index_rejects_bad_bounds() {
        assert!(TimeIndex::from_raw(202413, 202501).is_err());
        assert!(TimeIndex::from_raw(202401, 202400).is_err());
    }

    #[test]
    fn test_index_rejects_inverted_range() {
        let result = TimeIndex::from_raw(202406, 202401);
        assert!(matches!(result, Err(ProjectionError::InvalidRange { .. })));
    }

    #[test]
    fn test_position() {
        let index = TimeIndex::from_raw(202311, 202402).unwrap();
        assert_eq!(index.position(Timestamp::new(202311).unwrap()), Some(0));
        assert_eq!(index.position(Timestamp::new(202312).unwrap()), Some(1));
        assert_eq!(index.position(Timestamp::new(202402).unwrap()), Some(3));
        assert_eq!(index.position(Timestamp::new(202403).unwrap()), None);
        assert_eq!(index.position(Timestamp::new(202310).unwrap()), None);
    }
}
