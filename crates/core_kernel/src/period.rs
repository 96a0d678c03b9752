//! Claim period handling
//!
//! A claim covers one calendar month. This module provides the validated
//! month/year value type and the human-readable label shown next to claims.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest year a claim period may refer to
pub const MIN_YEAR: i32 = 1900;
/// Latest year a claim period may refer to
pub const MAX_YEAR: i32 = 9999;

/// Errors related to claim periods
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Year must be between 1900 and 9999, got {0}")]
    InvalidYear(i32),
}

/// The calendar month a claim is submitted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod", into = "RawPeriod")]
pub struct ClaimPeriod {
    // Field order gives chronological ordering
    year: i32,
    month: u32,
}

#[derive(Serialize, Deserialize)]
struct RawPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawPeriod> for ClaimPeriod {
    type Error = PeriodError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        ClaimPeriod::new(raw.month, raw.year)
    }
}

impl From<ClaimPeriod> for RawPeriod {
    fn from(period: ClaimPeriod) -> Self {
        RawPeriod {
            month: period.month,
            year: period.year,
        }
    }
}

impl ClaimPeriod {
    /// Creates a period, validating month (1-12) and year
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// First day of the period
    pub fn first_day(&self) -> NaiveDate {
        // Month and year are range-checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Returns whether the date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Display label such as `October 2025`
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}
