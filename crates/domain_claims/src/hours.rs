//! Hours worked entries attached to a claim

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, HoursWorkedId};
use crate::error::ClaimError;

/// Smallest number of hours a single entry may record
pub const MIN_HOURS: Decimal = dec!(0.1);
/// Largest number of hours a single entry may record
pub const MAX_HOURS: Decimal = dec!(24.0);
/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// An hours line as entered by a lecturer, before it belongs to a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub date_worked: NaiveDate,
    pub hours: Decimal,
    pub description: String,
}

impl HoursEntry {
    pub fn new(date_worked: NaiveDate, hours: Decimal, description: impl Into<String>) -> Self {
        Self {
            date_worked,
            hours,
            description: description.into(),
        }
    }

    /// Checks the hours range and description
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if hours are outside 0.1-24.0 or the description is
    /// blank or too long.
    pub fn validate(&self) -> Result<(), ClaimError> {
        check_line(self.hours, &self.description)
    }
}

/// A persisted hours line, owned by exactly one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursWorked {
    pub id: HoursWorkedId,
    pub claim_id: ClaimId,
    pub date_worked: NaiveDate,
    pub hours: Decimal,
    pub description: String,
}

impl HoursWorked {
    /// Attaches an entry to a claim under the given id
    pub fn attach(id: HoursWorkedId, claim_id: ClaimId, entry: HoursEntry) -> Self {
        Self {
            id,
            claim_id,
            date_worked: entry.date_worked,
            hours: entry.hours,
            description: entry.description,
        }
    }

    /// Applies the same checks as [`HoursEntry::validate`]
    pub fn validate(&self) -> Result<(), ClaimError> {
        check_line(self.hours, &self.description)
    }
}

fn check_line(hours: Decimal, description: &str) -> Result<(), ClaimError> {
    if hours <= Decimal::ZERO {
        return Err(ClaimError::validation(format!("Hours must be greater than zero, got {hours}")));
    }
    if hours < MIN_HOURS || hours > MAX_HOURS {
        return Err(ClaimError::validation(format!(
            "Hours must be between {MIN_HOURS} and {MAX_HOURS}, got {hours}"
        )));
    }
    if description.trim().is_empty() {
        return Err(ClaimError::validation("Description is required"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ClaimError::validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Sums the hours of a set of lines
pub fn total_hours<'a>(hours: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    hours.into_iter().copied().sum()
}
