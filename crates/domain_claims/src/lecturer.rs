//! Lecturers and staff who appear on claims

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::LecturerId;
use crate::error::ClaimError;

/// Role tag carried by a staff record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LecturerRole {
    #[default]
    Lecturer,
    Coordinator,
    #[serde(rename = "HR")]
    Hr,
    Manager,
}

/// A lecturer (or other staff member) referenced by claims
///
/// Claims refer to lecturers by id only. The hourly rate is read at every
/// enrichment pass, so a claim total always reflects the current rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Lecturer {
    pub id: LecturerId,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Rate paid per hour worked
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub role: LecturerRole,
    #[validate(email)]
    pub email: String,
}

impl Lecturer {
    /// Creates a lecturer record with the `Lecturer` role
    pub fn new(
        id: LecturerId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        hourly_rate: Decimal,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            hourly_rate,
            role: LecturerRole::Lecturer,
            email: email.into(),
        }
    }

    /// Sets the role tag
    pub fn with_role(mut self, role: LecturerRole) -> Self {
        self.role = role;
        self
    }

    /// Display name, `First Last`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Validates the record before it enters the store
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` for blank names, a malformed email,
    /// or a negative hourly rate.
    pub fn validate_record(&self) -> Result<(), ClaimError> {
        self.validate()?;
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(ClaimError::validation("Lecturer name must not be blank"));
        }
        if self.hourly_rate < Decimal::ZERO {
            return Err(ClaimError::validation(format!(
                "Hourly rate must not be negative, got {}",
                self.hourly_rate
            )));
        }
        Ok(())
    }
}
