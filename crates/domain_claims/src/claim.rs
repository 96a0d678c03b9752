//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, ClaimPeriod, LecturerId, StatusId};
use crate::error::ClaimError;
use crate::hours::{total_hours, HoursWorked};
use crate::lecturer::Lecturer;
use crate::status::ClaimStatus;

/// What a lecturer fills in before submitting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ClaimDraft {
    pub lecturer_id: LecturerId,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 1900, max = 9999))]
    pub year: i32,
}

impl ClaimDraft {
    pub fn new(lecturer_id: LecturerId, month: u32, year: i32) -> Self {
        Self { lecturer_id, month, year }
    }

    /// Validates the draft and returns its claim period
    pub fn period(&self) -> Result<ClaimPeriod, ClaimError> {
        self.validate()?;
        Ok(ClaimPeriod::new(self.month, self.year)?)
    }
}

/// A monthly claim for payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Owning lecturer
    pub lecturer_id: LecturerId,
    /// Month and year claimed for
    pub period: ClaimPeriod,
    /// When the claim entered the system
    pub submitted_at: DateTime<Utc>,
    /// Sum of hours times the lecturer's rate
    pub total_amount: Decimal,
    /// Current catalog status
    pub status_id: StatusId,
    /// Manager verification flag, independent of status
    pub is_verified: bool,
    /// Manager verification notes
    pub verification_notes: Option<String>,
}

impl Claim {
    /// Returns the catalog status, if the id is known
    pub fn status(&self) -> Option<ClaimStatus> {
        ClaimStatus::from_id(self.status_id)
    }

    /// Returns whether the claim currently has the given status
    pub fn has_status(&self, status: ClaimStatus) -> bool {
        self.status_id == status.id()
    }

    /// Re-derives the total from the current hours and rate
    ///
    /// A claim whose lecturer is missing is priced at a zero rate.
    pub fn reprice(&mut self, lecturer: Option<&Lecturer>, hours: &[HoursWorked]) {
        let rate = lecturer.map_or(Decimal::ZERO, |l| l.hourly_rate);
        self.total_amount = claim_total(hours, rate);
    }

    /// Applies an explicit patch
    pub fn apply(&mut self, patch: &ClaimPatch) {
        if let Some(status_id) = patch.status_id {
            self.status_id = status_id;
        }
        if let Some(verification) = &patch.verification {
            self.is_verified = verification.is_verified;
            self.verification_notes = verification.notes.clone();
        }
    }
}

/// Amount owed for a set of hours at a rate
pub fn claim_total(hours: &[HoursWorked], hourly_rate: Decimal) -> Decimal {
    total_hours(hours.iter().map(|line| &line.hours)) * hourly_rate
}

/// Verification fields written together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationUpdate {
    pub is_verified: bool,
    pub notes: Option<String>,
}

/// Explicit update applied to a stored claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimPatch {
    pub status_id: Option<StatusId>,
    pub verification: Option<VerificationUpdate>,
    /// Apply only if the claim is currently in this status
    #[serde(default)]
    pub expected_status: Option<StatusId>,
}

impl ClaimPatch {
    pub fn status(status_id: StatusId) -> Self {
        Self {
            status_id: Some(status_id),
            ..Default::default()
        }
    }

    pub fn verification(is_verified: bool, notes: Option<String>) -> Self {
        Self {
            verification: Some(VerificationUpdate { is_verified, notes }),
            ..Default::default()
        }
    }

    /// Makes the patch conditional on the claim's current status
    pub fn when_status(mut self, status_id: StatusId) -> Self {
        self.expected_status = Some(status_id);
        self
    }

    /// Returns whether the claim satisfies the patch precondition
    pub fn permits(&self, claim: &Claim) -> bool {
        self.expected_status.map_or(true, |expected| claim.status_id == expected)
    }

    pub fn is_empty(&self) -> bool {
        self.status_id.is_none() && self.verification.is_none()
    }
}

/// A claim with its transient display fields filled in
///
/// Display fields are recomputed on every read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedClaim {
    #[serde(flatten)]
    pub claim: Claim,
    pub lecturer_name: Option<String>,
    pub lecturer_email: Option<String>,
    pub period_label: String,
    pub status_name: Option<String>,
}

impl EnrichedClaim {
    /// Builds the display view and re-derives the total from current hours and rate
    pub fn build(mut claim: Claim, lecturer: Option<&Lecturer>, hours: &[HoursWorked]) -> Self {
        claim.reprice(lecturer, hours);

        Self {
            lecturer_name: lecturer.map(Lecturer::full_name),
            lecturer_email: lecturer.map(|l| l.email.clone()),
            period_label: claim.period.label(),
            status_name: claim.status().map(|s| s.name().to_string()),
            claim,
        }
    }

    pub fn id(&self) -> ClaimId {
        self.claim.id
    }

    pub fn status_id(&self) -> StatusId {
        self.claim.status_id
    }
}
