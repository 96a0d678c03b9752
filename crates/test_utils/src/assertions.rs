//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for claim views that give
//! more meaningful error messages than standard assertions.

use core_kernel::ClaimId;
use domain_claims::{claim_total, ClaimStatus, EnrichedClaim, HoursWorked, Lecturer};

/// Asserts that a claim's total equals its hours times the lecturer's rate
///
/// # Panics
///
/// Panics if the total differs from `sum(hours) * hourly_rate`
pub fn assert_total_consistent(claim: &EnrichedClaim, lecturer: &Lecturer, hours: &[HoursWorked]) {
    let expected = claim_total(hours, lecturer.hourly_rate);
    assert_eq!(
        claim.claim.total_amount, expected,
        "Claim {} total {} does not match {} hours at {}",
        claim.id(),
        claim.claim.total_amount,
        hours.iter().map(|h| h.hours).sum::<rust_decimal::Decimal>(),
        lecturer.hourly_rate
    );
}

/// Asserts that every claim in a list has the given status
pub fn assert_all_status(claims: &[EnrichedClaim], status: ClaimStatus) {
    for claim in claims {
        assert_eq!(
            claim.status_id(),
            status.id(),
            "Claim {} has status {:?}, expected {}",
            claim.id(),
            claim.status_name,
            status
        );
    }
}

/// Asserts that a list holds exactly these claim ids, in this order
pub fn assert_claim_ids(claims: &[EnrichedClaim], expected: &[u32]) {
    let actual: Vec<u32> = claims.iter().map(|c| c.id().value()).collect();
    assert_eq!(actual, expected, "Unexpected claim ids");
}

/// Asserts that ids are strictly increasing
pub fn assert_strictly_increasing(ids: &[ClaimId]) {
    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1], "Claim ids not increasing: {} then {}", pair[0], pair[1]);
    }
}

/// Asserts that a claim view carries every display field
pub fn assert_enriched(claim: &EnrichedClaim) {
    assert!(claim.lecturer_name.is_some(), "Claim {} has no lecturer name", claim.id());
    assert!(claim.lecturer_email.is_some(), "Claim {} has no lecturer email", claim.id());
    assert!(claim.status_name.is_some(), "Claim {} has no status name", claim.id());
    assert!(!claim.period_label.is_empty(), "Claim {} has no period label", claim.id());
}
