//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use domain_claims::{ClaimStatus, DocumentUpload, HoursEntry, ALLOWED_EXTENSIONS, MAX_DOCUMENT_BYTES};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for valid hours, 0.1 to 24.0 in tenths
pub fn valid_hours_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=240i64).prop_map(|tenths| Decimal::new(tenths, 1))
}

/// Strategy for hourly rates, 0.00 to 2000.00 in cents
pub fn hourly_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=200_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for non-blank descriptions within the length limit
pub fn description_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.-]{0,60}"
}

/// Strategy for a valid hours entry in October 2025
pub fn hours_entry_strategy() -> impl Strategy<Value = HoursEntry> {
    (1u32..=31u32, valid_hours_strategy(), description_strategy()).prop_map(|(day, hours, description)| {
        let date = NaiveDate::from_ymd_opt(2025, 10, day).unwrap_or_default();
        HoursEntry::new(date, hours, description)
    })
}

/// Strategy for one to eight valid hours entries
pub fn hours_entries_strategy() -> impl Strategy<Value = Vec<HoursEntry>> {
    prop::collection::vec(hours_entry_strategy(), 1..8)
}

/// Strategy for catalog statuses
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop::sample::select(ClaimStatus::ALL.to_vec())
}

/// Strategy for uploads that pass intake
pub fn valid_upload_strategy() -> impl Strategy<Value = DocumentUpload> {
    (
        "[a-z_]{1,12}",
        prop::sample::select(ALLOWED_EXTENSIONS.to_vec()),
        0u64..=MAX_DOCUMENT_BYTES,
    )
        .prop_map(|(stem, ext, size)| {
            DocumentUpload::new(format!("{stem}.{ext}"), format!("/uploads/{stem}.{ext}"), size)
        })
}

/// Strategy for uploads that are too large
pub fn oversized_upload_strategy() -> impl Strategy<Value = DocumentUpload> {
    (MAX_DOCUMENT_BYTES + 1..=MAX_DOCUMENT_BYTES * 4)
        .prop_map(|size| DocumentUpload::new("big.pdf", "/uploads/big.pdf", size))
}
