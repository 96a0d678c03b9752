//! Claim list filtering
//!
//! Filters run over an already materialized list and never reorder it.

use serde::{Deserialize, Serialize};

use core_kernel::StatusId;

use crate::claim::EnrichedClaim;

/// Optional status and free-text filters, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFilter {
    /// Keep only this status; `None` or id 0 means any status
    pub status_id: Option<StatusId>,
    /// Case-insensitive substring of the claim id, month, or year
    pub search: Option<String>,
}

impl ClaimFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status_id: impl Into<StatusId>) -> Self {
        self.status_id = Some(status_id.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The status filter, if one is set and non-zero
    pub fn active_status(&self) -> Option<StatusId> {
        self.status_id.filter(|id| id.value() > 0)
    }

    /// The lower-cased search text, if it is set and not blank
    pub fn active_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_empty(&self) -> bool {
        self.active_status().is_none() && self.active_search().is_none()
    }

    /// Returns whether a single claim passes both filters
    pub fn matches(&self, claim: &EnrichedClaim) -> bool {
        self.matches_status(claim)
            && self
                .active_search()
                .map_or(true, |needle| matches_search(claim, &needle))
    }

    /// Keeps the matching claims in their original order
    pub fn apply(&self, claims: Vec<EnrichedClaim>) -> Vec<EnrichedClaim> {
        claims.into_iter().filter(|claim| self.matches(claim)).collect()
    }

    fn matches_status(&self, claim: &EnrichedClaim) -> bool {
        self.active_status().map_or(true, |id| claim.status_id() == id)
    }
}

fn matches_search(claim: &EnrichedClaim, needle: &str) -> bool {
    let period = &claim.claim.period;
    [
        claim.id().to_string(),
        period.month().to_string(),
        period.year().to_string(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{ClaimId, ClaimPeriod, LecturerId};
    use rust_decimal_macros::dec;

    use crate::claim::Claim;

    fn view(id: u32, status: u32, month: u32, year: i32) -> EnrichedClaim {
        EnrichedClaim::build(
            Claim {
                id: ClaimId::new(id),
                lecturer_id: LecturerId::new(1),
                period: ClaimPeriod::new(month, year).unwrap(),
                submitted_at: Utc::now(),
                total_amount: dec!(0),
                status_id: StatusId::new(status),
                is_verified: false,
                verification_notes: None,
            },
            None,
            &[],
        )
    }

    fn ids(claims: &[EnrichedClaim]) -> Vec<u32> {
        claims.iter().map(|c| c.id().value()).collect()
    }

    fn sample() -> Vec<EnrichedClaim> {
        vec![view(1, 3, 10, 2025), view(2, 4, 9, 2025), view(3, 2, 8, 2024)]
    }

    #[test]
    fn test_status_filter() {
        let filtered = ClaimFilter::new().with_status(3u32).apply(sample());
        assert_eq!(ids(&filtered), vec![1]);
    }

    #[test]
    fn test_zero_status_means_any() {
        let filtered = ClaimFilter::new().with_status(0u32).apply(sample());
        assert_eq!(ids(&filtered), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_matches_year() {
        let filtered = ClaimFilter::new().with_search("2025").apply(sample());
        assert_eq!(ids(&filtered), vec![1, 2]);
    }

    #[test]
    fn test_search_matches_id_and_month() {
        // "3" is claim 3's id; no month or year contains it
        assert_eq!(ids(&ClaimFilter::new().with_search("3").apply(sample())), vec![3]);
        // "9" matches claim 2's month
        assert_eq!(ids(&ClaimFilter::new().with_search("9").apply(sample())), vec![2]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = ClaimFilter::new().with_status(4u32).with_search("2025");
        assert_eq!(ids(&filter.apply(sample())), vec![2]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = ClaimFilter::new().with_search("   ");
        assert!(filter.is_empty());
        assert_eq!(filter.apply(sample()).len(), 3);
    }

    #[test]
    fn test_order_is_preserved() {
        let reversed: Vec<_> = sample().into_iter().rev().collect();
        assert_eq!(ids(&ClaimFilter::new().with_search("202").apply(reversed)), vec![3, 2, 1]);
    }
}
