//! Role desks
//!
//! A desk is what one role's screen needs from the core: the claim list it
//! shows, the filter state behind that list, and which actions it offers on
//! a selected claim. Action gating lives here, not in the service; the
//! service accepts any status change.

use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{ClaimId, LecturerId, StatusId};
use domain_claims::{
    Claim, ClaimDraft, ClaimError, ClaimEvent, ClaimFilter, ClaimService, ClaimStatus, DocumentUpload,
    EnrichedClaim, HoursEntry, Lecturer,
};

use crate::error::ConsoleError;

/// An action a desk may offer on a selected claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeskAction {
    Approve,
    Reject,
    Verify,
    ProcessPayment,
}

impl DeskAction {
    pub fn name(self) -> &'static str {
        match self {
            DeskAction::Approve => "approve",
            DeskAction::Reject => "reject",
            DeskAction::Verify => "verify",
            DeskAction::ProcessPayment => "process_payment",
        }
    }
}

/// Fetches a claim and checks that `action` is offered on it
async fn gated(
    service: &ClaimService,
    claim_id: ClaimId,
    action: DeskAction,
    offered: fn(&Claim) -> bool,
) -> Result<Claim, ConsoleError> {
    let claim = service
        .get_claim(claim_id)
        .await?
        .ok_or_else(|| ClaimError::not_found("Claim", claim_id))?;
    if !offered(&claim) {
        return Err(ConsoleError::ActionNotOffered {
            action: action.name(),
            claim_id,
        });
    }
    Ok(claim)
}

/// Writes a status change that only lands if the claim is still in `from`
///
/// A claim moved by someone else after the gate check reports the action as
/// no longer offered.
async fn transition(
    service: &ClaimService,
    claim_id: ClaimId,
    action: DeskAction,
    from: ClaimStatus,
    to: ClaimStatus,
) -> Result<Claim, ConsoleError> {
    service
        .transition_status(claim_id, from, to)
        .await
        .map_err(|err| match err {
            ClaimError::Store(ref inner) if inner.is_conflict() => ConsoleError::ActionNotOffered {
                action: action.name(),
                claim_id,
            },
            other => other.into(),
        })
}

fn is_pending(claim: &Claim) -> bool {
    claim.has_status(ClaimStatus::PendingReview)
}

fn is_approved(claim: &Claim) -> bool {
    claim.has_status(ClaimStatus::Approved)
}

fn any_claim(_: &Claim) -> bool {
    true
}

/// A lecturer's own claims and the submission form
#[derive(Debug, Clone)]
pub struct LecturerDesk {
    service: ClaimService,
    lecturer_id: LecturerId,
}

impl LecturerDesk {
    pub fn new(service: ClaimService, lecturer_id: LecturerId) -> Self {
        Self { service, lecturer_id }
    }

    pub fn lecturer_id(&self) -> LecturerId {
        self.lecturer_id
    }

    pub async fn profile(&self) -> Result<Option<Lecturer>, ConsoleError> {
        Ok(self.service.get_lecturer(self.lecturer_id).await?)
    }

    pub async fn claims(&self) -> Result<Vec<EnrichedClaim>, ConsoleError> {
        Ok(self.service.list_claims_for_lecturer(self.lecturer_id).await?)
    }

    /// Submits a claim for this lecturer
    pub async fn submit(
        &self,
        month: u32,
        year: i32,
        hours: Vec<HoursEntry>,
        documents: Vec<DocumentUpload>,
    ) -> Result<ClaimId, ConsoleError> {
        let draft = ClaimDraft::new(self.lecturer_id, month, year);
        Ok(self.service.submit_claim(draft, hours, documents).await?)
    }
}

/// Programme coordinator: works the pending queue
#[derive(Debug, Clone)]
pub struct CoordinatorDesk {
    service: ClaimService,
    pending: Vec<EnrichedClaim>,
}

impl CoordinatorDesk {
    pub fn new(service: ClaimService) -> Self {
        Self {
            service,
            pending: Vec::new(),
        }
    }

    /// Reloads the pending queue
    pub async fn refresh(&mut self) -> Result<&[EnrichedClaim], ConsoleError> {
        self.pending = self.service.list_pending_claims().await?;
        Ok(&self.pending)
    }

    pub fn pending(&self) -> &[EnrichedClaim] {
        &self.pending
    }

    /// Reacts to a submission event; returns whether the queue changed
    pub async fn observe(&mut self, event: &ClaimEvent) -> Result<bool, ConsoleError> {
        let ClaimEvent::Submitted { claim, .. } = event;
        if !is_pending(claim) || self.pending.iter().any(|c| c.id() == claim.id) {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    pub fn offered_actions(&self, claim: &Claim) -> Vec<DeskAction> {
        if is_pending(claim) {
            vec![DeskAction::Approve, DeskAction::Reject]
        } else {
            Vec::new()
        }
    }

    pub async fn approve(&mut self, claim_id: ClaimId) -> Result<Claim, ConsoleError> {
        self.decide(claim_id, DeskAction::Approve, ClaimStatus::Approved).await
    }

    pub async fn reject(&mut self, claim_id: ClaimId) -> Result<Claim, ConsoleError> {
        self.decide(claim_id, DeskAction::Reject, ClaimStatus::Rejected).await
    }

    async fn decide(&mut self, claim_id: ClaimId, action: DeskAction, status: ClaimStatus) -> Result<Claim, ConsoleError> {
        gated(&self.service, claim_id, action, is_pending).await?;
        let claim = transition(&self.service, claim_id, action, ClaimStatus::PendingReview, status).await?;
        info!(claim_id = %claim_id, action = action.name(), "coordinator decision recorded");
        self.pending.retain(|c| c.id() != claim_id);
        Ok(claim)
    }
}

/// Academic manager: filters every claim, decides pending ones, verifies any
#[derive(Debug, Clone)]
pub struct ManagerDesk {
    service: ClaimService,
    filter: ClaimFilter,
}

impl ManagerDesk {
    pub fn new(service: ClaimService) -> Self {
        Self {
            service,
            filter: ClaimFilter::default(),
        }
    }

    pub fn filter(&self) -> &ClaimFilter {
        &self.filter
    }

    /// Sets the status filter; `None` or id 0 shows every status
    pub fn set_status_filter(&mut self, status_id: Option<StatusId>) {
        self.filter.status_id = status_id;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = Some(search.into());
    }

    pub async fn claims(&self) -> Result<Vec<EnrichedClaim>, ConsoleError> {
        Ok(self.service.list_claims(&self.filter).await?)
    }

    pub fn offered_actions(&self, claim: &Claim) -> Vec<DeskAction> {
        let mut actions = Vec::new();
        if is_pending(claim) {
            actions.extend([DeskAction::Approve, DeskAction::Reject]);
        }
        actions.push(DeskAction::Verify);
        actions
    }

    pub async fn approve(&self, claim_id: ClaimId) -> Result<Claim, ConsoleError> {
        gated(&self.service, claim_id, DeskAction::Approve, is_pending).await?;
        transition(&self.service, claim_id, DeskAction::Approve, ClaimStatus::PendingReview, ClaimStatus::Approved).await
    }

    pub async fn reject(&self, claim_id: ClaimId) -> Result<Claim, ConsoleError> {
        gated(&self.service, claim_id, DeskAction::Reject, is_pending).await?;
        transition(&self.service, claim_id, DeskAction::Reject, ClaimStatus::PendingReview, ClaimStatus::Rejected).await
    }

    /// Records verification; offered on any claim
    pub async fn verify(&self, claim_id: ClaimId, is_verified: bool, notes: Option<String>) -> Result<Claim, ConsoleError> {
        gated(&self.service, claim_id, DeskAction::Verify, any_claim).await?;
        Ok(self.service.update_verification(claim_id, is_verified, notes).await?)
    }
}

/// HR: pays approved claims
#[derive(Debug, Clone)]
pub struct HrDesk {
    service: ClaimService,
    filter: ClaimFilter,
}

impl HrDesk {
    /// Starts with the status filter on Approved
    pub fn new(service: ClaimService) -> Self {
        Self {
            service,
            filter: ClaimFilter::new().with_status(ClaimStatus::Approved.id()),
        }
    }

    pub fn filter(&self) -> &ClaimFilter {
        &self.filter
    }

    pub fn set_status_filter(&mut self, status_id: Option<StatusId>) {
        self.filter.status_id = status_id;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = Some(search.into());
    }

    pub async fn claims(&self) -> Result<Vec<EnrichedClaim>, ConsoleError> {
        Ok(self.service.list_claims(&self.filter).await?)
    }

    pub fn offered_actions(&self, claim: &Claim) -> Vec<DeskAction> {
        if is_approved(claim) {
            vec![DeskAction::ProcessPayment]
        } else {
            Vec::new()
        }
    }

    /// Moves an approved claim to Completed/Paid
    pub async fn process_payment(&self, claim_id: ClaimId) -> Result<Claim, ConsoleError> {
        gated(&self.service, claim_id, DeskAction::ProcessPayment, is_approved).await?;
        let claim = transition(
            &self.service,
            claim_id,
            DeskAction::ProcessPayment,
            ClaimStatus::Approved,
            ClaimStatus::Paid,
        )
        .await?;
        info!(claim_id = %claim_id, total = %claim.total_amount, "claim paid");
        Ok(claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::ClaimPeriod;
    use rust_decimal_macros::dec;

    fn claim(status: ClaimStatus) -> Claim {
        Claim {
            id: ClaimId::new(1),
            lecturer_id: LecturerId::new(1),
            period: ClaimPeriod::new(10, 2025).unwrap(),
            submitted_at: Utc::now(),
            total_amount: dec!(100),
            status_id: status.id(),
            is_verified: false,
            verification_notes: None,
        }
    }

    #[test]
    fn test_manager_offers_verify_on_any_claim() {
        let desk = ManagerDesk::new(ClaimService::in_memory(4));
        assert_eq!(
            desk.offered_actions(&claim(ClaimStatus::PendingReview)),
            vec![DeskAction::Approve, DeskAction::Reject, DeskAction::Verify]
        );
        assert_eq!(desk.offered_actions(&claim(ClaimStatus::Paid)), vec![DeskAction::Verify]);
    }

    #[test]
    fn test_hr_offers_payment_only_when_approved() {
        let desk = HrDesk::new(ClaimService::in_memory(4));
        assert_eq!(desk.offered_actions(&claim(ClaimStatus::Approved)), vec![DeskAction::ProcessPayment]);
        assert!(desk.offered_actions(&claim(ClaimStatus::PendingReview)).is_empty());
        assert_eq!(desk.filter().active_status(), Some(ClaimStatus::Approved.id()));
    }

    #[test]
    fn test_coordinator_offers_decisions_only_when_pending() {
        let desk = CoordinatorDesk::new(ClaimService::in_memory(4));
        assert_eq!(desk.offered_actions(&claim(ClaimStatus::PendingReview)).len(), 2);
        assert!(desk.offered_actions(&claim(ClaimStatus::Rejected)).is_empty());
    }

    #[tokio::test]
    async fn test_transition_reports_moved_claim_as_not_offered() {
        let service = ClaimService::in_memory(4);
        service
            .add_lecturer(Lecturer::new(LecturerId::new(1), "Steven", "Pro", dec!(500.00), "steven.pro@uni.ac.za"))
            .await
            .unwrap();
        let hours = vec![HoursEntry::new(
            chrono::NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            dec!(8),
            "Lecture",
        )];
        let claim_id = service
            .submit_claim(ClaimDraft::new(LecturerId::new(1), 10, 2025), hours, vec![])
            .await
            .unwrap();

        // Another desk rejects the claim after HR's gate check passed
        service.update_status(claim_id, ClaimStatus::Rejected).await.unwrap();
        let err = transition(
            &service,
            claim_id,
            DeskAction::ProcessPayment,
            ClaimStatus::Approved,
            ClaimStatus::Paid,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConsoleError::ActionNotOffered { action: "process_payment", .. }));
        let claim = service.get_claim(claim_id).await.unwrap().unwrap();
        assert!(claim.has_status(ClaimStatus::Rejected));
        assert_eq!(claim.total_amount, dec!(4000.00));
    }
}
