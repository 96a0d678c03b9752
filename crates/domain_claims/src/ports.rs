//! Claims Domain Ports
//!
//! This module defines the storage port for the claims domain. The
//! lifecycle service only talks to [`ClaimStore`]; the in-memory adapter in
//! [`crate::store`] is the implementation used by the application and tests.
//!
//! # Consistency
//!
//! Adapters must make [`ClaimStore::insert_submission`] atomic: the claim id,
//! the hours and document ids, and all three inserts happen together or not
//! at all. [`ClaimStore::claim_snapshots`] must return each claim with its
//! hours and lecturer read from one consistent view.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use core_kernel::{ClaimId, ClaimPeriod, DomainPort, LecturerId, PortError, StatusId};

use crate::claim::{Claim, ClaimPatch};
use crate::document::{DocumentUpload, SupportingDocument};
use crate::hours::{HoursEntry, HoursWorked};
use crate::lecturer::Lecturer;

/// Which claims a snapshot read covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimScope {
    /// Every claim
    All,
    /// Claims owned by one lecturer
    Lecturer(LecturerId),
    /// Claims currently in one status
    Status(StatusId),
}

impl ClaimScope {
    /// Returns whether the claim falls inside this scope
    pub fn includes(&self, claim: &Claim) -> bool {
        match self {
            ClaimScope::All => true,
            ClaimScope::Lecturer(id) => claim.lecturer_id == *id,
            ClaimScope::Status(id) => claim.status_id == *id,
        }
    }
}

/// A claim read together with the records its total depends on
#[derive(Debug, Clone)]
pub struct ClaimSnapshot {
    pub claim: Claim,
    pub lecturer: Option<Lecturer>,
    pub hours: Vec<HoursWorked>,
}

impl ClaimSnapshot {
    /// The claim with its total re-derived from this snapshot
    pub fn into_priced_claim(self) -> Claim {
        let mut claim = self.claim;
        claim.reprice(self.lecturer.as_ref(), &self.hours);
        claim
    }
}

/// Claim header fields decided by the service before persistence
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub lecturer_id: LecturerId,
    pub period: ClaimPeriod,
    pub submitted_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status_id: StatusId,
}

/// A validated submission awaiting id assignment
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub claim: NewClaim,
    pub hours: Vec<HoursEntry>,
    pub documents: Vec<DocumentUpload>,
}

/// A claim and its children as persisted
#[derive(Debug, Clone)]
pub struct StoredSubmission {
    pub claim: Claim,
    pub hours: Vec<HoursWorked>,
    pub documents: Vec<SupportingDocument>,
}

/// Storage port for lecturers, claims, and claim children
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Adds a lecturer; fails with Conflict if the id is taken
    async fn insert_lecturer(&self, lecturer: Lecturer) -> Result<(), PortError>;

    /// Looks up a lecturer by id
    async fn get_lecturer(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError>;

    /// Lists lecturers in id order
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError>;

    /// Assigns ids and persists a claim with its hours and documents atomically
    ///
    /// Fails with NotFound if the lecturer does not exist, writing nothing.
    async fn insert_submission(&self, submission: NewSubmission) -> Result<StoredSubmission, PortError>;

    /// Inserts a claim and children under caller-chosen ids (seeding)
    ///
    /// Fails with Conflict if any id is already taken, writing nothing.
    async fn import_claim(&self, record: StoredSubmission) -> Result<(), PortError>;

    /// Looks up a claim by id
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Lists claims in insertion order
    async fn list_claims(&self) -> Result<Vec<Claim>, PortError>;

    /// Reads claims in scope with their lecturer and hours, in insertion order
    async fn claim_snapshots(&self, scope: ClaimScope) -> Result<Vec<ClaimSnapshot>, PortError>;

    /// Hours lines for a claim, in insertion order
    async fn hours_for_claim(&self, claim_id: ClaimId) -> Result<Vec<HoursWorked>, PortError>;

    /// Documents for a claim, in insertion order
    async fn documents_for_claim(&self, claim_id: ClaimId) -> Result<Vec<SupportingDocument>, PortError>;

    /// Reads one claim with its lecturer and hours
    async fn claim_snapshot(&self, id: ClaimId) -> Result<Option<ClaimSnapshot>, PortError>;

    /// Applies a patch and returns the updated claim with its lecturer and hours
    ///
    /// Fails with NotFound if the claim is absent, and with Conflict if the
    /// patch carries an expected status the claim no longer has. Nothing is
    /// written on failure.
    async fn update_claim(&self, id: ClaimId, patch: ClaimPatch) -> Result<ClaimSnapshot, PortError>;
}
