//! In-memory entity store
//!
//! One `RwLock` guards the whole state, so id assignment and insertion of a
//! claim with its children happen under a single write guard, and snapshot
//! reads see a claim, its hours, and its lecturer from the same moment.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{
    ClaimId, DocumentId, DomainPort, HoursWorkedId, IdSequence, LecturerId, PortError,
};

use crate::claim::{Claim, ClaimPatch};
use crate::document::SupportingDocument;
use crate::hours::HoursWorked;
use crate::lecturer::Lecturer;
use crate::ports::{ClaimScope, ClaimSnapshot, ClaimStore, NewSubmission, StoredSubmission};
use crate::status::ClaimStatus;

#[derive(Debug, Default)]
struct StoreState {
    lecturers: BTreeMap<LecturerId, Lecturer>,
    claims: Vec<Claim>,
    hours: Vec<HoursWorked>,
    documents: Vec<SupportingDocument>,
    claim_ids: IdSequence<ClaimId>,
    hours_ids: IdSequence<HoursWorkedId>,
    document_ids: IdSequence<DocumentId>,
}

impl StoreState {
    fn claim_index(&self, id: ClaimId) -> Option<usize> {
        self.claims.iter().position(|c| c.id == id)
    }

    fn hours_of(&self, claim_id: ClaimId) -> Vec<HoursWorked> {
        self.hours
            .iter()
            .filter(|h| h.claim_id == claim_id)
            .cloned()
            .collect()
    }

    fn snapshot_of(&self, claim: &Claim) -> ClaimSnapshot {
        ClaimSnapshot {
            claim: claim.clone(),
            lecturer: self.lecturers.get(&claim.lecturer_id).cloned(),
            hours: self.hours_of(claim.id),
        }
    }

    fn documents_of(&self, claim_id: ClaimId) -> Vec<SupportingDocument> {
        self.documents
            .iter()
            .filter(|d| d.claim_id == claim_id)
            .cloned()
            .collect()
    }
}

fn exhausted(entity: &str) -> PortError {
    PortError::internal(format!("{entity} id space exhausted"))
}

/// Thread-safe in-memory implementation of [`ClaimStore`]
#[derive(Debug, Default)]
pub struct InMemoryClaimStore {
    state: RwLock<StoreState>,
}

impl InMemoryClaimStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with lecturers
    pub async fn with_lecturers(lecturers: Vec<Lecturer>) -> Result<Self, PortError> {
        let store = Self::new();
        for lecturer in lecturers {
            store.insert_lecturer(lecturer).await?;
        }
        Ok(store)
    }

    /// Number of claims held
    pub async fn claim_count(&self) -> usize {
        self.state.read().await.claims.len()
    }
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn insert_lecturer(&self, lecturer: Lecturer) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if state.lecturers.contains_key(&lecturer.id) {
            return Err(PortError::conflict(format!("Lecturer {} already exists", lecturer.id)));
        }
        debug!(lecturer_id = %lecturer.id, "lecturer inserted");
        state.lecturers.insert(lecturer.id, lecturer);
        Ok(())
    }

    async fn get_lecturer(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError> {
        Ok(self.state.read().await.lecturers.get(&id).cloned())
    }

    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError> {
        Ok(self.state.read().await.lecturers.values().cloned().collect())
    }

    async fn insert_submission(&self, submission: NewSubmission) -> Result<StoredSubmission, PortError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let header = submission.claim;
        if !state.lecturers.contains_key(&header.lecturer_id) {
            return Err(PortError::not_found("Lecturer", header.lecturer_id));
        }

        // Allocate on copies; the sequences only advance once everything fits
        let mut claim_ids = state.claim_ids;
        let mut hours_ids = state.hours_ids;
        let mut document_ids = state.document_ids;

        let claim_id = claim_ids.allocate().ok_or_else(|| exhausted("Claim"))?;
        let hours = submission
            .hours
            .into_iter()
            .map(|entry| {
                hours_ids
                    .allocate()
                    .map(|id| HoursWorked::attach(id, claim_id, entry))
                    .ok_or_else(|| exhausted("HoursWorked"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let documents = submission
            .documents
            .into_iter()
            .map(|upload| {
                document_ids
                    .allocate()
                    .map(|id| SupportingDocument::attach(id, claim_id, upload))
                    .ok_or_else(|| exhausted("SupportingDocument"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let claim = Claim {
            id: claim_id,
            lecturer_id: header.lecturer_id,
            period: header.period,
            submitted_at: header.submitted_at,
            total_amount: header.total_amount,
            status_id: header.status_id,
            is_verified: false,
            verification_notes: None,
        };

        state.claim_ids = claim_ids;
        state.hours_ids = hours_ids;
        state.document_ids = document_ids;
        state.claims.push(claim.clone());
        state.hours.extend(hours.iter().cloned());
        state.documents.extend(documents.iter().cloned());

        debug!(
            claim_id = %claim.id,
            hours = hours.len(),
            documents = documents.len(),
            "submission persisted"
        );

        Ok(StoredSubmission { claim, hours, documents })
    }

    async fn import_claim(&self, record: StoredSubmission) -> Result<(), PortError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let claim_id = record.claim.id;

        if state.claim_index(claim_id).is_some() {
            return Err(PortError::conflict(format!("Claim {claim_id} already exists")));
        }
        if ClaimStatus::from_id(record.claim.status_id).is_none() {
            return Err(PortError::validation_field(
                format!("unknown claim status {}", record.claim.status_id),
                "status_id",
            ));
        }
        if !state.lecturers.contains_key(&record.claim.lecturer_id) {
            return Err(PortError::not_found("Lecturer", record.claim.lecturer_id));
        }
        if record.hours.iter().any(|h| h.claim_id != claim_id)
            || record.documents.iter().any(|d| d.claim_id != claim_id)
        {
            return Err(PortError::validation_field(
                format!("children must belong to claim {claim_id}"),
                "claim_id",
            ));
        }

        if let Some(err) = record.hours.iter().find_map(|line| line.validate().err()) {
            return Err(PortError::validation_field(err.to_string(), "hours"));
        }

        let mut hours_seen: HashSet<HoursWorkedId> = state.hours.iter().map(|h| h.id).collect();
        if let Some(dup) = record.hours.iter().find(|h| !hours_seen.insert(h.id)) {
            return Err(PortError::conflict(format!("HoursWorked {} already exists", dup.id)));
        }
        let mut documents_seen: HashSet<DocumentId> = state.documents.iter().map(|d| d.id).collect();
        if let Some(dup) = record.documents.iter().find(|d| !documents_seen.insert(d.id)) {
            return Err(PortError::conflict(format!("SupportingDocument {} already exists", dup.id)));
        }

        state.claim_ids.observe(claim_id);
        for line in &record.hours {
            state.hours_ids.observe(line.id);
        }
        for document in &record.documents {
            state.document_ids.observe(document.id);
        }
        state.claims.push(record.claim);
        state.hours.extend(record.hours);
        state.documents.extend(record.documents);

        debug!(claim_id = %claim_id, "claim imported");
        Ok(())
    }

    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        let state = self.state.read().await;
        Ok(state.claim_index(id).and_then(|i| state.claims.get(i)).cloned())
    }

    async fn list_claims(&self) -> Result<Vec<Claim>, PortError> {
        Ok(self.state.read().await.claims.clone())
    }

    async fn claim_snapshots(&self, scope: ClaimScope) -> Result<Vec<ClaimSnapshot>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .claims
            .iter()
            .filter(|claim| scope.includes(claim))
            .map(|claim| state.snapshot_of(claim))
            .collect())
    }

    async fn claim_snapshot(&self, id: ClaimId) -> Result<Option<ClaimSnapshot>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .claim_index(id)
            .and_then(|i| state.claims.get(i))
            .map(|claim| state.snapshot_of(claim)))
    }

    async fn hours_for_claim(&self, claim_id: ClaimId) -> Result<Vec<HoursWorked>, PortError> {
        Ok(self.state.read().await.hours_of(claim_id))
    }

    async fn documents_for_claim(&self, claim_id: ClaimId) -> Result<Vec<SupportingDocument>, PortError> {
        Ok(self.state.read().await.documents_of(claim_id))
    }

    async fn update_claim(&self, id: ClaimId, patch: ClaimPatch) -> Result<ClaimSnapshot, PortError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let claim = state
            .claims
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PortError::not_found("Claim", id))?;
        if !patch.permits(claim) {
            return Err(PortError::conflict(format!(
                "Claim {id} is in status {}, expected {}",
                claim.status_id,
                patch.expected_status.map(|s| s.to_string()).unwrap_or_default()
            )));
        }
        claim.apply(&patch);
        let updated = claim.clone();
        Ok(state.snapshot_of(&updated))
    }
}
