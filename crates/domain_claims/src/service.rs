//! Claim lifecycle service
//!
//! The service owns the business rules: submission validation, total
//! computation, enrichment, and status and verification updates. Storage is
//! reached only through [`ClaimStore`], and submissions are announced on a
//! [`ClaimNotifier`].
//!
//! Status updates are not guarded by a transition table. Any catalog status
//! may be set from any other; callers decide which actions to offer.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{ClaimId, LecturerId, StatusId};

use crate::claim::{claim_total, Claim, ClaimDraft, ClaimPatch, EnrichedClaim};
use crate::document::{DocumentUpload, SupportingDocument};
use crate::error::ClaimError;
use crate::events::{ClaimEvent, ClaimNotifier, Subscription};
use crate::hours::{total_hours, HoursEntry, HoursWorked};
use crate::lecturer::Lecturer;
use crate::ports::{ClaimScope, ClaimSnapshot, ClaimStore, NewClaim, NewSubmission};
use crate::query::ClaimFilter;
use crate::seed;
use crate::status::{ClaimStatus, StatusEntry, StatusRef};
use crate::store::InMemoryClaimStore;

/// Entry point for every claim operation
#[derive(Clone)]
pub struct ClaimService {
    store: Arc<dyn ClaimStore>,
    notifier: ClaimNotifier,
}

impl std::fmt::Debug for ClaimService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimService")
            .field("subscribers", &self.notifier.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl ClaimService {
    /// Creates a service over the given store and notifier
    pub fn new(store: Arc<dyn ClaimStore>, notifier: ClaimNotifier) -> Self {
        Self { store, notifier }
    }

    /// Creates a service over an empty in-memory store
    pub fn in_memory(notification_capacity: usize) -> Self {
        Self::new(
            Arc::new(InMemoryClaimStore::new()),
            ClaimNotifier::new(notification_capacity),
        )
    }

    pub fn store(&self) -> &Arc<dyn ClaimStore> {
        &self.store
    }

    pub fn notifier(&self) -> &ClaimNotifier {
        &self.notifier
    }

    /// Submits a new claim with its hours and documents
    ///
    /// The claim is created in Pending Review with
    /// `total = sum(hours) * lecturer.hourly_rate`. The claim and its
    /// children are persisted together, then a
    /// [`ClaimEvent::Submitted`] is published.
    ///
    /// # Errors
    ///
    /// * `ValidationFailed` - bad period, bad hours entry, or no hours at all
    /// * `InvalidArgument` - a document fails size or type checks
    /// * `NotFound` - the lecturer does not exist
    ///
    /// Nothing is written when any check fails.
    #[instrument(skip_all, fields(lecturer_id = %draft.lecturer_id))]
    pub async fn submit_claim(
        &self,
        draft: ClaimDraft,
        hours: Vec<HoursEntry>,
        documents: Vec<DocumentUpload>,
    ) -> Result<ClaimId, ClaimError> {
        let period = draft.period().map_err(|err| {
            warn!(error = %err, "claim draft rejected");
            err
        })?;

        if hours.is_empty() {
            warn!("submission without hours rejected");
            return Err(ClaimError::validation("At least one hours entry is required"));
        }
        for entry in &hours {
            entry.validate().map_err(|err| {
                warn!(error = %err, "hours entry rejected");
                err
            })?;
        }
        for document in &documents {
            document.validate().map_err(|err| {
                warn!(error = %err, file = %document.file_name, "document rejected");
                err
            })?;
        }

        let lecturer = self
            .store
            .get_lecturer(draft.lecturer_id)
            .await?
            .ok_or_else(|| ClaimError::not_found("Lecturer", draft.lecturer_id))?;

        let total_amount = total_hours(hours.iter().map(|entry| &entry.hours)) * lecturer.hourly_rate;

        let stored = self
            .store
            .insert_submission(NewSubmission {
                claim: NewClaim {
                    lecturer_id: lecturer.id,
                    period,
                    submitted_at: Utc::now(),
                    total_amount,
                    status_id: ClaimStatus::PendingReview.id(),
                },
                hours,
                documents,
            })
            .await?;

        let claim_id = stored.claim.id;
        info!(
            claim_id = %claim_id,
            total = %stored.claim.total_amount,
            period = %stored.claim.period.label(),
            "claim submitted"
        );
        self.notifier.publish(ClaimEvent::submitted(stored.claim));
        Ok(claim_id)
    }

    /// Claims owned by a lecturer, enriched, in insertion order
    pub async fn list_claims_for_lecturer(&self, lecturer_id: LecturerId) -> Result<Vec<EnrichedClaim>, ClaimError> {
        self.enriched(ClaimScope::Lecturer(lecturer_id)).await
    }

    /// Claims currently in Pending Review, enriched
    pub async fn list_pending_claims(&self) -> Result<Vec<EnrichedClaim>, ClaimError> {
        self.enriched(ClaimScope::Status(ClaimStatus::PendingReview.id())).await
    }

    /// Every claim, enriched, with totals recomputed from current hours and rates
    pub async fn list_all_claims(&self) -> Result<Vec<EnrichedClaim>, ClaimError> {
        self.enriched(ClaimScope::All).await
    }

    /// Every claim that passes the filter, in insertion order
    pub async fn list_claims(&self, filter: &ClaimFilter) -> Result<Vec<EnrichedClaim>, ClaimError> {
        Ok(filter.apply(self.list_all_claims().await?))
    }

    /// The claim without display fields, its total re-derived from current hours and rate
    pub async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError> {
        let snapshot = self.store.claim_snapshot(id).await?;
        Ok(snapshot.map(ClaimSnapshot::into_priced_claim))
    }

    pub async fn get_lecturer(&self, id: LecturerId) -> Result<Option<Lecturer>, ClaimError> {
        Ok(self.store.get_lecturer(id).await?)
    }

    pub async fn list_lecturers(&self) -> Result<Vec<Lecturer>, ClaimError> {
        Ok(self.store.list_lecturers().await?)
    }

    pub async fn get_hours_for_claim(&self, claim_id: ClaimId) -> Result<Vec<HoursWorked>, ClaimError> {
        Ok(self.store.hours_for_claim(claim_id).await?)
    }

    pub async fn get_documents_for_claim(&self, claim_id: ClaimId) -> Result<Vec<SupportingDocument>, ClaimError> {
        Ok(self.store.documents_for_claim(claim_id).await?)
    }

    /// Catalog name for a status id
    pub fn get_status_name(&self, id: StatusId) -> Option<String> {
        ClaimStatus::from_id(id).map(|status| status.name().to_string())
    }

    /// The full status catalog, in id order
    pub fn list_statuses(&self) -> Vec<StatusEntry> {
        ClaimStatus::catalog()
    }

    /// Sets a claim's status by catalog id or name
    ///
    /// Any status may follow any other.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the claim does not exist
    /// * `InvalidArgument` - the id or name is not in the catalog
    ///
    /// The claim is unchanged on error.
    #[instrument(skip_all, fields(claim_id = %claim_id))]
    pub async fn update_status(&self, claim_id: ClaimId, status: impl Into<StatusRef>) -> Result<Claim, ClaimError> {
        let status = status.into();
        let current = self
            .store
            .get_claim(claim_id)
            .await?
            .ok_or_else(|| ClaimError::not_found("Claim", claim_id))?;

        let target = resolve_status(&status).ok_or_else(|| {
            warn!(requested = %status, "unknown status requested");
            ClaimError::invalid_argument(format!("Unknown claim status: {status}"))
        })?;

        let updated = self
            .store
            .update_claim(claim_id, ClaimPatch::status(target.id()))
            .await?
            .into_priced_claim();
        info!(
            from = %self.get_status_name(current.status_id).unwrap_or_default(),
            to = %target,
            "claim status updated"
        );
        Ok(updated)
    }

    /// Moves a claim from one status to another, only if it is still in `from`
    ///
    /// The check and the write happen atomically in the store.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the claim does not exist
    /// * `Store` (conflict) - the claim is no longer in `from`
    #[instrument(skip_all, fields(claim_id = %claim_id))]
    pub async fn transition_status(
        &self,
        claim_id: ClaimId,
        from: ClaimStatus,
        to: ClaimStatus,
    ) -> Result<Claim, ClaimError> {
        let patch = ClaimPatch::status(to.id()).when_status(from.id());
        let updated = self
            .store
            .update_claim(claim_id, patch)
            .await
            .map_err(|err| {
                if err.is_conflict() {
                    warn!(%from, %to, "claim moved before transition");
                }
                err
            })?
            .into_priced_claim();
        info!(%from, %to, "claim status updated");
        Ok(updated)
    }

    /// Records the manager verification flag and notes, leaving status alone
    ///
    /// # Errors
    ///
    /// `NotFound` if the claim does not exist.
    #[instrument(skip_all, fields(claim_id = %claim_id))]
    pub async fn update_verification(
        &self,
        claim_id: ClaimId,
        is_verified: bool,
        notes: Option<String>,
    ) -> Result<Claim, ClaimError> {
        let updated = self
            .store
            .update_claim(claim_id, ClaimPatch::verification(is_verified, notes))
            .await?
            .into_priced_claim();
        info!(is_verified, "claim verification updated");
        Ok(updated)
    }

    /// Registers for submission notifications
    pub fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    /// Adds a lecturer after validating the record
    pub async fn add_lecturer(&self, lecturer: Lecturer) -> Result<(), ClaimError> {
        lecturer.validate_record()?;
        let id = lecturer.id;
        self.store.insert_lecturer(lecturer).await?;
        debug!(lecturer_id = %id, "lecturer added");
        Ok(())
    }

    /// Loads the demo lecturers and claims
    pub async fn seed_demo_data(&self) -> Result<(), ClaimError> {
        seed::load(self.store.as_ref(), Utc::now()).await?;
        info!("demo data loaded");
        Ok(())
    }

    async fn enriched(&self, scope: ClaimScope) -> Result<Vec<EnrichedClaim>, ClaimError> {
        let snapshots = self.store.claim_snapshots(scope).await?;
        debug!(?scope, count = snapshots.len(), "claims read");
        Ok(snapshots.into_iter().map(enrich).collect())
    }
}

fn resolve_status(status: &StatusRef) -> Option<ClaimStatus> {
    match status {
        StatusRef::Id(id) => ClaimStatus::from_id(*id),
        StatusRef::Name(name) => ClaimStatus::from_name(name),
    }
}

fn enrich(snapshot: ClaimSnapshot) -> EnrichedClaim {
    let ClaimSnapshot { claim, lecturer, hours } = snapshot;
    if let Some(lecturer) = &lecturer {
        let fresh = claim_total(&hours, lecturer.hourly_rate);
        if fresh != claim.total_amount {
            debug!(claim_id = %claim.id, stored = %claim.total_amount, %fresh, "stale claim total recomputed");
        }
    }
    EnrichedClaim::build(claim, lecturer.as_ref(), &hours)
}
