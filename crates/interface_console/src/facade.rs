//! Request dispatcher over the claim service

use tracing::{debug, warn};

use domain_claims::{ClaimService, Subscription};

use crate::dto::{ClaimsRequest, ClaimsResponse};
use crate::error::{ConsoleError, ErrorBody};

/// Async request/response entry point for UI shells
#[derive(Debug, Clone)]
pub struct ClaimsFacade {
    service: ClaimService,
}

impl ClaimsFacade {
    pub fn new(service: ClaimService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ClaimService {
        &self.service
    }

    /// Registers for submission notifications
    pub fn subscribe(&self) -> Subscription {
        self.service.subscribe()
    }

    /// Handles a request, folding failures into [`ClaimsResponse::Error`]
    pub async fn handle(&self, request: ClaimsRequest) -> ClaimsResponse {
        let op = request.op();
        match self.try_handle(request).await {
            Ok(response) => {
                debug!(op, "request handled");
                response
            }
            Err(err) => {
                warn!(op, error = %err, "request failed");
                ClaimsResponse::Error(ErrorBody::from(&err))
            }
        }
    }

    /// Handles a JSON-encoded request and returns a JSON-encoded response
    pub async fn handle_json(&self, request: &str) -> Result<String, ConsoleError> {
        let request: ClaimsRequest = serde_json::from_str(request)?;
        let response = self.handle(request).await;
        Ok(serde_json::to_string(&response)?)
    }

    /// Handles a request, returning failures as errors
    pub async fn try_handle(&self, request: ClaimsRequest) -> Result<ClaimsResponse, ConsoleError> {
        let service = &self.service;
        let response = match request {
            ClaimsRequest::SubmitClaim { draft, hours, documents } => {
                let claim_id = service.submit_claim(draft, hours, documents).await?;
                ClaimsResponse::Submitted { claim_id }
            }
            ClaimsRequest::ListClaimsForLecturer { lecturer_id } => {
                ClaimsResponse::Claims(service.list_claims_for_lecturer(lecturer_id).await?)
            }
            ClaimsRequest::ListPendingClaims => ClaimsResponse::Claims(service.list_pending_claims().await?),
            ClaimsRequest::ListAllClaims => ClaimsResponse::Claims(service.list_all_claims().await?),
            ClaimsRequest::ListClaims { filter } => ClaimsResponse::Claims(service.list_claims(&filter).await?),
            ClaimsRequest::GetLecturer { lecturer_id } => {
                ClaimsResponse::Lecturer(service.get_lecturer(lecturer_id).await?)
            }
            ClaimsRequest::GetHoursForClaim { claim_id } => {
                ClaimsResponse::Hours(service.get_hours_for_claim(claim_id).await?)
            }
            ClaimsRequest::GetDocumentsForClaim { claim_id } => {
                ClaimsResponse::Documents(service.get_documents_for_claim(claim_id).await?)
            }
            ClaimsRequest::GetStatusName { status_id } => {
                ClaimsResponse::StatusName(service.get_status_name(status_id))
            }
            ClaimsRequest::ListStatuses => ClaimsResponse::Statuses(service.list_statuses()),
            ClaimsRequest::UpdateStatus { claim_id, status } => {
                ClaimsResponse::Claim(service.update_status(claim_id, status).await?)
            }
            ClaimsRequest::UpdateVerification { claim_id, is_verified, notes } => {
                ClaimsResponse::Claim(service.update_verification(claim_id, is_verified, notes).await?)
            }
        };
        Ok(response)
    }
}
