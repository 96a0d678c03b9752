//! Request and response types exchanged with the UI layer
//!
//! Both enums are plain serde data so a UI shell can hold, log, or ship them
//! without depending on service types.

use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, LecturerId, StatusId};
use domain_claims::{
    Claim, ClaimDraft, ClaimFilter, DocumentUpload, EnrichedClaim, HoursEntry, HoursWorked,
    Lecturer, StatusEntry, StatusRef, SupportingDocument,
};

use crate::error::ErrorBody;

/// One call into the claims core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ClaimsRequest {
    SubmitClaim {
        draft: ClaimDraft,
        hours: Vec<HoursEntry>,
        #[serde(default)]
        documents: Vec<DocumentUpload>,
    },
    ListClaimsForLecturer {
        lecturer_id: LecturerId,
    },
    ListPendingClaims,
    ListAllClaims,
    ListClaims {
        #[serde(default)]
        filter: ClaimFilter,
    },
    GetLecturer {
        lecturer_id: LecturerId,
    },
    GetHoursForClaim {
        claim_id: ClaimId,
    },
    GetDocumentsForClaim {
        claim_id: ClaimId,
    },
    GetStatusName {
        status_id: StatusId,
    },
    ListStatuses,
    UpdateStatus {
        claim_id: ClaimId,
        status: StatusRef,
    },
    UpdateVerification {
        claim_id: ClaimId,
        is_verified: bool,
        #[serde(default)]
        notes: Option<String>,
    },
}

impl ClaimsRequest {
    /// Operation name, as used in the `op` tag
    pub fn op(&self) -> &'static str {
        match self {
            ClaimsRequest::SubmitClaim { .. } => "submit_claim",
            ClaimsRequest::ListClaimsForLecturer { .. } => "list_claims_for_lecturer",
            ClaimsRequest::ListPendingClaims => "list_pending_claims",
            ClaimsRequest::ListAllClaims => "list_all_claims",
            ClaimsRequest::ListClaims { .. } => "list_claims",
            ClaimsRequest::GetLecturer { .. } => "get_lecturer",
            ClaimsRequest::GetHoursForClaim { .. } => "get_hours_for_claim",
            ClaimsRequest::GetDocumentsForClaim { .. } => "get_documents_for_claim",
            ClaimsRequest::GetStatusName { .. } => "get_status_name",
            ClaimsRequest::ListStatuses => "list_statuses",
            ClaimsRequest::UpdateStatus { .. } => "update_status",
            ClaimsRequest::UpdateVerification { .. } => "update_verification",
        }
    }

    /// Whether the request changes stored state
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            ClaimsRequest::SubmitClaim { .. }
                | ClaimsRequest::UpdateStatus { .. }
                | ClaimsRequest::UpdateVerification { .. }
        )
    }
}

/// Result of a [`ClaimsRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClaimsResponse {
    Submitted { claim_id: ClaimId },
    Claims(Vec<EnrichedClaim>),
    Claim(Claim),
    Lecturer(Option<Lecturer>),
    Hours(Vec<HoursWorked>),
    Documents(Vec<SupportingDocument>),
    StatusName(Option<String>),
    Statuses(Vec<StatusEntry>),
    Error(ErrorBody),
}

impl ClaimsResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ClaimsResponse::Error(_))
    }

    /// The error body, if this is an error response
    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            ClaimsResponse::Error(body) => Some(body),
            _ => None,
        }
    }
}
