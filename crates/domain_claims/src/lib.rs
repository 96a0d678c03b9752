//! Lecturer Claims Domain
//!
//! This crate implements the monthly claim lifecycle for contract lecturers:
//! submission with hours and supporting documents, review, manager
//! verification, and HR payment.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted
//! Pending Review <-> Approved | Rejected <-> Completed/Paid
//! ```
//!
//! Transitions are not enforced; any status may be set from any other.
//! Totals are derived (`sum(hours) * hourly_rate`) and recomputed on every
//! read that enriches a claim.

pub mod claim;
pub mod document;
pub mod error;
pub mod events;
pub mod hours;
pub mod lecturer;
pub mod ports;
pub mod query;
pub mod seed;
pub mod service;
pub mod status;
pub mod store;

pub use claim::{claim_total, Claim, ClaimDraft, ClaimPatch, EnrichedClaim, VerificationUpdate};
pub use document::{DocumentUpload, SupportingDocument, ALLOWED_EXTENSIONS, MAX_DOCUMENT_BYTES};
pub use error::{ClaimError, ClaimErrorKind};
pub use events::{ClaimEvent, ClaimNotifier, Subscription};
pub use hours::{HoursEntry, HoursWorked, MAX_HOURS, MIN_HOURS};
pub use lecturer::{Lecturer, LecturerRole};
pub use ports::{ClaimScope, ClaimSnapshot, ClaimStore, NewClaim, NewSubmission, StoredSubmission};
pub use query::ClaimFilter;
pub use service::ClaimService;
pub use status::{ClaimStatus, StatusEntry, StatusRef};
pub use store::InMemoryClaimStore;
