//! Claim status catalog
//!
//! The catalog is fixed for the life of the process: five statuses with
//! stable ids. Claims store the status id; names are only used for lookup,
//! filtering, and display.

use serde::{Deserialize, Serialize};

use core_kernel::StatusId;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Entered directly by an external system
    Submitted,
    /// Turned down by a coordinator or manager
    Rejected,
    /// Awaiting coordinator or manager action
    PendingReview,
    /// Approved, awaiting payment by HR
    Approved,
    /// Paid and closed
    Paid,
}

/// A catalog row as exposed to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub id: StatusId,
    pub name: String,
}

impl ClaimStatus {
    /// Every status, in id order
    pub const ALL: [ClaimStatus; 5] = [
        ClaimStatus::Submitted,
        ClaimStatus::Rejected,
        ClaimStatus::PendingReview,
        ClaimStatus::Approved,
        ClaimStatus::Paid,
    ];

    /// Stable catalog id
    pub const fn id(self) -> StatusId {
        let raw = match self {
            ClaimStatus::Submitted => 1,
            ClaimStatus::Rejected => 2,
            ClaimStatus::PendingReview => 3,
            ClaimStatus::Approved => 4,
            ClaimStatus::Paid => 5,
        };
        StatusId::new(raw)
    }

    /// Catalog name
    pub const fn name(self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::PendingReview => "Pending Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Paid => "Completed/Paid",
        }
    }

    /// Looks up a status by id
    pub fn from_id(id: StatusId) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.id() == id)
    }

    /// Looks up a status by name, ignoring ASCII case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(name))
    }

    /// The full catalog as plain rows
    pub fn catalog() -> Vec<StatusEntry> {
        Self::ALL
            .into_iter()
            .map(|status| StatusEntry {
                id: status.id(),
                name: status.name().to_string(),
            })
            .collect()
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Target of a status update: a catalog id or a catalog name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusRef {
    Id(StatusId),
    Name(String),
}

impl From<StatusId> for StatusRef {
    fn from(id: StatusId) -> Self {
        StatusRef::Id(id)
    }
}

impl From<ClaimStatus> for StatusRef {
    fn from(status: ClaimStatus) -> Self {
        StatusRef::Id(status.id())
    }
}

impl From<&str> for StatusRef {
    fn from(name: &str) -> Self {
        StatusRef::Name(name.to_string())
    }
}

impl From<String> for StatusRef {
    fn from(name: String) -> Self {
        StatusRef::Name(name)
    }
}

impl std::fmt::Display for StatusRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusRef::Id(id) => write!(f, "status id {id}"),
            StatusRef::Name(name) => write!(f, "status '{name}'"),
        }
    }
}
