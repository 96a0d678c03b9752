//! Core Kernel - Foundational types and utilities for the claim system
//!
//! This crate provides the fundamental building blocks used by the domain crates:
//! - Sequential, strongly-typed identifiers
//! - The validated claim period (month and year)
//! - Port infrastructure for swappable store adapters

pub mod identifiers;
pub mod period;
pub mod ports;
pub mod error;

pub use identifiers::{
    ClaimId, DocumentId, HoursWorkedId, IdSequence, LecturerId, SequentialId, StatusId,
};
pub use period::{ClaimPeriod, PeriodError};
pub use ports::{DomainPort, PortError};
pub use error::CoreError;
