//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! lecturer claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for lecturers, hours, and documents
//! - `builders`: Builder patterns for submissions and lecturers
//! - `harness`: A ready-to-use service over an in-memory store
//! - `assertions`: Custom assertion helpers for claim views
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod harness;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use harness::*;
pub use assertions::*;
pub use generators::*;
