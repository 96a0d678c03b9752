//! Service Test Harness
//!
//! Builds a [`ClaimService`] over a fresh in-memory store, with or without
//! lecturers. Every harness is isolated; nothing is shared between tests.

use std::sync::Arc;

use core_kernel::ClaimId;
use domain_claims::{ClaimNotifier, ClaimService, InMemoryClaimStore, Lecturer};

use crate::builders::SubmissionBuilder;
use crate::fixtures::LecturerFixtures;

/// Notification buffer used by harness services
pub const TEST_CHANNEL_CAPACITY: usize = 32;

/// A service plus direct access to its store
pub struct TestHarness {
    pub service: ClaimService,
    pub store: Arc<InMemoryClaimStore>,
}

impl TestHarness {
    /// A service with no lecturers and no claims
    pub fn empty() -> Self {
        let store = Arc::new(InMemoryClaimStore::new());
        let service = ClaimService::new(store.clone(), ClaimNotifier::new(TEST_CHANNEL_CAPACITY));
        Self { service, store }
    }

    /// A service with the two fixture lecturers
    pub async fn with_lecturers() -> Self {
        Self::with(LecturerFixtures::lecturers()).await
    }

    /// A service with the given lecturers
    pub async fn with(lecturers: Vec<Lecturer>) -> Self {
        let harness = Self::empty();
        for lecturer in lecturers {
            harness
                .service
                .add_lecturer(lecturer)
                .await
                .expect("fixture lecturer should be valid");
        }
        harness
    }

    /// A service loaded with the demo data
    pub async fn seeded() -> Self {
        let harness = Self::empty();
        harness
            .service
            .seed_demo_data()
            .await
            .expect("demo data should load");
        harness
    }

    /// Submits a built submission, panicking on failure
    pub async fn submit(&self, builder: SubmissionBuilder) -> ClaimId {
        let (draft, hours, documents) = builder.build();
        self.service
            .submit_claim(draft, hours, documents)
            .await
            .expect("submission should succeed")
    }
}
