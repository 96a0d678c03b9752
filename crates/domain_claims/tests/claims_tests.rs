//! Comprehensive tests for domain_claims

use rust_decimal_macros::dec;

use core_kernel::{ClaimId, LecturerId, StatusId};

use domain_claims::{ClaimError, ClaimFilter, ClaimStatus, ClaimStore, DocumentUpload};
use test_utils::{
    assert_all_status, assert_claim_ids, assert_enriched, assert_strictly_increasing,
    assert_total_consistent, DocumentFixtures, HoursFixtures, LecturerBuilder, LecturerFixtures,
    SubmissionBuilder, TestHarness,
};

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_total_uses_submitting_lecturer_rate() {
        let lecturer = LecturerBuilder::new(5)
            .named("Thabo", "Nkosi")
            .with_email("thabo.nkosi@uni.ac.za")
            .with_rate(dec!(320.00))
            .build();
        let harness = TestHarness::with(vec![lecturer]).await;
        let builder = SubmissionBuilder::new()
            .for_lecturer(5)
            .with_hours([dec!(6), dec!(2.5)])
            .without_documents();
        let expected = builder.hours_total() * dec!(320.00);

        let id = harness.submit(builder).await;

        let claims = harness.service.list_claims_for_lecturer(LecturerId::new(5)).await.unwrap();
        assert_eq!(claims[0].claim.total_amount, expected);
        assert_eq!(claims[0].lecturer_name.as_deref(), Some("Thabo Nkosi"));
        assert_eq!(claims[0].lecturer_email.as_deref(), Some("thabo.nkosi@uni.ac.za"));
        assert!(harness.service.get_documents_for_claim(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ten_and_five_hours_at_500_totals_7500() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness.submit(SubmissionBuilder::new()).await;

        let claim = harness.store.get_claim(id).await.unwrap().unwrap();
        assert_eq!(claim.total_amount, dec!(7500.00));
        assert!(claim.has_status(ClaimStatus::PendingReview));
    }

    #[tokio::test]
    async fn test_children_are_linked_to_the_claim() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness
            .submit(SubmissionBuilder::new().with_document(DocumentUpload::new("log.xlsx", "/uploads/log.xlsx", 10)))
            .await;

        let hours = harness.service.get_hours_for_claim(id).await.unwrap();
        let documents = harness.service.get_documents_for_claim(id).await.unwrap();
        assert_eq!(hours.len(), 2);
        assert_eq!(documents.len(), 2);
        assert!(hours.iter().all(|h| h.claim_id == id));
        assert!(documents.iter().all(|d| d.claim_id == id));
    }

    #[tokio::test]
    async fn test_ids_increase_across_submissions() {
        let harness = TestHarness::with_lecturers().await;
        let mut ids = Vec::new();
        for lecturer in [1, 2, 1, 2] {
            ids.push(harness.submit(SubmissionBuilder::new().for_lecturer(lecturer)).await);
        }
        assert_eq!(ids[0], ClaimId::new(1));
        assert_strictly_increasing(&ids);
    }

    #[tokio::test]
    async fn test_unknown_lecturer_is_not_found() {
        let harness = TestHarness::with_lecturers().await;
        let (draft, hours, docs) = SubmissionBuilder::new().for_lecturer(42).build();

        let err = harness.service.submit_claim(draft, hours, docs).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(harness.store.claim_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_hours_write_nothing() {
        let harness = TestHarness::with_lecturers().await;
        let (draft, hours, docs) = SubmissionBuilder::new().with_hours([dec!(8), dec!(0)]).build();

        let err = harness.service.submit_claim(draft, hours, docs).await.unwrap_err();

        assert!(matches!(err, ClaimError::ValidationFailed(_)));
        assert_eq!(harness.store.claim_count().await, 0);
        assert!(harness.service.get_hours_for_claim(ClaimId::new(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_description_rejected() {
        let harness = TestHarness::with_lecturers().await;
        let mut entry = HoursFixtures::entry(dec!(2));
        entry.description = String::new();
        let (draft, hours, docs) = SubmissionBuilder::new().without_hours().add_entry(entry).build();

        let err = harness.service.submit_claim(draft, hours, docs).await.unwrap_err();
        assert!(matches!(err, ClaimError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_no_hours_rejected() {
        let harness = TestHarness::with_lecturers().await;
        let (draft, hours, docs) = SubmissionBuilder::new().without_hours().build();

        let err = harness.service.submit_claim(draft, hours, docs).await.unwrap_err();
        assert!(matches!(err, ClaimError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_bad_documents_rejected_before_anything_is_written() {
        let harness = TestHarness::with_lecturers().await;

        for document in [DocumentFixtures::oversized_pdf(), DocumentFixtures::executable()] {
            let (draft, hours, docs) = SubmissionBuilder::new().with_document(document).build();
            let err = harness.service.submit_claim(draft, hours, docs).await.unwrap_err();
            assert!(matches!(err, ClaimError::InvalidArgument(_)));
        }
        assert_eq!(harness.store.claim_count().await, 0);
    }

    #[tokio::test]
    async fn test_bad_period_rejected() {
        let harness = TestHarness::with_lecturers().await;
        let (draft, hours, docs) = SubmissionBuilder::new().for_period(0, 2025).build();

        let err = harness.service.submit_claim(draft, hours, docs).await.unwrap_err();
        assert!(matches!(err, ClaimError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_concurrent_submissions_get_distinct_ids() {
        let harness = TestHarness::with_lecturers().await;

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = harness.service.clone();
                tokio::spawn(async move {
                    let (draft, hours, docs) = SubmissionBuilder::new().for_lecturer(1 + i % 2).build();
                    service.submit_claim(draft, hours, docs).await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
        assert_eq!(ids.first(), Some(&ClaimId::new(1)));
        assert_eq!(ids.last(), Some(&ClaimId::new(16)));
    }
}

// ============================================================================
// Status and Verification Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn test_approve_round_trip() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness.submit(SubmissionBuilder::new()).await;

        harness.service.update_status(id, "Approved").await.unwrap();

        let all = harness.service.list_all_claims().await.unwrap();
        let claim = all.iter().find(|c| c.id() == id).unwrap();
        assert_eq!(claim.status_id(), StatusId::new(4));
        assert_eq!(claim.status_name.as_deref(), Some("Approved"));
        assert_eq!(claim.claim.total_amount, dec!(7500.00));
    }

    #[tokio::test]
    async fn test_unknown_claim_is_not_found_and_nothing_changes() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness.submit(SubmissionBuilder::new()).await;
        let before = harness.store.list_claims().await.unwrap();

        let err = harness.service.update_status(ClaimId::new(999), "Approved").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(harness.store.list_claims().await.unwrap(), before);
        assert!(harness.store.get_claim(id).await.unwrap().unwrap().has_status(ClaimStatus::PendingReview));
    }

    #[tokio::test]
    async fn test_unknown_status_name_leaves_status_unchanged() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness.submit(SubmissionBuilder::new()).await;

        let err = harness.service.update_status(id, "NonExistentStatus").await.unwrap_err();

        assert!(matches!(err, ClaimError::InvalidArgument(_)));
        let claim = harness.store.get_claim(id).await.unwrap().unwrap();
        assert_eq!(claim.status_id, ClaimStatus::PendingReview.id());
    }

    #[tokio::test]
    async fn test_transition_requires_current_status() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness.submit(SubmissionBuilder::new()).await;

        let err = harness
            .service
            .transition_status(id, ClaimStatus::Approved, ClaimStatus::Paid)
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimError::Store(ref inner) if inner.is_conflict()));
        assert!(harness.store.get_claim(id).await.unwrap().unwrap().has_status(ClaimStatus::PendingReview));

        let approved = harness
            .service
            .transition_status(id, ClaimStatus::PendingReview, ClaimStatus::Approved)
            .await
            .unwrap();
        assert!(approved.has_status(ClaimStatus::Approved));
    }

    #[tokio::test]
    async fn test_transition_on_missing_claim_is_not_found() {
        let harness = TestHarness::with_lecturers().await;
        let err = harness
            .service
            .transition_status(ClaimId::new(3), ClaimStatus::Approved, ClaimStatus::Paid)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_claim_wins_over_unknown_status() {
        let harness = TestHarness::with_lecturers().await;
        let err = harness.service.update_status(ClaimId::new(7), "NonExistentStatus").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_any_status_can_follow_any_status() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness.submit(SubmissionBuilder::new()).await;

        for status in [ClaimStatus::Paid, ClaimStatus::Submitted, ClaimStatus::Rejected, ClaimStatus::Approved] {
            let claim = harness.service.update_status(id, status).await.unwrap();
            assert!(claim.has_status(status));
        }
    }

    #[tokio::test]
    async fn test_status_by_id_and_by_name_agree() {
        let harness = TestHarness::with_lecturers().await;
        let first = harness.submit(SubmissionBuilder::new()).await;
        let second = harness.submit(SubmissionBuilder::new()).await;

        let by_id = harness.service.update_status(first, StatusId::new(2)).await.unwrap();
        let by_name = harness.service.update_status(second, "rejected").await.unwrap();
        assert_eq!(by_id.status_id, by_name.status_id);
    }

    #[tokio::test]
    async fn test_verification_is_independent_of_status() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness.submit(SubmissionBuilder::new()).await;

        let claim = harness
            .service
            .update_verification(id, true, Some("Timesheets match".to_string()))
            .await
            .unwrap();

        assert!(claim.is_verified);
        assert_eq!(claim.verification_notes.as_deref(), Some("Timesheets match"));
        assert!(claim.has_status(ClaimStatus::PendingReview));
    }

    #[tokio::test]
    async fn test_verification_on_unknown_claim_is_not_found() {
        let harness = TestHarness::with_lecturers().await;
        let err = harness.service.update_verification(ClaimId::new(3), true, None).await.unwrap_err();
        assert!(err.is_not_found());
    }
}

// ============================================================================
// Query Tests
// ============================================================================

mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_list_excludes_approved() {
        let harness = TestHarness::with_lecturers().await;
        let pending = harness.submit(SubmissionBuilder::new()).await;
        let approved = harness.submit(SubmissionBuilder::new()).await;
        harness.service.update_status(approved, ClaimStatus::Approved).await.unwrap();

        let list = harness.service.list_pending_claims().await.unwrap();

        assert_all_status(&list, ClaimStatus::PendingReview);
        assert_claim_ids(&list, &[pending.value()]);
    }

    #[tokio::test]
    async fn test_lecturer_list_is_enriched_and_in_insertion_order() {
        let harness = TestHarness::with_lecturers().await;
        harness.submit(SubmissionBuilder::new().for_lecturer(1)).await;
        harness.submit(SubmissionBuilder::new().for_lecturer(2)).await;
        harness.submit(SubmissionBuilder::new().for_lecturer(1).for_period(11, 2025)).await;

        let list = harness.service.list_claims_for_lecturer(LecturerId::new(1)).await.unwrap();

        assert_claim_ids(&list, &[1, 3]);
        for claim in &list {
            assert_enriched(claim);
            assert_eq!(claim.lecturer_name.as_deref(), Some("Steven Pro"));
        }
        assert_eq!(list[1].period_label, "November 2025");
    }

    #[tokio::test]
    async fn test_status_and_search_filters() {
        let harness = TestHarness::with_lecturers().await;
        harness.submit(SubmissionBuilder::new()).await;
        let second = harness.submit(SubmissionBuilder::new().for_period(9, 2025)).await;
        let third = harness.submit(SubmissionBuilder::new().for_period(8, 2024)).await;
        harness.service.update_status(second, ClaimStatus::Approved).await.unwrap();
        harness.service.update_status(third, ClaimStatus::Rejected).await.unwrap();

        let pending = harness.service.list_claims(&ClaimFilter::new().with_status(3u32)).await.unwrap();
        assert_claim_ids(&pending, &[1]);

        let year = harness.service.list_claims(&ClaimFilter::new().with_search("2025")).await.unwrap();
        assert_claim_ids(&year, &[1, 2]);
    }

    #[tokio::test]
    async fn test_totals_match_hours_and_rate() {
        let harness = TestHarness::with_lecturers().await;
        let id = harness
            .submit(SubmissionBuilder::new().for_lecturer(2).with_hours([dec!(1.5), dec!(2.25)]))
            .await;

        let list = harness.service.list_all_claims().await.unwrap();
        let hours = harness.service.get_hours_for_claim(id).await.unwrap();
        assert_total_consistent(&list[0], &LecturerFixtures::alice(), &hours);
        assert_eq!(list[0].claim.total_amount, dec!(1687.50));
    }
}

// ============================================================================
// Seed Data Tests
// ============================================================================

mod seed_tests {
    use super::*;

    #[tokio::test]
    async fn test_stale_seed_total_is_healed_on_read() {
        let harness = TestHarness::seeded().await;

        let stored = harness.store.get_claim(ClaimId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, dec!(5000.00));

        let all = harness.service.list_all_claims().await.unwrap();
        assert_eq!(all[0].claim.total_amount, dec!(7500.00));
        assert_eq!(all[0].lecturer_email.as_deref(), Some("steven.pro@uni.ac.za"));
    }

    #[tokio::test]
    async fn test_single_claim_reads_report_current_total() {
        let harness = TestHarness::seeded().await;

        let fetched = harness.service.get_claim(ClaimId::new(1)).await.unwrap().unwrap();
        assert_eq!(fetched.total_amount, dec!(7500.00));

        let approved = harness.service.update_status(ClaimId::new(1), "Approved").await.unwrap();
        assert_eq!(approved.total_amount, dec!(7500.00));

        let verified = harness
            .service
            .update_verification(ClaimId::new(1), true, None)
            .await
            .unwrap();
        assert_eq!(verified.total_amount, dec!(7500.00));
    }

    #[tokio::test]
    async fn test_seeded_claim_without_hours_reads_as_zero() {
        let harness = TestHarness::seeded().await;
        let claim = harness.service.get_claim(ClaimId::new(3)).await.unwrap().unwrap();
        assert_eq!(claim.total_amount, dec!(0));
    }

    #[tokio::test]
    async fn test_seeded_ids_are_not_reused() {
        let harness = TestHarness::seeded().await;
        let id = harness.submit(SubmissionBuilder::new()).await;
        assert_eq!(id, ClaimId::new(4));

        let hours = harness.service.get_hours_for_claim(id).await.unwrap();
        assert!(hours.iter().all(|h| h.id.value() > 104));
        let documents = harness.service.get_documents_for_claim(id).await.unwrap();
        assert!(documents.iter().all(|d| d.id.value() > 2));
    }

    #[tokio::test]
    async fn test_seeding_twice_conflicts() {
        let harness = TestHarness::seeded().await;
        let err = harness.service.seed_demo_data().await.unwrap_err();
        assert!(matches!(err, ClaimError::Store(_)));
    }

    #[tokio::test]
    async fn test_seeded_pending_list() {
        let harness = TestHarness::seeded().await;
        let pending = harness.service.list_pending_claims().await.unwrap();
        assert_claim_ids(&pending, &[1]);
    }
}

// ============================================================================
// Notification Tests
// ============================================================================

mod notification_tests {
    use super::*;
    use domain_claims::ClaimEvent;

    #[tokio::test]
    async fn test_subscriber_receives_finalized_claim() {
        let harness = TestHarness::with_lecturers().await;
        let mut subscription = harness.service.subscribe();

        let id = harness.submit(SubmissionBuilder::new()).await;

        match subscription.recv().await {
            Some(ClaimEvent::Submitted { claim, .. }) => {
                assert_eq!(claim.id, id);
                assert_eq!(claim.total_amount, dec!(7500.00));
                assert!(claim.has_status(ClaimStatus::PendingReview));
            }
            None => panic!("expected a submission event"),
        }
    }

    #[tokio::test]
    async fn test_failed_submission_publishes_nothing() {
        let harness = TestHarness::with_lecturers().await;
        let mut subscription = harness.service.subscribe();

        let (draft, hours, docs) = SubmissionBuilder::new().without_hours().build();
        assert!(harness.service.submit_claim(draft, hours, docs).await.is_err());

        assert!(subscription.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_unsubscribed_handle_is_released() {
        let harness = TestHarness::with_lecturers().await;
        let subscription = harness.service.subscribe();
        assert_eq!(harness.service.notifier().subscriber_count(), 1);

        subscription.unsubscribe();
        harness.submit(SubmissionBuilder::new()).await;
        assert_eq!(harness.service.notifier().subscriber_count(), 0);
    }
}
