//! Demo data
//!
//! Two lecturers, two staff accounts, and three claims in different
//! statuses. Claim 1 is stored with a stale total (5000.00 for 15 hours at
//! 500.00); reads report 7500.00.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, ClaimPeriod, DocumentId, HoursWorkedId, LecturerId};

use crate::claim::Claim;
use crate::document::SupportingDocument;
use crate::error::ClaimError;
use crate::hours::HoursWorked;
use crate::lecturer::{Lecturer, LecturerRole};
use crate::ports::{ClaimStore, StoredSubmission};
use crate::status::ClaimStatus;

const PLACEHOLDER_PATH: &str = "fake/path";

/// Demo staff records
pub fn lecturers() -> Vec<Lecturer> {
    vec![
        Lecturer::new(LecturerId::new(1), "Steven", "Pro", dec!(500.00), "steven.pro@uni.ac.za"),
        Lecturer::new(LecturerId::new(2), "Alice", "Smith", dec!(450.00), "alice.smith@uni.ac.za"),
        Lecturer::new(LecturerId::new(10), "Admin", "User", dec!(0.00), "pc.coord@uni.ac.za")
            .with_role(LecturerRole::Coordinator),
        Lecturer::new(LecturerId::new(11), "HR", "Manager", dec!(0.00), "hr.manager@uni.ac.za")
            .with_role(LecturerRole::Hr),
    ]
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ClaimError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ClaimError::validation(format!("invalid date {year}-{month}-{day}")))
}

fn hours(id: u32, claim: u32, worked: NaiveDate, hours: Decimal, description: &str) -> HoursWorked {
    HoursWorked {
        id: HoursWorkedId::new(id),
        claim_id: ClaimId::new(claim),
        date_worked: worked,
        hours,
        description: description.to_string(),
    }
}

fn document(id: u32, claim: u32, file_name: &str) -> SupportingDocument {
    SupportingDocument {
        id: DocumentId::new(id),
        claim_id: ClaimId::new(claim),
        file_name: file_name.to_string(),
        file_path: PLACEHOLDER_PATH.to_string(),
    }
}

fn header(
    id: u32,
    lecturer: u32,
    period: ClaimPeriod,
    submitted_at: DateTime<Utc>,
    total: Decimal,
    status: ClaimStatus,
) -> Claim {
    Claim {
        id: ClaimId::new(id),
        lecturer_id: LecturerId::new(lecturer),
        period,
        submitted_at,
        total_amount: total,
        status_id: status.id(),
        is_verified: false,
        verification_notes: None,
    }
}

/// Demo claims with their hours and documents, timestamped relative to `now`
pub fn claims(now: DateTime<Utc>) -> Result<Vec<StoredSubmission>, ClaimError> {
    Ok(vec![
        StoredSubmission {
            claim: header(
                1,
                1,
                ClaimPeriod::new(10, 2025)?,
                now - Duration::days(5),
                dec!(5000.00),
                ClaimStatus::PendingReview,
            ),
            hours: vec![
                hours(101, 1, date(2025, 10, 1)?, dec!(10), "Lecture - C# Programming"),
                hours(102, 1, date(2025, 10, 2)?, dec!(5), "Marking - Exam Papers"),
            ],
            documents: vec![
                document(1, 1, "Attendance_Oct_1.pdf"),
                document(2, 1, "Teaching_Log_Oct.docx"),
            ],
        },
        StoredSubmission {
            claim: header(
                2,
                2,
                ClaimPeriod::new(9, 2025)?,
                now - Duration::days(30),
                dec!(9000.00),
                ClaimStatus::Approved,
            ),
            hours: vec![
                hours(103, 2, date(2025, 9, 15)?, dec!(15), "Seminar Prep"),
                hours(104, 2, date(2025, 9, 20)?, dec!(5), "Student Consultation"),
            ],
            documents: vec![],
        },
        StoredSubmission {
            claim: header(
                3,
                1,
                ClaimPeriod::new(8, 2025)?,
                now - Duration::days(60),
                dec!(4000.00),
                ClaimStatus::Rejected,
            ),
            hours: vec![],
            documents: vec![],
        },
    ])
}

/// Loads the demo lecturers and claims into a store
///
/// # Errors
///
/// Fails with a store conflict if any demo id is already taken.
pub async fn load(store: &dyn ClaimStore, now: DateTime<Utc>) -> Result<(), ClaimError> {
    for lecturer in lecturers() {
        lecturer.validate_record()?;
        store.insert_lecturer(lecturer).await?;
    }
    for record in claims(now)? {
        store.import_claim(record).await?;
    }
    Ok(())
}
