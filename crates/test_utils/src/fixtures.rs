//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for lecturers, hours entries, and
//! document uploads. These fixtures are consistent and predictable.

use chrono::NaiveDate;
use core_kernel::LecturerId;
use domain_claims::{DocumentUpload, HoursEntry, Lecturer, LecturerRole};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One mebibyte
pub const MIB: u64 = 1024 * 1024;

/// Fixture for staff records
pub struct LecturerFixtures;

impl LecturerFixtures {
    /// Lecturer 1, rate 500.00
    pub fn steven() -> Lecturer {
        Lecturer::new(LecturerId::new(1), "Steven", "Pro", dec!(500.00), "steven.pro@uni.ac.za")
    }

    /// Lecturer 2, rate 450.00
    pub fn alice() -> Lecturer {
        Lecturer::new(LecturerId::new(2), "Alice", "Smith", dec!(450.00), "alice.smith@uni.ac.za")
    }

    /// Programme coordinator, id 10
    pub fn coordinator() -> Lecturer {
        Lecturer::new(LecturerId::new(10), "Admin", "User", Decimal::ZERO, "pc.coord@uni.ac.za")
            .with_role(LecturerRole::Coordinator)
    }

    /// HR account, id 11
    pub fn hr() -> Lecturer {
        Lecturer::new(LecturerId::new(11), "HR", "Manager", Decimal::ZERO, "hr.manager@uni.ac.za")
            .with_role(LecturerRole::Hr)
    }

    /// Both lecturers
    pub fn lecturers() -> Vec<Lecturer> {
        vec![Self::steven(), Self::alice()]
    }
}

/// Fixture for hours entries
pub struct HoursFixtures;

impl HoursFixtures {
    /// 1 October 2025
    pub fn october_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
    }

    /// An entry of the given hours on 1 October 2025
    pub fn entry(hours: Decimal) -> HoursEntry {
        HoursEntry::new(Self::october_first(), hours, "Lecture - Systems Programming")
    }

    /// The 10h + 5h pair used throughout the suite
    pub fn ten_and_five() -> Vec<HoursEntry> {
        vec![
            HoursEntry::new(Self::october_first(), dec!(10), "Lecture - C# Programming"),
            HoursEntry::new(
                NaiveDate::from_ymd_opt(2025, 10, 2).expect("valid date"),
                dec!(5),
                "Marking - Exam Papers",
            ),
        ]
    }
}

/// Fixture for document uploads
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// A 1 MiB pdf
    pub fn small_pdf() -> DocumentUpload {
        DocumentUpload::new("Attendance_Oct_1.pdf", "/uploads/attendance.pdf", MIB)
    }

    /// A 6 MiB pdf, over the limit
    pub fn oversized_pdf() -> DocumentUpload {
        DocumentUpload::new("Scans.pdf", "/uploads/scans.pdf", 6 * MIB)
    }

    /// An executable, not an accepted type
    pub fn executable() -> DocumentUpload {
        DocumentUpload::new("setup.exe", "/uploads/setup.exe", MIB)
    }
}
