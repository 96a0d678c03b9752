//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::LecturerId;
use domain_claims::{ClaimDraft, DocumentUpload, HoursEntry, Lecturer, LecturerRole};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{DocumentFixtures, HoursFixtures};

/// Builder for a claim submission: draft, hours, and documents
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
    lecturer_id: LecturerId,
    month: u32,
    year: i32,
    hours: Vec<HoursEntry>,
    documents: Vec<DocumentUpload>,
}

impl Default for SubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionBuilder {
    /// Lecturer 1, October 2025, 10h + 5h, one small pdf
    pub fn new() -> Self {
        Self {
            lecturer_id: LecturerId::new(1),
            month: 10,
            year: 2025,
            hours: HoursFixtures::ten_and_five(),
            documents: vec![DocumentFixtures::small_pdf()],
        }
    }

    pub fn for_lecturer(mut self, id: u32) -> Self {
        self.lecturer_id = LecturerId::new(id);
        self
    }

    pub fn for_period(mut self, month: u32, year: i32) -> Self {
        self.month = month;
        self.year = year;
        self
    }

    /// Replaces the hours with one entry per value
    pub fn with_hours(mut self, hours: impl IntoIterator<Item = Decimal>) -> Self {
        self.hours = hours.into_iter().map(HoursFixtures::entry).collect();
        self
    }

    /// Appends a fully specified entry
    pub fn add_entry(mut self, entry: HoursEntry) -> Self {
        self.hours.push(entry);
        self
    }

    pub fn without_hours(mut self) -> Self {
        self.hours.clear();
        self
    }

    pub fn with_document(mut self, document: DocumentUpload) -> Self {
        self.documents.push(document);
        self
    }

    pub fn without_documents(mut self) -> Self {
        self.documents.clear();
        self
    }

    /// Total hours on the submission
    pub fn hours_total(&self) -> Decimal {
        self.hours.iter().map(|entry| entry.hours).sum()
    }

    /// Builds the three `submit_claim` arguments
    pub fn build(self) -> (ClaimDraft, Vec<HoursEntry>, Vec<DocumentUpload>) {
        (
            ClaimDraft::new(self.lecturer_id, self.month, self.year),
            self.hours,
            self.documents,
        )
    }
}

/// Builder for lecturer records
#[derive(Debug, Clone)]
pub struct LecturerBuilder {
    id: LecturerId,
    first_name: String,
    last_name: String,
    hourly_rate: Decimal,
    role: LecturerRole,
    email: String,
}

impl LecturerBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            id: LecturerId::new(id),
            first_name: "Test".to_string(),
            last_name: format!("Lecturer{id}"),
            hourly_rate: dec!(300.00),
            role: LecturerRole::Lecturer,
            email: format!("lecturer{id}@uni.ac.za"),
        }
    }

    pub fn named(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    pub fn with_role(mut self, role: LecturerRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn build(self) -> Lecturer {
        Lecturer::new(self.id, self.first_name, self.last_name, self.hourly_rate, self.email)
            .with_role(self.role)
    }
}
