//! Supporting documents attached to a claim

use std::path::Path;

use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DocumentId};
use crate::error::ClaimError;

/// Largest accepted upload, 5 MiB
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;
/// Accepted file extensions, lower case without the dot
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "xlsx"];

/// Metadata for a document offered with a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub file_path: String,
    pub size_bytes: u64,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, file_path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: file_path.into(),
            size_bytes,
        }
    }

    /// Lower-cased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Intake check run before a document may be attached
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the file exceeds [`MAX_DOCUMENT_BYTES`] or its
    /// extension is not one of [`ALLOWED_EXTENSIONS`].
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.size_bytes > MAX_DOCUMENT_BYTES {
            return Err(ClaimError::invalid_argument(format!(
                "File '{}' is {} bytes; the limit is 5MB",
                self.file_name, self.size_bytes
            )));
        }
        match self.extension() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(ClaimError::invalid_argument(format!(
                "Unsupported file type for '{}'; use PDF, DOCX, or XLSX",
                self.file_name
            ))),
        }
    }
}

/// A persisted document record, owned by exactly one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingDocument {
    pub id: DocumentId,
    pub claim_id: ClaimId,
    pub file_name: String,
    pub file_path: String,
}

impl SupportingDocument {
    /// Attaches an upload to a claim under the given id
    pub fn attach(id: DocumentId, claim_id: ClaimId, upload: DocumentUpload) -> Self {
        Self {
            id,
            claim_id,
            file_name: upload.file_name,
            file_path: upload.file_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_accepts_small_pdf() {
        let upload = DocumentUpload::new("Attendance_Oct_1.pdf", "/claims/1/a.pdf", MIB);
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_accepts_exactly_five_mib() {
        let upload = DocumentUpload::new("log.xlsx", "/claims/1/log.xlsx", 5 * MIB);
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_rejects_six_mib() {
        let upload = DocumentUpload::new("big.pdf", "/claims/1/big.pdf", 6 * MIB);
        let err = upload.validate().unwrap_err();
        assert!(matches!(err, ClaimError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_exe() {
        let upload = DocumentUpload::new("setup.exe", "/claims/1/setup.exe", MIB);
        assert!(matches!(upload.validate(), Err(ClaimError::InvalidArgument(_))));
    }

    #[test]
    fn test_rejects_missing_extension() {
        let upload = DocumentUpload::new("README", "/claims/1/README", 10);
        assert!(upload.validate().is_err());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let upload = DocumentUpload::new("Teaching_Log_Oct.DOCX", "/claims/1/t.docx", MIB);
        assert_eq!(upload.extension().as_deref(), Some("docx"));
        assert!(upload.validate().is_ok());
    }
}
