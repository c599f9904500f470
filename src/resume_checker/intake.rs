// src/resume_checker/intake.rs
use tracing::warn;

use crate::error::ValidationError;
use crate::types::{AnalysisRequest, DocumentFormat, ResumeDocument};

pub struct IntakeValidator;

impl IntakeValidator {
    /// Check that a picked file declares a supported format
    pub fn check_document(document: &ResumeDocument) -> Result<DocumentFormat, ValidationError> {
        DocumentFormat::from_media_type(&document.media_type).ok_or_else(|| {
            ValidationError::InvalidFileType {
                received: document.media_type.clone(),
            }
        })
    }

    /// Build a request from the current selection, or say why it cannot be submitted.
    /// Checks run in order: file present, file is a PDF, description not blank.
    pub fn validate(
        document: Option<&ResumeDocument>,
        job_description: &str,
    ) -> Result<AnalysisRequest, ValidationError> {
        let document = document.ok_or(ValidationError::NoFileSelected)?;

        let format = Self::check_document(document).map_err(|e| {
            warn!("Rejected {}: {}", document.file_name, e);
            e
        })?;

        if job_description.trim().is_empty() {
            return Err(ValidationError::EmptyJobDescription);
        }

        Ok(AnalysisRequest::new(
            document.clone(),
            format,
            job_description.to_string(),
        ))
    }
}
