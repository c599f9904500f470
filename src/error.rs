// src/error.rs
use thiserror::Error;

/// Rejections raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no resume file selected")]
    NoFileSelected,
    #[error("resume file is not a PDF (received {received})")]
    InvalidFileType { received: String },
    #[error("job description is empty")]
    EmptyJobDescription,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoFileSelected => "NO_FILE_SELECTED",
            Self::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            Self::EmptyJobDescription => "EMPTY_JOB_DESCRIPTION",
        }
    }

    /// Text shown to the user when the check fails
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoFileSelected => "Please select a PDF resume to upload",
            Self::InvalidFileType { .. } => "Please upload a PDF file",
            Self::EmptyJobDescription => "Please enter a job description",
        }
    }
}

/// Failures of the remote scoring call. Always recovered by the local fallback.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build ATS request: {0}")]
    Request(String),
    #[error("ATS service unreachable: {0}")]
    Unreachable(String),
    #[error("ATS service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("ATS service returned an unreadable body: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("malformed analysis result: {0}")]
    MalformedAnalysisResult(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("an analysis is already in progress")]
    AnalysisInFlight,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
