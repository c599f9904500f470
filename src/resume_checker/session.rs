// src/resume_checker/session.rs
//! Per-session state record. Every transition returns a new record.

use serde::Serialize;
use std::sync::Arc;

use super::intake::IntakeValidator;
use crate::error::{SessionError, ValidationError};
use crate::types::{AnalysisRequest, NormalizedAnalysis, ResumeDocument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Analyzing,
    Done,
    Failed,
}

/// What the progress bar shows while a submission is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub label: &'static str,
    pub step: u8,
    pub total_steps: u8,
    pub percent: u8,
}

impl Phase {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Uploading | Self::Analyzing)
    }

    pub fn progress(&self) -> Option<ProgressView> {
        match self {
            Self::Uploading => Some(ProgressView {
                label: "Uploading...",
                step: 1,
                total_steps: 2,
                percent: 40,
            }),
            Self::Analyzing => Some(ProgressView {
                label: "Analyzing resume...",
                step: 2,
                total_steps: 2,
                percent: 80,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckerSession {
    file: Option<Arc<ResumeDocument>>,
    job_description: String,
    phase: Phase,
    result: Option<NormalizedAnalysis>,
}

impl CheckerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&ResumeDocument> {
        self.file.as_deref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&NormalizedAnalysis> {
        self.result.as_ref()
    }

    /// Pick a file. A non-PDF is refused and the current selection stays.
    pub fn select_file(&self, document: ResumeDocument) -> Result<Self, ValidationError> {
        IntakeValidator::check_document(&document)?;
        Ok(Self {
            file: Some(Arc::new(document)),
            ..self.clone()
        })
    }

    pub fn clear_file(&self) -> Self {
        Self {
            file: None,
            ..self.clone()
        }
    }

    pub fn with_job_description(&self, text: impl Into<String>) -> Self {
        Self {
            job_description: text.into(),
            ..self.clone()
        }
    }

    /// Mirrors the enabled state of the submit trigger
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.job_description.trim().is_empty() && !self.phase.is_in_flight()
    }

    /// Validate and enter the uploading phase. The previous result is kept until replaced.
    pub fn begin_upload(&self) -> Result<(Self, AnalysisRequest), SessionError> {
        if self.phase.is_in_flight() {
            return Err(SessionError::AnalysisInFlight);
        }

        let request = IntakeValidator::validate(self.file(), &self.job_description)?;
        let next = Self {
            phase: Phase::Uploading,
            ..self.clone()
        };
        Ok((next, request))
    }

    pub fn begin_analysis(&self) -> Self {
        Self {
            phase: Phase::Analyzing,
            ..self.clone()
        }
    }

    pub fn complete(&self, analysis: NormalizedAnalysis) -> Self {
        Self {
            phase: Phase::Done,
            result: Some(analysis),
            ..self.clone()
        }
    }

    pub fn fail(&self) -> Self {
        Self {
            phase: Phase::Failed,
            ..self.clone()
        }
    }

    /// Start over: no file, no description, no result
    pub fn reset(&self) -> Self {
        Self::default()
    }
}
