// src/types/document.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::content_type_for;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
}

impl DocumentFormat {
    /// Map a declared media type onto a supported format
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type.trim().to_ascii_lowercase().as_str() {
            PDF_MEDIA_TYPE => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Pdf => PDF_MEDIA_TYPE,
        }
    }
}

/// A candidate document as picked by the user: name, declared media type and raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    pub file_name: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl ResumeDocument {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            content,
        }
    }

    /// Read a document from disk, declaring its media type from the extension
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let media_type = content_type_for(&file_name).to_string();

        Ok(Self {
            file_name,
            media_type,
            content,
        })
    }

    pub fn size_mb(&self) -> f64 {
        self.content.len() as f64 / 1024.0 / 1024.0
    }
}

/// A submission that passed intake checks. Only the intake validator builds these.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    document: ResumeDocument,
    format: DocumentFormat,
    job_description: String,
}

impl AnalysisRequest {
    pub(crate) fn new(
        document: ResumeDocument,
        format: DocumentFormat,
        job_description: String,
    ) -> Self {
        Self {
            document,
            format,
            job_description,
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}
