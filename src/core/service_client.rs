// src/core/service_client.rs
//! HTTP client for the remote ATS scoring service

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{error, info, trace};

use crate::config::AtsServiceConfig;
use crate::error::TransportError;
use crate::resume_checker::AnalysisBackend;
use crate::types::{AnalysisRequest, RawAnalysisResult};

const UPLOAD_ENDPOINT: &str = "/upload";

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

pub struct AtsServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl AtsServiceClient {
    /// Create new service client with configuration
    pub fn new(config: &AtsServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_ENDPOINT)
    }

    /// Send the resume and job description as multipart, receive the raw analysis
    pub async fn upload(
        &self,
        request: &AnalysisRequest,
    ) -> Result<RawAnalysisResult, TransportError> {
        let url = self.upload_url();
        let document = request.document();

        let resume_part = Part::bytes(document.content.clone())
            .file_name(document.file_name.clone())
            .mime_str(request.format().media_type())
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let form = Form::new()
            .part(RESUME_FIELD, resume_part)
            .text(JOB_DESCRIPTION_FIELD, request.job_description().to_string());

        info!("Calling ATS service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("ATS service error response: {}", error_text);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| TransportError::InvalidBody(e.to_string()))?;

        trace!("Raw ATS service response: {}", response_text);

        serde_json::from_str::<RawAnalysisResult>(&response_text).map_err(|e| {
            TransportError::InvalidBody(format!("{}. Raw response: {}", e, response_text))
        })
    }
}

#[async_trait]
impl AnalysisBackend for AtsServiceClient {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<RawAnalysisResult, TransportError> {
        self.upload(request).await
    }
}
