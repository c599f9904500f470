// src/resume_checker/dispatcher.rs
//! Single remote attempt, with the mock scorer standing in on any failure

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};

use super::mock_scorer::MockScorer;
use crate::error::TransportError;
use crate::notify::Notifier;
use crate::types::{AnalysisRequest, AnalysisSource, RawAnalysisResult};

pub const FALLBACK_NOTICE: &str = "Using mock analysis (ATS server not available)";

/// Anything that can score a validated request remotely
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawAnalysisResult, TransportError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub raw: RawAnalysisResult,
    pub source: AnalysisSource,
}

pub struct AnalysisDispatcher<B> {
    backend: B,
}

impl<B: AnalysisBackend> AnalysisDispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Never fails: transport errors are logged and replaced by a mock result.
    /// There is no retry of the remote call.
    pub async fn dispatch<R: Rng + Send + ?Sized>(
        &self,
        request: &AnalysisRequest,
        rng: &mut R,
        notifier: &dyn Notifier,
    ) -> Dispatched {
        match self.backend.analyze(request).await {
            Ok(raw) => {
                info!("ATS service analysis received");
                Dispatched {
                    raw,
                    source: AnalysisSource::Remote,
                }
            }
            Err(e) => {
                warn!("ATS service not available, falling back to mock analysis: {}", e);
                let raw = MockScorer::generate(rng);
                notifier.info(FALLBACK_NOTICE);
                Dispatched {
                    raw,
                    source: AnalysisSource::Fallback,
                }
            }
        }
    }
}
