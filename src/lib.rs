// src/lib.rs
//! Career insights: resume ATS checks with an offline fallback, industry insights
//! coercion and profile onboarding.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod insights;
pub mod notify;
pub mod onboarding;
pub mod resume_checker;
pub mod types;
pub mod utils;

pub use config::AppConfig;
pub use error::{AnalysisError, SessionError, TransportError, ValidationError};
pub use resume_checker::{CheckerSession, ResumeChecker, RunOutcome};
pub use types::{AnalysisRequest, NormalizedAnalysis, RawAnalysisResult, ResumeDocument};
