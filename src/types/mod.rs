// src/types/mod.rs
pub mod analysis;
pub mod document;
pub mod response;

pub use analysis::{AnalysisSource, NormalizedAnalysis, ScoreBand, GENERAL_IMPROVEMENT_TIPS};
pub use document::{AnalysisRequest, DocumentFormat, ResumeDocument};
pub use response::RawAnalysisResult;
