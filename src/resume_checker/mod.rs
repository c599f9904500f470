// src/resume_checker/mod.rs
//! Resume / job description matching: intake, remote analysis with local fallback, normalization

pub mod checker;
pub mod dispatcher;
pub mod intake;
pub mod mock_scorer;
pub mod normalizer;
pub mod report;
pub mod session;

pub use checker::{Delay, NoDelay, ResumeChecker, RunOutcome, SessionHandle, TokioDelay};
pub use dispatcher::{AnalysisBackend, AnalysisDispatcher, Dispatched};
pub use intake::IntakeValidator;
pub use mock_scorer::MockScorer;
pub use normalizer::normalize;
pub use session::{CheckerSession, Phase, ProgressView};
