// src/resume_checker/checker.rs
//! Drives one submission through upload delay, dispatch and normalization

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::dispatcher::{AnalysisBackend, AnalysisDispatcher};
use super::normalizer::normalize;
use super::session::CheckerSession;
use crate::config::AppConfig;
use crate::core::AtsServiceClient;
use crate::error::{AnalysisError, SessionError};
use crate::notify::Notifier;
use crate::types::{AnalysisSource, NormalizedAnalysis};

pub const SUCCESS_NOTICE: &str = "Your resume has been analyzed successfully";

pub type SessionHandle = Arc<Mutex<CheckerSession>>;

/// Waits between the uploading and analyzing phases
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed {
        analysis: NormalizedAnalysis,
        source: AnalysisSource,
    },
    Rejected(SessionError),
    Failed(AnalysisError),
    /// The session went away before the run finished; nothing was written
    Abandoned,
}

pub struct ResumeChecker<B, D = TokioDelay> {
    dispatcher: AnalysisDispatcher<B>,
    delay: D,
    upload_delay: Duration,
    notifier: Arc<dyn Notifier>,
}

impl ResumeChecker<AtsServiceClient, TokioDelay> {
    pub fn from_config(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let client = AtsServiceClient::new(&config.ats)?;
        Ok(Self::new(client, TokioDelay, config.upload_delay, notifier))
    }
}

impl<B: AnalysisBackend, D: Delay> ResumeChecker<B, D> {
    pub fn new(backend: B, delay: D, upload_delay: Duration, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            dispatcher: AnalysisDispatcher::new(backend),
            delay,
            upload_delay,
            notifier,
        }
    }

    pub fn new_session() -> SessionHandle {
        Arc::new(Mutex::new(CheckerSession::new()))
    }

    /// Run one submission against the session. Only a weak reference is held across
    /// the two suspension points, so a dropped session ends the run as `Abandoned`.
    pub async fn submit<R: Rng + Send + ?Sized>(
        &self,
        session: &SessionHandle,
        rng: &mut R,
    ) -> RunOutcome {
        self.submit_detached(Arc::downgrade(session), rng).await
    }

    /// Same as `submit` for callers that must not keep the session alive
    pub async fn submit_detached<R: Rng + Send + ?Sized>(
        &self,
        holder: Weak<Mutex<CheckerSession>>,
        rng: &mut R,
    ) -> RunOutcome {
        let span = info_span!("resume_analysis", run_id = %Uuid::new_v4());
        self.run(holder, rng).instrument(span).await
    }

    async fn run<R: Rng + Send + ?Sized>(
        &self,
        holder: Weak<Mutex<CheckerSession>>,
        rng: &mut R,
    ) -> RunOutcome {
        let request = {
            let Some(session) = holder.upgrade() else {
                return RunOutcome::Abandoned;
            };
            let mut state = lock(&session);
            match state.begin_upload() {
                Ok((next, request)) => {
                    *state = next;
                    request
                }
                Err(SessionError::Validation(e)) => {
                    warn!("Submission rejected: {}", e);
                    self.notifier.error(e.message());
                    return RunOutcome::Rejected(SessionError::Validation(e));
                }
                Err(e) => {
                    warn!("Submission ignored: {}", e);
                    return RunOutcome::Rejected(e);
                }
            }
        };
        info!(
            "Uploading {} ({:.2} MB)",
            request.document().file_name,
            request.document().size_mb()
        );

        self.delay.wait(self.upload_delay).await;

        if !update(&holder, CheckerSession::begin_analysis) {
            debug!("Session dropped during upload");
            return RunOutcome::Abandoned;
        }
        info!("Analyzing resume");

        let dispatched = self
            .dispatcher
            .dispatch(&request, rng, self.notifier.as_ref())
            .await;

        let Some(session) = holder.upgrade() else {
            debug!("Session dropped during analysis, discarding result");
            return RunOutcome::Abandoned;
        };
        let mut state = lock(&session);

        match normalize(&dispatched.raw) {
            Ok(analysis) => {
                *state = state.complete(analysis.clone());
                if dispatched.source == AnalysisSource::Remote {
                    self.notifier.success(SUCCESS_NOTICE);
                }
                info!(score = analysis.score, source = ?dispatched.source, "Analysis complete");
                RunOutcome::Completed {
                    analysis,
                    source: dispatched.source,
                }
            }
            Err(e) => {
                warn!("Error analyzing resume: {}", e);
                *state = state.fail();
                self.notifier.error(&format!("Failed to analyze resume: {}", e));
                RunOutcome::Failed(e)
            }
        }
    }
}

fn lock(session: &Mutex<CheckerSession>) -> MutexGuard<'_, CheckerSession> {
    session
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Apply a transition if the session still exists
fn update(
    holder: &Weak<Mutex<CheckerSession>>,
    transition: fn(&CheckerSession) -> CheckerSession,
) -> bool {
    match holder.upgrade() {
        Some(session) => {
            let mut state = lock(&session);
            *state = transition(&state);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransportError, ValidationError};
    use crate::notify::{MemoryNotifier, NoticeLevel};
    use crate::resume_checker::dispatcher::FALLBACK_NOTICE;
    use crate::resume_checker::session::Phase;
    use crate::types::{AnalysisRequest, RawAnalysisResult, ResumeDocument};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct FixedBackend {
        calls: Arc<AtomicUsize>,
        reply: Option<RawAnalysisResult>,
    }

    #[async_trait]
    impl AnalysisBackend for FixedBackend {
        async fn analyze(
            &self,
            _request: &AnalysisRequest,
        ) -> Result<RawAnalysisResult, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .ok_or_else(|| TransportError::Unreachable("connection refused".to_string()))
        }
    }

    /// Records the phase seen while waiting, then parks until released
    struct GateDelay {
        session: Weak<Mutex<CheckerSession>>,
        seen: Arc<Mutex<Vec<Phase>>>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl Delay for GateDelay {
        async fn wait(&self, _duration: Duration) {
            if let Some(session) = self.session.upgrade() {
                let phase = lock(&session).phase();
                self.seen.lock().unwrap().push(phase);
            }
            self.release.notified().await;
        }
    }

    /// Signals once the call is in flight, then parks until released
    struct ParkedBackend {
        entered: Arc<Notify>,
        release: Arc<Notify>,
        reply: Option<RawAnalysisResult>,
    }

    #[async_trait]
    impl AnalysisBackend for ParkedBackend {
        async fn analyze(
            &self,
            _request: &AnalysisRequest,
        ) -> Result<RawAnalysisResult, TransportError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.reply
                .clone()
                .ok_or_else(|| TransportError::Unreachable("connection reset".to_string()))
        }
    }

    /// Drops the session while the backend call is parked and returns the run outcome
    async fn run_dropped_during_call(
        reply: Option<RawAnalysisResult>,
    ) -> (RunOutcome, Arc<MemoryNotifier>) {
        let notifier = Arc::new(MemoryNotifier::new());
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let session = ready_session();

        let checker = Arc::new(ResumeChecker::new(
            ParkedBackend {
                entered: entered.clone(),
                release: release.clone(),
                reply,
            },
            NoDelay,
            Duration::from_millis(1500),
            notifier.clone(),
        ));

        let task = {
            let checker = checker.clone();
            let holder = Arc::downgrade(&session);
            tokio::spawn(async move {
                let mut rng = StdRng::seed_from_u64(0);
                checker.submit_detached(holder, &mut rng).await
            })
        };

        entered.notified().await;
        assert_eq!(lock(&session).phase(), Phase::Analyzing);
        drop(session);
        release.notify_one();

        (task.await.unwrap(), notifier)
    }

    fn checker(
        reply: Option<RawAnalysisResult>,
    ) -> (ResumeChecker<FixedBackend, NoDelay>, Arc<MemoryNotifier>, Arc<AtomicUsize>) {
        let notifier = Arc::new(MemoryNotifier::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let checker = ResumeChecker::new(
            FixedBackend {
                calls: calls.clone(),
                reply,
            },
            NoDelay,
            Duration::from_millis(1500),
            notifier.clone(),
        );
        (checker, notifier, calls)
    }

    fn ready_session() -> SessionHandle {
        let session = CheckerSession::new()
            .select_file(ResumeDocument::new("cv.pdf", "application/pdf", b"%PDF".to_vec()))
            .unwrap()
            .with_job_description("Platform engineer, Kubernetes");
        Arc::new(Mutex::new(session))
    }

    #[tokio::test]
    async fn test_remote_success() {
        let reply =
            RawAnalysisResult::from_fields("88%", vec!["Kubernetes".to_string()], "Strong match.");
        let (checker, notifier, calls) = checker(Some(reply));
        let session = ready_session();

        let outcome = checker
            .submit(&session, &mut StdRng::seed_from_u64(0))
            .await;

        let (analysis, source) = match outcome {
            RunOutcome::Completed { analysis, source } => (analysis, source),
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(source, AnalysisSource::Remote);
        assert_eq!(analysis.score, 88);
        assert_eq!(analysis.missing_keywords, vec!["Kubernetes"]);
        assert_eq!(analysis.improvement_suggestions, vec!["Strong match."]);
        assert!(analysis.keyword_matches.is_empty());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.messages(NoticeLevel::Success), vec![SUCCESS_NOTICE]);
        assert!(notifier.messages(NoticeLevel::Info).is_empty());

        let state = lock(&session);
        assert_eq!(state.phase(), Phase::Done);
        assert_eq!(state.result(), Some(&analysis));
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        let (checker, notifier, calls) = checker(None);
        let session = ready_session();

        let outcome = checker
            .submit(&session, &mut StdRng::seed_from_u64(3))
            .await;

        let (analysis, source) = match outcome {
            RunOutcome::Completed { analysis, source } => (analysis, source),
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(source, AnalysisSource::Fallback);
        assert!((65..=84).contains(&analysis.score));
        assert!((3..=6).contains(&analysis.missing_keywords.len()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.messages(NoticeLevel::Info), vec![FALLBACK_NOTICE]);
        assert!(notifier.messages(NoticeLevel::Success).is_empty());
    }

    #[tokio::test]
    async fn test_no_file_makes_no_call() {
        let (checker, notifier, calls) = checker(None);
        let session = Arc::new(Mutex::new(
            CheckerSession::new().with_job_description("Backend developer"),
        ));

        let outcome = checker
            .submit(&session, &mut StdRng::seed_from_u64(0))
            .await;

        assert_eq!(
            outcome,
            RunOutcome::Rejected(SessionError::Validation(ValidationError::NoFileSelected))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            notifier.notifications(),
            vec![crate::notify::Notification {
                level: NoticeLevel::Error,
                message: "Please select a PDF resume to upload".to_string(),
            }]
        );
        assert_eq!(lock(&session).phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_malformed_result_keeps_previous() {
        let malformed =
            RawAnalysisResult::from_value(serde_json::json!({"JD Match": "n/a"})).unwrap();
        let (checker, notifier, _) = checker(Some(malformed));
        let session = ready_session();

        let previous =
            normalize(&RawAnalysisResult::from_fields(55, vec![], "Earlier run")).unwrap();
        {
            let mut state = lock(&session);
            *state = state.complete(previous.clone());
        }

        let outcome = checker
            .submit(&session, &mut StdRng::seed_from_u64(0))
            .await;

        assert!(matches!(
            outcome,
            RunOutcome::Failed(AnalysisError::MalformedAnalysisResult(_))
        ));
        let errors = notifier.messages(NoticeLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to analyze resume: "));

        let state = lock(&session);
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.result(), Some(&previous));
    }

    #[tokio::test]
    async fn test_dropped_session_is_not_written() {
        let notifier = Arc::new(MemoryNotifier::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let session = ready_session();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let release = Arc::new(Notify::new());

        let checker = Arc::new(ResumeChecker::new(
            FixedBackend {
                calls: calls.clone(),
                reply: Some(RawAnalysisResult::from_fields("70%", vec![], "ok")),
            },
            GateDelay {
                session: Arc::downgrade(&session),
                seen: seen.clone(),
                release: release.clone(),
            },
            Duration::from_millis(1500),
            notifier.clone(),
        ));

        let task = {
            let checker = checker.clone();
            let holder = Arc::downgrade(&session);
            tokio::spawn(async move {
                let mut rng = StdRng::seed_from_u64(0);
                checker.submit_detached(holder, &mut rng).await
            })
        };

        // wait until the run is parked in the upload delay
        while seen.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }
        assert_eq!(seen.lock().unwrap()[0], Phase::Uploading);
        drop(session);
        release.notify_one();

        let outcome = task.await.unwrap();
        assert_eq!(outcome, RunOutcome::Abandoned);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_session_dropped_during_remote_call() {
        let reply = RawAnalysisResult::from_fields("91%", vec![], "Great fit.");
        let (outcome, notifier) = run_dropped_during_call(Some(reply)).await;

        assert_eq!(outcome, RunOutcome::Abandoned);
        assert!(notifier.messages(NoticeLevel::Success).is_empty());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_session_dropped_during_failing_call() {
        let (outcome, notifier) = run_dropped_during_call(None).await;

        assert_eq!(outcome, RunOutcome::Abandoned);
        assert_eq!(
            notifier.notifications(),
            vec![crate::notify::Notification {
                level: NoticeLevel::Info,
                message: FALLBACK_NOTICE.to_string(),
            }]
        );
    }
}
