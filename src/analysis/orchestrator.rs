use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::{
    analysis::{
        error::{AnalysisError, network_error},
        ports::ReasoningBoundary,
        session::{AnalysisSession, AnalysisStatus},
        types::{AnalysisRequest, AnalysisResult},
        validate::validate_result,
    },
    selection::SelectionStore,
};

/// How a single `run()` call ended from the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Succeeded { run_id: u64 },
    Failed { run_id: u64, error: AnalysisError },
    /// A newer run was issued before this one resolved; its outcome was
    /// dropped without touching the session.
    Superseded { run_id: u64 },
}

impl RunOutcome {
    pub fn run_id(&self) -> u64 {
        match self {
            RunOutcome::Succeeded { run_id }
            | RunOutcome::Failed { run_id, .. }
            | RunOutcome::Superseded { run_id } => *run_id,
        }
    }
}

#[derive(Default)]
struct InFlightRun {
    last_run_id: u64,
    cancel: Option<CancellationToken>,
}

/// Owns the request/response lifecycle and the session state machine.
pub struct AnalysisOrchestrator {
    boundary: Arc<dyn ReasoningBoundary>,
    session: watch::Sender<AnalysisSession>,
    in_flight: Mutex<InFlightRun>,
}

impl AnalysisOrchestrator {
    pub fn new(boundary: Arc<dyn ReasoningBoundary>) -> Self {
        let (session, _) = watch::channel(AnalysisSession::default());
        Self {
            boundary,
            session,
            in_flight: Mutex::new(InFlightRun::default()),
        }
    }

    /// Snapshots `selection`, calls the reasoning boundary and records the
    /// outcome. Any run still in flight is cancelled and its late outcome is
    /// discarded. Boundary failures end in `Failed`; they are never returned
    /// as errors.
    pub async fn run(&self, selection: &SelectionStore) -> RunOutcome {
        let request = AnalysisRequest::from(&selection.snapshot());
        let (run_id, cancel) = self.begin_run().await;
        let guard = AbandonGuard::new(self, run_id);

        let span = tracing::info_span!(
            target: "analysis.orchestrator",
            "analysis_run",
            run_id = run_id,
            events = request.events.len(),
            companies = request.companies.len()
        );

        async move {
            if request.events.is_empty() && request.companies.is_empty() {
                tracing::warn!(target: "analysis.orchestrator", "analysis_run_empty_selection");
            }
            tracing::info!(target: "analysis.orchestrator", "analysis_run_started");

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                outcome = self.boundary.analyze(request) => Some(outcome),
            };

            let Some(outcome) = outcome else {
                guard.disarm();
                tracing::info!(target: "analysis.orchestrator", "analysis_run_cancelled");
                return RunOutcome::Superseded { run_id };
            };

            let outcome =
                outcome.and_then(|result| validate_result(&result).map(|()| result));
            let run_outcome = self.finish_run(run_id, outcome).await;
            guard.disarm();
            run_outcome
        }
        .instrument(span)
        .await
    }

    pub fn session(&self) -> AnalysisSession {
        self.session.borrow().clone()
    }

    pub fn status(&self) -> AnalysisStatus {
        self.session.borrow().status()
    }

    pub fn result(&self) -> Option<Arc<AnalysisResult>> {
        self.session.borrow().result().cloned()
    }

    pub fn error(&self) -> Option<AnalysisError> {
        self.session.borrow().error().cloned()
    }

    pub fn user_message(&self) -> Option<&'static str> {
        self.session.borrow().user_message()
    }

    /// Receiver that observes every session transition.
    pub fn subscribe(&self) -> watch::Receiver<AnalysisSession> {
        self.session.subscribe()
    }

    async fn begin_run(&self) -> (u64, CancellationToken) {
        let mut in_flight = self.in_flight.lock().await;
        in_flight.last_run_id += 1;
        let run_id = in_flight.last_run_id;

        let cancel = CancellationToken::new();
        if let Some(previous) = in_flight.cancel.replace(cancel.clone()) {
            previous.cancel();
            tracing::debug!(
                target: "analysis.orchestrator",
                run_id = run_id,
                superseded_run_id = run_id - 1,
                "analysis_run_superseding"
            );
        }

        // Written while the lock is held so run ids reach the session in order.
        self.session.send_modify(|session| session.begin(run_id));
        (run_id, cancel)
    }

    async fn finish_run(
        &self,
        run_id: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> RunOutcome {
        {
            let mut in_flight = self.in_flight.lock().await;
            if in_flight.last_run_id == run_id {
                in_flight.cancel = None;
            }
        }

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                let applied = self
                    .session
                    .send_if_modified(|session| session.succeed(run_id, Arc::clone(&result)));
                if !applied {
                    tracing::info!(target: "analysis.orchestrator", "analysis_stale_response_discarded");
                    return RunOutcome::Superseded { run_id };
                }
                tracing::info!(
                    target: "analysis.orchestrator",
                    score = result.market_sentiment.score,
                    assets = result.asset_outlook.len(),
                    top_stocks = result.top_stocks.len(),
                    "analysis_run_succeeded"
                );
                RunOutcome::Succeeded { run_id }
            }
            Err(error) => {
                let applied = self
                    .session
                    .send_if_modified(|session| session.fail(run_id, error.clone()));
                if !applied {
                    tracing::info!(
                        target: "analysis.orchestrator",
                        error_kind = ?error.kind,
                        "analysis_stale_failure_discarded"
                    );
                    return RunOutcome::Superseded { run_id };
                }
                tracing::warn!(
                    target: "analysis.orchestrator",
                    error_kind = ?error.kind,
                    http_status = ?error.http_status,
                    error = %error,
                    "analysis_run_failed"
                );
                RunOutcome::Failed { run_id, error }
            }
        }
    }
}

/// Fails the session if `run()` is dropped by its caller before the outcome
/// is recorded, so a caller-side timeout never leaves it stuck in `Running`.
struct AbandonGuard<'a> {
    orchestrator: &'a AnalysisOrchestrator,
    run_id: u64,
    armed: bool,
}

impl<'a> AbandonGuard<'a> {
    fn new(orchestrator: &'a AnalysisOrchestrator, run_id: u64) -> Self {
        Self {
            orchestrator,
            run_id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let run_id = self.run_id;
        let applied = self.orchestrator.session.send_if_modified(|session| {
            session.abandon(run_id, network_error("analysis run was cancelled"))
        });

        // Drop cannot await; a contended lock only leaves a stale token that
        // the next `begin_run` cancels anyway.
        if let Ok(mut in_flight) = self.orchestrator.in_flight.try_lock()
            && in_flight.last_run_id == run_id
        {
            in_flight.cancel = None;
        }

        if applied {
            tracing::warn!(
                target: "analysis.orchestrator",
                run_id = run_id,
                "analysis_run_abandoned"
            );
        }
    }
}
