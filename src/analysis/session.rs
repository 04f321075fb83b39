use std::sync::Arc;

use serde::Serialize;

use crate::analysis::{error::AnalysisError, types::AnalysisResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// State of the most recent analysis run. Only the orchestrator writes it;
/// everything else gets clones or a watch receiver.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    run_id: u64,
    status: AnalysisStatus,
    result: Option<Arc<AnalysisResult>>,
    error: Option<AnalysisError>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self {
            run_id: 0,
            status: AnalysisStatus::Idle,
            result: None,
            error: None,
        }
    }
}

impl AnalysisSession {
    /// Sequence number of the run this state belongs to; 0 before any run.
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == AnalysisStatus::Running
    }

    /// Present only while `Succeeded`.
    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        self.result.as_ref()
    }

    /// Present only while `Failed`.
    pub fn error(&self) -> Option<&AnalysisError> {
        self.error.as_ref()
    }

    pub fn user_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(AnalysisError::user_message)
    }

    pub(crate) fn begin(&mut self, run_id: u64) {
        self.run_id = run_id;
        self.status = AnalysisStatus::Running;
        self.result = None;
        self.error = None;
    }

    /// Returns false, leaving state untouched, when `run_id` is stale.
    pub(crate) fn succeed(&mut self, run_id: u64, result: Arc<AnalysisResult>) -> bool {
        if run_id != self.run_id {
            return false;
        }
        self.status = AnalysisStatus::Succeeded;
        self.result = Some(result);
        self.error = None;
        true
    }

    /// Returns false, leaving state untouched, when `run_id` is stale.
    pub(crate) fn fail(&mut self, run_id: u64, error: AnalysisError) -> bool {
        if run_id != self.run_id {
            return false;
        }
        self.status = AnalysisStatus::Failed;
        self.result = None;
        self.error = Some(error);
        true
    }

    /// Fails a run whose caller went away. Only applies while that run is
    /// still the current one and has not resolved.
    pub(crate) fn abandon(&mut self, run_id: u64, error: AnalysisError) -> bool {
        if run_id != self.run_id || self.status != AnalysisStatus::Running {
            return false;
        }
        self.fail(run_id, error)
    }
}
