use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisErrorKind {
    /// The call never reached the service or the connection broke.
    Network,
    /// The service answered with a non-success response.
    Server,
    /// A response arrived but does not satisfy the result contract.
    Schema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub kind: AnalysisErrorKind,
    pub message: String,
    pub http_status: Option<u16>,
}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Text shown to end users. Detail stays in `message` and the logs.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            AnalysisErrorKind::Network => {
                "We couldn't reach the analysis service. Check your connection and try again."
            }
            AnalysisErrorKind::Server => {
                "The analysis service is unavailable right now. Please try again shortly."
            }
            AnalysisErrorKind::Schema => {
                "The analysis came back incomplete. Please run it again."
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "{} (status={})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for AnalysisError {}

pub fn network_error(message: impl Into<String>) -> AnalysisError {
    AnalysisError::new(AnalysisErrorKind::Network, message)
}

pub fn server_error(message: impl Into<String>) -> AnalysisError {
    AnalysisError::new(AnalysisErrorKind::Server, message)
}

pub fn schema_error(message: impl Into<String>) -> AnalysisError {
    AnalysisError::new(AnalysisErrorKind::Schema, message)
}
