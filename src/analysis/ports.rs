use async_trait::async_trait;

use crate::analysis::{
    error::AnalysisError,
    types::{AnalysisRequest, AnalysisResult},
};

/// The external reasoning service. Implementations may fail, stall or return
/// malformed data; callers validate whatever comes back.
#[async_trait]
pub trait ReasoningBoundary: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
