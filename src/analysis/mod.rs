pub mod adapters;
pub mod error;
pub mod orchestrator;
pub mod ports;
pub mod session;
pub mod testing;
pub mod types;
pub mod validate;

pub use error::{AnalysisError, AnalysisErrorKind};
pub use orchestrator::{AnalysisOrchestrator, RunOutcome};
pub use ports::ReasoningBoundary;
pub use session::{AnalysisSession, AnalysisStatus};
pub use types::{
    AnalysisRequest, AnalysisResult, AssetBias, AssetOutlook, CrowdSignals, Liquidity,
    MarketRegime, MarketSentiment, Outperformance, RiskIndicators, RiskRegime, SentimentLabel,
    TopStock, Volatility,
};
pub use validate::validate_result;
