use std::{collections::BTreeMap, future::Future, pin::Pin, sync::Arc};

use async_trait::async_trait;

use crate::analysis::{
    error::AnalysisError,
    ports::ReasoningBoundary,
    types::{
        AnalysisRequest, AnalysisResult, AssetBias, AssetOutlook, CrowdSignals, Liquidity,
        MarketRegime, MarketSentiment, Outperformance, RiskIndicators, RiskRegime,
        SentimentLabel, TopStock, Volatility,
    },
};

type AnalyzeFuture = Pin<Box<dyn Future<Output = Result<AnalysisResult, AnalysisError>> + Send>>;

pub type AnalyzeHook = Arc<dyn Fn(AnalysisRequest) -> AnalyzeFuture + Send + Sync>;

pub fn boxed<T>(
    future: impl Future<Output = T> + Send + 'static,
) -> Pin<Box<dyn Future<Output = T> + Send>>
where
    T: Send + 'static,
{
    Box::pin(future)
}

/// Reasoning boundary driven by a closure, for exercising the orchestrator
/// without a network.
#[derive(Clone)]
pub struct HookReasoningBoundary {
    hook: AnalyzeHook,
}

impl HookReasoningBoundary {
    pub fn new(hook: AnalyzeHook) -> Self {
        Self { hook }
    }

    pub fn returning(outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        Self::new(Arc::new(move |_request| {
            let outcome = outcome.clone();
            boxed(async move { outcome })
        }))
    }
}

#[async_trait]
impl ReasoningBoundary for HookReasoningBoundary {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        (self.hook)(request).await
    }
}

/// A well-formed result with the given sentiment score.
pub fn sample_result(score: f64) -> AnalysisResult {
    let mut asset_outlook = BTreeMap::new();
    asset_outlook.insert(
        "NVDA".to_string(),
        AssetOutlook {
            bias: AssetBias::Positive,
            confidence: 0.62,
            reasoning: "Strong price target clustering with low dispersion".to_string(),
        },
    );

    AnalysisResult {
        market_sentiment: MarketSentiment {
            label: SentimentLabel::Bullish,
            score,
        },
        market_regime: MarketRegime {
            risk: RiskRegime::RiskOn,
            liquidity: Liquidity::Easing,
            volatility: Volatility::Normal,
        },
        crowd_signals: CrowdSignals {
            fed_policy_bias: "Dovish".to_string(),
            recession_probability: 0.28,
            rate_cut_bias: "Moderate".to_string(),
        },
        asset_outlook,
        top_stocks: vec![TopStock {
            name: "NVIDIA".to_string(),
            ticker: "NVDA".to_string(),
            sector: "Technology".to_string(),
            reasoning: "Growth leadership in a risk-on regime".to_string(),
            expected_outperformance: Outperformance::High,
        }],
        risk_indicators: RiskIndicators {
            bubble_risk: 55.0,
            market_fragility: 35.0,
            upside_probability: 64.0,
        },
    }
}

/// Wire form of `sample_result`, as the reasoning service sends it.
pub fn sample_result_json(score: f64) -> serde_json::Value {
    serde_json::json!({
        "market_sentiment": {"label": "Bullish", "score": score},
        "market_regime": {"risk": "Risk-On", "liquidity": "Easing", "volatility": "Normal"},
        "crowd_signals": {
            "fed_policy_bias": "Dovish",
            "recession_probability": 0.28,
            "rate_cut_bias": "Moderate"
        },
        "asset_outlook": {
            "NVDA": {
                "bias": "Positive",
                "confidence": 0.62,
                "reasoning": "Strong price target clustering with low dispersion"
            }
        },
        "top_stocks": [
            {
                "name": "NVIDIA",
                "ticker": "NVDA",
                "sector": "Technology",
                "reasoning": "Growth leadership in a risk-on regime",
                "expected_outperformance": "High"
            }
        ],
        "risk_indicators": {
            "bubble_risk": 55,
            "market_fragility": 35,
            "upside_probability": 64
        }
    })
}
