use serde::Serialize;

use crate::{
    analysis::types::{
        AnalysisResult, AssetBias, Liquidity, Outperformance, RiskRegime, SentimentLabel,
        TopStock, Volatility,
    },
    classifier::{
        bands::{
            RiskAsymmetry, SeverityBand, as_percent, gauge_rotation_degrees, probability_band,
            risk_asymmetry, sentiment_label, severity_band,
        },
        tones::{
            Tone, bias_tone, liquidity_tone, risk_regime_tone, sentiment_tone, severity_tone,
            volatility_tone,
        },
    },
};

/// Everything the presentation layer renders, derived from one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub sentiment: SentimentView,
    pub regime: RegimeView,
    pub crowd: CrowdView,
    pub assets: Vec<AssetView>,
    pub top_stocks: Vec<TopStockView>,
    pub risk: RiskView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentView {
    pub score: f64,
    /// Label as reported by the reasoning service.
    pub reported_label: SentimentLabel,
    /// Label recomputed from the score; drives the gauge colour.
    pub label: SentimentLabel,
    pub tone: Tone,
    pub gauge_rotation_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeView {
    pub risk: RiskRegime,
    pub risk_tone: Tone,
    pub liquidity: Liquidity,
    pub liquidity_tone: Tone,
    pub volatility: Volatility,
    pub volatility_tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdView {
    pub fed_policy_bias: String,
    pub rate_cut_bias: String,
    pub recession_percent: u8,
    pub recession_band: SeverityBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetView {
    pub ticker: String,
    pub bias: AssetBias,
    pub tone: Tone,
    pub confidence_percent: u8,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopStockView {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub expected_outperformance: Outperformance,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub bubble_risk: f64,
    pub bubble_band: SeverityBand,
    pub bubble_tone: Tone,
    pub market_fragility: f64,
    pub fragility_band: SeverityBand,
    pub fragility_tone: Tone,
    pub asymmetry: RiskAsymmetry,
}

impl DashboardView {
    pub fn derive(result: &AnalysisResult) -> Self {
        let score = result.market_sentiment.score;
        let label = sentiment_label(score);
        let regime = &result.market_regime;
        let indicators = &result.risk_indicators;
        let bubble_band = severity_band(indicators.bubble_risk);
        let fragility_band = severity_band(indicators.market_fragility);

        Self {
            sentiment: SentimentView {
                score,
                reported_label: result.market_sentiment.label,
                label,
                tone: sentiment_tone(label),
                gauge_rotation_degrees: gauge_rotation_degrees(score),
            },
            regime: RegimeView {
                risk: regime.risk,
                risk_tone: risk_regime_tone(regime.risk),
                liquidity: regime.liquidity,
                liquidity_tone: liquidity_tone(regime.liquidity),
                volatility: regime.volatility,
                volatility_tone: volatility_tone(regime.volatility),
            },
            crowd: CrowdView {
                fed_policy_bias: result.crowd_signals.fed_policy_bias.clone(),
                rate_cut_bias: result.crowd_signals.rate_cut_bias.clone(),
                recession_percent: as_percent(result.crowd_signals.recession_probability),
                recession_band: probability_band(result.crowd_signals.recession_probability),
            },
            assets: result
                .asset_outlook
                .iter()
                .map(|(ticker, outlook)| AssetView {
                    ticker: ticker.clone(),
                    bias: outlook.bias,
                    tone: bias_tone(outlook.bias),
                    confidence_percent: as_percent(outlook.confidence),
                    reasoning: outlook.reasoning.clone(),
                })
                .collect(),
            top_stocks: result.top_stocks.iter().map(TopStockView::from).collect(),
            risk: RiskView {
                bubble_risk: indicators.bubble_risk,
                bubble_band,
                bubble_tone: severity_tone(bubble_band),
                market_fragility: indicators.market_fragility,
                fragility_band,
                fragility_tone: severity_tone(fragility_band),
                asymmetry: risk_asymmetry(indicators),
            },
        }
    }
}

impl From<&TopStock> for TopStockView {
    fn from(stock: &TopStock) -> Self {
        Self {
            ticker: stock.ticker.clone(),
            name: stock.name.clone(),
            sector: stock.sector.clone(),
            expected_outperformance: stock.expected_outperformance,
            reasoning: stock.reasoning.clone(),
        }
    }
}
