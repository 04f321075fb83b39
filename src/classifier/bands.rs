use serde::Serialize;

use crate::analysis::types::{RiskIndicators, SentimentLabel};

const BEARISH_BELOW: f64 = 35.0;
const BULLISH_FROM: f64 = 65.0;
const MODERATE_FROM: f64 = 40.0;
const HIGH_FROM: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeverityBand {
    Low,
    Moderate,
    High,
}

pub fn sentiment_label(score: f64) -> SentimentLabel {
    if score < BEARISH_BELOW {
        SentimentLabel::Bearish
    } else if score < BULLISH_FROM {
        SentimentLabel::Neutral
    } else {
        SentimentLabel::Bullish
    }
}

/// Shared by bubble risk, market fragility and downside probability.
pub fn severity_band(value: f64) -> SeverityBand {
    if value < MODERATE_FROM {
        SeverityBand::Low
    } else if value < HIGH_FROM {
        SeverityBand::Moderate
    } else {
        SeverityBand::High
    }
}

pub fn downside_probability(upside_probability: f64) -> f64 {
    100.0 - upside_probability
}

/// Needle angle for a half-circle gauge: -90 at score 0, +90 at score 100.
pub fn gauge_rotation_degrees(score: f64) -> f64 {
    score / 100.0 * 180.0 - 90.0
}

/// Label for a probability in [0, 1], e.g. recession risk.
pub fn probability_band(probability: f64) -> SeverityBand {
    if probability >= 0.7 {
        SeverityBand::High
    } else if probability >= 0.4 {
        SeverityBand::Moderate
    } else {
        SeverityBand::Low
    }
}

pub fn as_percent(probability: f64) -> u8 {
    (probability.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAsymmetry {
    pub upside: f64,
    pub downside: f64,
    pub downside_band: SeverityBand,
}

pub fn risk_asymmetry(indicators: &RiskIndicators) -> RiskAsymmetry {
    let downside = downside_probability(indicators.upside_probability);
    RiskAsymmetry {
        upside: indicators.upside_probability,
        downside,
        downside_band: severity_band(downside),
    }
}
