use serde::Serialize;

use crate::{
    analysis::types::{AssetBias, Liquidity, RiskRegime, SentimentLabel, Volatility},
    classifier::bands::SeverityBand,
};

/// Colour family a value is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tone {
    Favorable,
    Caution,
    Adverse,
}

pub fn risk_regime_tone(risk: RiskRegime) -> Tone {
    match risk {
        RiskRegime::RiskOn => Tone::Favorable,
        RiskRegime::RiskOff => Tone::Adverse,
        RiskRegime::Transitional => Tone::Caution,
    }
}

pub fn liquidity_tone(liquidity: Liquidity) -> Tone {
    match liquidity {
        Liquidity::Easing => Tone::Favorable,
        Liquidity::Tightening => Tone::Adverse,
        Liquidity::Neutral => Tone::Caution,
    }
}

pub fn volatility_tone(volatility: Volatility) -> Tone {
    match volatility {
        Volatility::Elevated => Tone::Adverse,
        Volatility::Low | Volatility::Normal => Tone::Caution,
    }
}

pub fn bias_tone(bias: AssetBias) -> Tone {
    match bias {
        AssetBias::Positive => Tone::Favorable,
        AssetBias::Negative => Tone::Adverse,
        AssetBias::Neutral => Tone::Caution,
    }
}

pub fn severity_tone(band: SeverityBand) -> Tone {
    match band {
        SeverityBand::Low => Tone::Favorable,
        SeverityBand::Moderate => Tone::Caution,
        SeverityBand::High => Tone::Adverse,
    }
}

pub fn sentiment_tone(label: SentimentLabel) -> Tone {
    match label {
        SentimentLabel::Bullish => Tone::Favorable,
        SentimentLabel::Neutral => Tone::Caution,
        SentimentLabel::Bearish => Tone::Adverse,
    }
}
