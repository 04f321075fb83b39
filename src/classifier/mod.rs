//! Deterministic mapping from validated numbers to display bands and tones.

pub mod bands;
pub mod tones;
pub mod view;

pub use bands::{
    RiskAsymmetry, SeverityBand, as_percent, downside_probability, gauge_rotation_degrees,
    probability_band, risk_asymmetry, sentiment_label, severity_band,
};
pub use tones::{
    Tone, bias_tone, liquidity_tone, risk_regime_tone, sentiment_tone, severity_tone,
    volatility_tone,
};
pub use view::DashboardView;
