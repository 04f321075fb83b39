use std::{collections::BTreeMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};

use crate::{
    catalog::SignalKey,
    selection::{Selection, Ticker},
};

/// Body of one reasoning call, built from a selection snapshot at run time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub events: Vec<SignalKey>,
    pub companies: Vec<Ticker>,
}

impl From<&Selection> for AnalysisRequest {
    fn from(selection: &Selection) -> Self {
        Self {
            events: selection.signals.iter().copied().collect(),
            companies: selection.companies.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskRegime {
    #[serde(rename = "Risk-On")]
    RiskOn,
    #[serde(rename = "Risk-Off")]
    RiskOff,
    Transitional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Liquidity {
    Easing,
    Neutral,
    Tightening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Normal,
    Elevated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetBias {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outperformance {
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub label: SentimentLabel,
    /// 0..=100
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRegime {
    pub risk: RiskRegime,
    pub liquidity: Liquidity,
    pub volatility: Volatility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrowdSignals {
    pub fed_policy_bias: String,
    /// 0..=1
    pub recession_probability: f64,
    pub rate_cut_bias: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetOutlook {
    pub bias: AssetBias,
    /// 0..=1
    pub confidence: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopStock {
    pub name: String,
    pub ticker: String,
    pub sector: String,
    pub reasoning: String,
    pub expected_outperformance: Outperformance,
}

/// All three are on a 0..=100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskIndicators {
    pub bubble_risk: f64,
    pub market_fragility: f64,
    pub upside_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub market_sentiment: MarketSentiment,
    pub market_regime: MarketRegime,
    pub crowd_signals: CrowdSignals,
    /// Keyed by ticker. A repeated ticker is rejected rather than overwritten.
    #[serde(deserialize_with = "unique_tickers")]
    pub asset_outlook: BTreeMap<Ticker, AssetOutlook>,
    pub top_stocks: Vec<TopStock>,
    pub risk_indicators: RiskIndicators,
}

fn unique_tickers<'de, D>(deserializer: D) -> Result<BTreeMap<Ticker, AssetOutlook>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueTickers;

    impl<'de> Visitor<'de> for UniqueTickers {
        type Value = BTreeMap<Ticker, AssetOutlook>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map from unique tickers to asset outlooks")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut outlooks = BTreeMap::new();
            while let Some(ticker) = access.next_key::<Ticker>()? {
                if outlooks.contains_key(&ticker) {
                    return Err(de::Error::custom(format!(
                        "duplicate asset_outlook ticker '{ticker}'"
                    )));
                }
                let outlook = access.next_value::<AssetOutlook>()?;
                outlooks.insert(ticker, outlook);
            }
            Ok(outlooks)
        }
    }

    deserializer.deserialize_map(UniqueTickers)
}
