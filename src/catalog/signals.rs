use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::selection::error::{SelectionError, invalid_selection_key};

/// Identifier of a selectable macro signal. Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKey {
    #[serde(rename = "fed_rate_cuts_2026")]
    FedRateCuts2026,
    #[serde(rename = "us_recession_2026")]
    UsRecession2026,
    #[serde(rename = "inflation_2026")]
    Inflation2026,
    TreasuryYieldHigh,
    TreasuryYieldLow,
    FedDecisionMarch,
    #[serde(rename = "ai_frontiermath_90")]
    AiFrontiermath90,
    MicrostrategyBtcSale,
    #[serde(rename = "nvidia_february_2026")]
    NvidiaFebruary2026,
}

impl SignalKey {
    pub const ALL: [SignalKey; 9] = [
        SignalKey::FedRateCuts2026,
        SignalKey::UsRecession2026,
        SignalKey::Inflation2026,
        SignalKey::TreasuryYieldHigh,
        SignalKey::TreasuryYieldLow,
        SignalKey::FedDecisionMarch,
        SignalKey::AiFrontiermath90,
        SignalKey::MicrostrategyBtcSale,
        SignalKey::NvidiaFebruary2026,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKey::FedRateCuts2026 => "fed_rate_cuts_2026",
            SignalKey::UsRecession2026 => "us_recession_2026",
            SignalKey::Inflation2026 => "inflation_2026",
            SignalKey::TreasuryYieldHigh => "treasury_yield_high",
            SignalKey::TreasuryYieldLow => "treasury_yield_low",
            SignalKey::FedDecisionMarch => "fed_decision_march",
            SignalKey::AiFrontiermath90 => "ai_frontiermath_90",
            SignalKey::MicrostrategyBtcSale => "microstrategy_btc_sale",
            SignalKey::NvidiaFebruary2026 => "nvidia_february_2026",
        }
    }
}

impl fmt::Display for SignalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKey {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        SignalKey::ALL
            .into_iter()
            .find(|key| key.as_str() == raw)
            .ok_or_else(|| invalid_selection_key(format!("unknown signal key '{raw}'")))
    }
}

/// Grouping used by the selection screen. Declaration order is the order in
/// which each category first appears in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalCategory {
    #[serde(rename = "Monetary Policy")]
    MonetaryPolicy,
    #[serde(rename = "Growth & Recession")]
    GrowthAndRecession,
    #[serde(rename = "Inflation & Liquidity")]
    InflationAndLiquidity,
    #[serde(rename = "Risk Appetite")]
    RiskAppetite,
    #[serde(rename = "Technology")]
    Technology,
}

impl SignalCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SignalCategory::MonetaryPolicy => "Monetary Policy",
            SignalCategory::GrowthAndRecession => "Growth & Recession",
            SignalCategory::InflationAndLiquidity => "Inflation & Liquidity",
            SignalCategory::RiskAppetite => "Risk Appetite",
            SignalCategory::Technology => "Technology",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub key: SignalKey,
    pub label: &'static str,
    pub description: &'static str,
    pub category: SignalCategory,
}

static SIGNALS: [Signal; 9] = [
    Signal {
        key: SignalKey::FedRateCuts2026,
        label: "Fed rate cuts in 2026",
        description: "Market-implied expectations for monetary easing",
        category: SignalCategory::MonetaryPolicy,
    },
    Signal {
        key: SignalKey::UsRecession2026,
        label: "US recession probability",
        description: "Probability of economic contraction by 2026",
        category: SignalCategory::GrowthAndRecession,
    },
    Signal {
        key: SignalKey::Inflation2026,
        label: "Inflation outlook 2026",
        description: "Long-term inflation expectations",
        category: SignalCategory::InflationAndLiquidity,
    },
    Signal {
        key: SignalKey::TreasuryYieldHigh,
        label: "Treasury yield upper bound",
        description: "Market expectations for long-term yields",
        category: SignalCategory::InflationAndLiquidity,
    },
    Signal {
        key: SignalKey::TreasuryYieldLow,
        label: "Treasury yield lower bound",
        description: "Downside yield expectations",
        category: SignalCategory::InflationAndLiquidity,
    },
    Signal {
        key: SignalKey::FedDecisionMarch,
        label: "Fed decision in March",
        description: "Near-term policy action expectations",
        category: SignalCategory::MonetaryPolicy,
    },
    Signal {
        key: SignalKey::AiFrontiermath90,
        label: "AI frontier progress",
        description: "Risk appetite for frontier technology",
        category: SignalCategory::RiskAppetite,
    },
    Signal {
        key: SignalKey::MicrostrategyBtcSale,
        label: "Crypto institutional stress",
        description: "Liquidity stress signals in crypto markets",
        category: SignalCategory::RiskAppetite,
    },
    Signal {
        key: SignalKey::NvidiaFebruary2026,
        label: "NVIDIA price targets",
        description: "Market-implied upside expectations",
        category: SignalCategory::Technology,
    },
];

/// Compiled-in signal taxonomy. Stateless; every method is a pure read.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalCatalog;

impl SignalCatalog {
    pub fn list(&self) -> &'static [Signal] {
        &SIGNALS
    }

    pub fn get(&self, key: SignalKey) -> &'static Signal {
        // SIGNALS is laid out in SignalKey declaration order.
        &SIGNALS[key as usize]
    }

    pub fn parse_key(&self, raw: &str) -> Result<SignalKey, SelectionError> {
        raw.parse()
    }

    pub fn contains(&self, raw: &str) -> bool {
        SIGNALS.iter().any(|signal| signal.key.as_str() == raw)
    }

    pub fn group_by_category(&self) -> BTreeMap<SignalCategory, Vec<&'static Signal>> {
        let mut groups: BTreeMap<SignalCategory, Vec<&'static Signal>> = BTreeMap::new();
        for signal in SIGNALS.iter() {
            groups.entry(signal.category).or_default().push(signal);
        }
        groups
    }
}
