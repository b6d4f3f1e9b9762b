use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FeedError;
use crate::headline::RiskCategory;

/// Discrete risk level for a category or dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Qualitative band the composite index falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Stable,
    Watch,
    Alert,
}

impl RiskBand {
    /// Single source of the index-to-band mapping. Every consumer goes
    /// through here so a displayed band always agrees with its index.
    pub fn from_index(index_value: u32) -> Self {
        if index_value >= 70 {
            RiskBand::Alert
        } else if index_value >= 40 {
            RiskBand::Watch
        } else {
            RiskBand::Stable
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskBand::Stable => "STABLE",
            RiskBand::Watch => "WATCH",
            RiskBand::Alert => "ALERT",
        };
        write!(f, "{}", s)
    }
}

/// Stress scenario applied to the dimension weights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    #[default]
    BaseCase,
    HawkishFed,
    GeopoliticalEscalation,
}

impl Scenario {
    /// Scenarios in presentation order; the base case comes first so
    /// comparison tables read top-down from the unstressed figure.
    pub fn all() -> [Scenario; 3] {
        [
            Scenario::BaseCase,
            Scenario::HawkishFed,
            Scenario::GeopoliticalEscalation,
        ]
    }

    /// Multiplier applied to the FX dimension weight.
    pub fn fx_multiplier(&self) -> Decimal {
        match self {
            Scenario::BaseCase => Decimal::ONE,
            Scenario::HawkishFed => Decimal::ONE,
            Scenario::GeopoliticalEscalation => Decimal::new(14, 1),
        }
    }

    /// Multiplier applied to the interest-rate dimension weight.
    pub fn rate_multiplier(&self) -> Decimal {
        match self {
            Scenario::BaseCase => Decimal::ONE,
            Scenario::HawkishFed => Decimal::new(15, 1),
            Scenario::GeopoliticalEscalation => Decimal::new(11, 1),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scenario::BaseCase => "Base Case",
            Scenario::HawkishFed => "Hawkish Fed",
            Scenario::GeopoliticalEscalation => "Geopolitical Escalation",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Scenario {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basecase" | "base_case" | "base case" | "base" => Ok(Scenario::BaseCase),
            "hawkishfed" | "hawkish_fed" | "hawkish fed" => Ok(Scenario::HawkishFed),
            "geopoliticalescalation" | "geopolitical_escalation" | "geopolitical escalation" => {
                Ok(Scenario::GeopoliticalEscalation)
            }
            _ => Err(FeedError::UnknownScenario {
                value: s.to_string(),
            }),
        }
    }
}

/// Aggregated pressure for one headline category within a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: RiskCategory,
    /// Sum of decay weights across the category's headlines.
    pub raw_weight: Decimal,
    /// Raw weight after log saturation, so one noisy category cannot
    /// run away with the index.
    pub saturated_score: f64,
    pub level: RiskLevel,
}

/// Risk levels for the three dimensions the composite index is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionLevels {
    pub fx: RiskLevel,
    pub interest_rates: RiskLevel,
    pub liquidity: RiskLevel,
}

/// Composite risk index with its qualitative band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeIndex {
    pub index_value: u32,
    pub band: RiskBand,
}

impl CompositeIndex {
    pub fn new(index_value: u32) -> Self {
        Self {
            index_value,
            band: RiskBand::from_index(index_value),
        }
    }
}

impl fmt::Display for CompositeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index_value, self.band)
    }
}

/// A point-in-time observation of the composite index, as stored in
/// the history ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub recorded_at: DateTime<Utc>,
    pub index_value: u32,
    pub band: RiskBand,
}

impl RiskSnapshot {
    pub fn new(recorded_at: DateTime<Utc>, index_value: u32) -> Self {
        Self {
            recorded_at,
            index_value,
            band: RiskBand::from_index(index_value),
        }
    }
}
