use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FeedError;

/// Macro risk categories a headline can be classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Fx,
    InterestRates,
    Geopolitics,
    Other,
}

impl RiskCategory {
    pub fn all() -> [RiskCategory; 4] {
        [
            RiskCategory::Fx,
            RiskCategory::InterestRates,
            RiskCategory::Geopolitics,
            RiskCategory::Other,
        ]
    }

    /// Category impact factor applied to a headline's decay weight
    /// when grading its standalone severity.
    pub fn impact_factor(&self) -> Decimal {
        match self {
            RiskCategory::Fx => Decimal::new(12, 1),
            RiskCategory::InterestRates => Decimal::new(13, 1),
            RiskCategory::Geopolitics => Decimal::new(14, 1),
            RiskCategory::Other => Decimal::new(6, 1),
        }
    }

    /// Asset groups a desk watches when this category heats up.
    pub fn affected_assets(&self) -> &'static str {
        match self {
            RiskCategory::Fx => "G10 currency pairs, EM currencies",
            RiskCategory::InterestRates => "Sovereign bonds, swap spreads",
            RiskCategory::Geopolitics => "Energy futures, gold, defense equities",
            RiskCategory::Other => "Broad market indices",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskCategory::Fx => "FX",
            RiskCategory::InterestRates => "Interest Rates",
            RiskCategory::Geopolitics => "Geopolitics",
            RiskCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RiskCategory {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fx" | "currency" => Ok(RiskCategory::Fx),
            "interestrates" | "interest_rates" | "interest rates" | "rates" => {
                Ok(RiskCategory::InterestRates)
            }
            "geopolitics" | "geopolitical" => Ok(RiskCategory::Geopolitics),
            "other" => Ok(RiskCategory::Other),
            _ => Err(FeedError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

/// Geographic focus a headline is tagged with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[default]
    Global,
    UnitedStates,
    Europe,
    Asia,
}

impl Region {
    pub fn all() -> [Region; 4] {
        [
            Region::Global,
            Region::UnitedStates,
            Region::Europe,
            Region::Asia,
        ]
    }

    /// Global headlines are visible under every region focus.
    pub fn is_global(&self) -> bool {
        matches!(self, Region::Global)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::Global => "Global",
            Region::UnitedStates => "United States",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Region {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Region::Global),
            "unitedstates" | "united states" | "united_states" | "us" | "u.s." => {
                Ok(Region::UnitedStates)
            }
            "europe" | "eu" => Ok(Region::Europe),
            "asia" => Ok(Region::Asia),
            _ => Err(FeedError::UnknownRegion {
                value: s.to_string(),
            }),
        }
    }
}

/// A classified news headline as it enters the scoring pipeline.
///
/// Records are immutable once ingested; derived values (decay weight,
/// severity) live on [`crate::report::ScoredHeadline`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineRecord {
    pub text: String,
    pub category: RiskCategory,
    pub region: Region,
    pub published_at: DateTime<Utc>,
    pub source: String,
}

impl HeadlineRecord {
    pub fn new(
        text: &str,
        category: RiskCategory,
        published_at: DateTime<Utc>,
        source: &str,
    ) -> Self {
        Self {
            text: text.to_string(),
            category,
            region: Region::Global,
            published_at,
            source: source.to_string(),
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Age of the headline relative to an evaluation clock. Future
    /// publication stamps yield a negative duration.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.published_at
    }
}

/// Standalone severity grade for a single headline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        };
        write!(f, "{}", s)
    }
}
