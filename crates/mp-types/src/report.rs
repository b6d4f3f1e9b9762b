use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::headline::{HeadlineRecord, Severity};
use crate::scoring::{CategoryScore, CompositeIndex, DimensionLevels, Scenario};

/// A headline with the per-item figures derived during evaluation.
///
/// The underlying record stays untouched; this is the display overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHeadline {
    pub record: HeadlineRecord,
    /// Time-decay weight at the evaluation clock.
    pub decay_weight: Decimal,
    /// Decay weight scaled by the category impact factor.
    pub headline_impact: Decimal,
    pub severity: Severity,
    pub affected_assets: String,
}

/// One row of the scenario comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario: Scenario,
    pub index_value: u32,
    /// Index points relative to the base case.
    pub delta: i64,
    /// Delta as a percentage of the base-case index, one decimal place.
    /// Zero when the base case itself is zero.
    pub delta_percent: Decimal,
}

/// Trend readout computed from the history ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumSignal {
    /// Width of the trailing window the delta is measured over.
    pub window_minutes: i64,
    /// Index change across the window. Absent until the ledger holds at
    /// least two snapshots inside it.
    pub delta: Option<i64>,
    /// Short-window delta minus long-window delta; positive means the
    /// move is still building.
    pub acceleration: Option<i64>,
}

impl MomentumSignal {
    pub fn empty(window_minutes: i64) -> Self {
        Self {
            window_minutes,
            delta: None,
            acceleration: None,
        }
    }
}

/// How much to trust an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Confidence score in [0, 1] with its qualitative tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    pub score: Decimal,
    pub tier: ConfidenceTier,
}

impl ConfidenceScore {
    /// Tier thresholds: 0.75 and 0.5, both inclusive on the way up.
    pub fn from_score(score: Decimal) -> Self {
        let tier = if score >= Decimal::new(75, 2) {
            ConfidenceTier::High
        } else if score >= Decimal::new(5, 1) {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        };
        Self { score, tier }
    }
}

/// Early-warning gate outcome. Reasons keep trigger evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyWarning {
    pub triggered: bool,
    pub reasons: Vec<String>,
}

impl EarlyWarning {
    pub fn none() -> Self {
        Self {
            triggered: false,
            reasons: Vec::new(),
        }
    }
}

/// Everything a single evaluation produces, in one auditable bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub evaluated_at: DateTime<Utc>,
    pub scenario: Scenario,
    /// Number of headlines that entered the evaluation after any
    /// region filtering.
    pub batch_size: usize,
    pub composite: CompositeIndex,
    pub dimensions: DimensionLevels,
    pub category_scores: Vec<CategoryScore>,
    pub scenario_table: Vec<ScenarioComparison>,
    pub momentum: MomentumSignal,
    pub confidence: ConfidenceScore,
    pub headlines: Vec<ScoredHeadline>,
    pub warning: EarlyWarning,
}
