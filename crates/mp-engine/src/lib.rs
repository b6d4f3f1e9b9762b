//! Headline risk scoring engine for MacroPulse.
//!
//! Provides:
//! - Time-decay weighting of classified headlines
//! - Per-category aggregation with log saturation and level grading
//! - Scenario-weighted composite index with comparison tables
//! - Confidence scoring, per-headline severity, early-warning gate
//!
//! Every entry point takes the evaluation clock as a parameter; the
//! engine never reads wall time or performs I/O.

pub mod aggregate;
pub mod composite;
pub mod confidence;
pub mod decay;
pub mod evaluator;
pub mod labeler;
pub mod warning;

pub use aggregate::{aggregate_categories, risk_level, saturated_score, LevelThresholds};
pub use composite::{composite_index, contribution, dimension_levels, scenario_comparison};
pub use confidence::confidence_score;
pub use decay::decay_weight;
pub use evaluator::{EngineConfig, RiskEvaluator};
pub use labeler::score_headlines;
pub use warning::{early_warning, WarningThresholds};
