// Evaluation pipeline - one ordered pass per call
// Turns a classified headline batch plus ledger state into a report

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mp_history::{MomentumCalculator, RiskLedger};
use mp_types::{EvaluationReport, HeadlineRecord, Scenario};

use crate::aggregate::{aggregate_categories, LevelThresholds};
use crate::composite::{composite_index, dimension_levels, scenario_comparison};
use crate::confidence::confidence_score;
use crate::decay::decay_weight;
use crate::labeler::score_headlines;
use crate::warning::{early_warning, WarningThresholds};

/// Tunable knobs for an evaluation pass. Defaults match the desk
/// settings the index was calibrated against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub levels: LevelThresholds,
    pub warning: WarningThresholds,
    pub momentum: MomentumCalculator,
}

/// Stateless risk evaluator.
///
/// One `evaluate` call is a single synchronous pass with no I/O and no
/// internal clock reads; `now` comes in as a parameter so identical
/// inputs always produce identical reports.
#[derive(Debug, Clone, Default)]
pub struct RiskEvaluator {
    config: EngineConfig,
}

impl RiskEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the full scoring pass over an already-classified batch.
    pub fn evaluate(
        &self,
        batch: &[HeadlineRecord],
        scenario: Scenario,
        ledger: &RiskLedger,
        now: DateTime<Utc>,
    ) -> EvaluationReport {
        debug!(
            batch_size = batch.len(),
            scenario = %scenario,
            "starting evaluation pass"
        );

        // 1. Per-item freshness weights
        let weights: Vec<Decimal> = batch
            .iter()
            .map(|h| decay_weight(h.published_at, now))
            .collect();

        // 2. Category aggregation and grading
        let category_scores = aggregate_categories(batch, &weights, &self.config.levels);

        // 3. Dimension levels, composite index, scenario table
        let dimensions = dimension_levels(&category_scores);
        let composite = composite_index(&dimensions, scenario);
        let scenario_table = scenario_comparison(&dimensions);

        // 4. Trend readout from the ledger
        let momentum = self.config.momentum.signal(ledger, now);

        // 5. Confidence and the per-headline overlay
        let confidence = confidence_score(batch.len(), &category_scores, &weights);
        let headlines = score_headlines(batch, &weights);

        // 6. Early-warning triggers, gated by confidence
        let warning = early_warning(
            composite.index_value,
            momentum.delta,
            momentum.acceleration,
            confidence.score,
            &self.config.warning,
        );

        info!(
            index = composite.index_value,
            band = %composite.band,
            confidence = %confidence.score,
            warning = warning.triggered,
            "evaluation complete"
        );

        EvaluationReport {
            evaluated_at: now,
            scenario,
            batch_size: batch.len(),
            composite,
            dimensions,
            category_scores,
            scenario_table,
            momentum,
            confidence,
            headlines,
            warning,
        }
    }
}
