use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mp_types::{CategoryScore, HeadlineRecord, RiskCategory, RiskLevel};

/// Saturated-score cutoffs for grading a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            high: 4.0,
            medium: 2.0,
        }
    }
}

/// Sums decay weights per category, saturates, and grades each one.
///
/// Categories with no headlines still get a row (raw weight zero,
/// level Low), so every report carries all four categories.
/// `weights` must be index-aligned with `batch`.
pub fn aggregate_categories(
    batch: &[HeadlineRecord],
    weights: &[Decimal],
    thresholds: &LevelThresholds,
) -> Vec<CategoryScore> {
    debug_assert_eq!(batch.len(), weights.len());

    RiskCategory::all()
        .iter()
        .map(|&category| {
            let raw_weight: Decimal = batch
                .iter()
                .zip(weights)
                .filter(|(h, _)| h.category == category)
                .map(|(_, w)| *w)
                .sum();
            let saturated_score = saturated_score(raw_weight);
            CategoryScore {
                category,
                raw_weight,
                saturated_score,
                level: risk_level(saturated_score, thresholds),
            }
        })
        .collect()
}

/// Log saturation of a raw category weight: ln(1 + raw).
///
/// Zero stays zero and growth flattens as the raw weight climbs, so a
/// burst of headlines in one category cannot linearly dominate the
/// index.
pub fn saturated_score(raw_weight: Decimal) -> f64 {
    raw_weight.to_f64().unwrap_or(0.0).ln_1p()
}

/// Grades a saturated score. Cutoffs are inclusive on the way up.
pub fn risk_level(saturated: f64, thresholds: &LevelThresholds) -> RiskLevel {
    if saturated >= thresholds.high {
        RiskLevel::High
    } else if saturated >= thresholds.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
