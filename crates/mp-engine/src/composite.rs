use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use mp_types::{
    CategoryScore, CompositeIndex, DimensionLevels, RiskCategory, RiskLevel, Scenario,
    ScenarioComparison,
};

// Base dimension weights before scenario stress. They sum to 100 so
// the unstressed index reads as a percentage.
const FX_BASE_WEIGHT: u32 = 40;
const RATES_BASE_WEIGHT: u32 = 40;
const LIQUIDITY_WEIGHT: u32 = 20;

const INDEX_CEILING: u32 = 100;

/// Risk levels for the three index dimensions. FX and rates come from
/// the category grades; liquidity pins to [`liquidity_level`].
pub fn dimension_levels(scores: &[CategoryScore]) -> DimensionLevels {
    let level_for = |category: RiskCategory| {
        scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.level)
            .unwrap_or(RiskLevel::Low)
    };
    DimensionLevels {
        fx: level_for(RiskCategory::Fx),
        interest_rates: level_for(RiskCategory::InterestRates),
        liquidity: liquidity_level(),
    }
}

/// Stub: no upstream feed carries a liquidity signal, so the dimension
/// is pinned at Low and contributes only its floor weight.
pub fn liquidity_level() -> RiskLevel {
    RiskLevel::Low
}

/// Contribution of one dimension: the full weight at High, 0.6 of it
/// at Medium, 0.2 at Low.
pub fn contribution(level: RiskLevel, weight: Decimal) -> Decimal {
    match level {
        RiskLevel::High => weight,
        RiskLevel::Medium => weight * Decimal::new(6, 1),
        RiskLevel::Low => weight * Decimal::new(2, 1),
    }
}

/// Composite index under one scenario: stress the dimension weights,
/// scale each by its level, sum, floor to an integer, clamp to the
/// ceiling.
///
/// Levels are graded once upstream and shared across scenarios, so
/// rows of a comparison table differ only in their weights.
pub fn composite_index(levels: &DimensionLevels, scenario: Scenario) -> CompositeIndex {
    let fx_weight = Decimal::from(FX_BASE_WEIGHT) * scenario.fx_multiplier();
    let rates_weight = Decimal::from(RATES_BASE_WEIGHT) * scenario.rate_multiplier();
    let liquidity_weight = Decimal::from(LIQUIDITY_WEIGHT);

    let total = contribution(levels.fx, fx_weight)
        + contribution(levels.interest_rates, rates_weight)
        + contribution(levels.liquidity, liquidity_weight);

    let index_value = total.floor().to_u32().unwrap_or(0).min(INDEX_CEILING);
    CompositeIndex::new(index_value)
}

/// Index under every scenario, with deltas against the base case.
///
/// The base-case row is always present and reads zero delta by
/// construction. Percent deltas round to one decimal place and fall
/// back to zero when the base case itself is zero.
pub fn scenario_comparison(levels: &DimensionLevels) -> Vec<ScenarioComparison> {
    let base = composite_index(levels, Scenario::BaseCase).index_value;

    Scenario::all()
        .iter()
        .map(|&scenario| {
            let index_value = composite_index(levels, scenario).index_value;
            let delta = index_value as i64 - base as i64;
            let delta_percent = if base == 0 {
                Decimal::ZERO
            } else {
                (Decimal::from(100) * Decimal::from(delta) / Decimal::from(base)).round_dp(1)
            };
            ScenarioComparison {
                scenario,
                index_value,
                delta,
                delta_percent,
            }
        })
        .collect()
}
