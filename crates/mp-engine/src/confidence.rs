use rust_decimal::Decimal;

use mp_types::{CategoryScore, ConfidenceScore};

/// Blends batch volume, category concentration, and recency into a
/// single trust score.
///
/// `volume = min(n / 10, 1)`, `concentration = max category raw weight
/// over the total`, `recency = share of decay weight carried by items
/// still at or above the 0.6 tier`. Blend is 0.4 / 0.4 / 0.2, rounded
/// to two decimal places. A dominant single-theme batch reads as
/// easier to trust than a noisy mix, so concentration boosts the
/// score. Zero denominators short-circuit to zero, so an empty batch
/// scores 0.00 instead of erroring.
pub fn confidence_score(
    batch_size: usize,
    category_scores: &[CategoryScore],
    weights: &[Decimal],
) -> ConfidenceScore {
    let volume = (Decimal::from(batch_size as u64) / Decimal::from(10)).min(Decimal::ONE);

    let total_raw: Decimal = category_scores.iter().map(|s| s.raw_weight).sum();
    let max_raw = category_scores
        .iter()
        .map(|s| s.raw_weight)
        .max()
        .unwrap_or(Decimal::ZERO);
    let concentration = if total_raw > Decimal::ZERO {
        max_raw / total_raw
    } else {
        Decimal::ZERO
    };

    let total_weight: Decimal = weights.iter().copied().sum();
    let recent_weight: Decimal = weights
        .iter()
        .filter(|w| **w >= Decimal::new(6, 1))
        .copied()
        .sum();
    let recency = if total_weight > Decimal::ZERO {
        recent_weight / total_weight
    } else {
        Decimal::ZERO
    };

    let score = (Decimal::new(4, 1) * volume
        + Decimal::new(4, 1) * concentration
        + Decimal::new(2, 1) * recency)
        .round_dp(2);

    ConfidenceScore::from_score(score)
}
