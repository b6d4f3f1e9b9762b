use rust_decimal::Decimal;

use mp_types::{HeadlineRecord, ScoredHeadline, Severity};

/// Attaches per-headline severity and attribution for display.
///
/// `headline_impact = decay_weight × category impact factor`, graded
/// HIGH at 1.0 and MEDIUM at 0.5, both inclusive. Purely a ranking
/// overlay; nothing here feeds back into the composite index.
pub fn score_headlines(batch: &[HeadlineRecord], weights: &[Decimal]) -> Vec<ScoredHeadline> {
    debug_assert_eq!(batch.len(), weights.len());

    batch
        .iter()
        .zip(weights)
        .map(|(record, &decay_weight)| {
            let headline_impact = decay_weight * record.category.impact_factor();
            ScoredHeadline {
                record: record.clone(),
                decay_weight,
                headline_impact,
                severity: severity_for(headline_impact),
                affected_assets: record.category.affected_assets().to_string(),
            }
        })
        .collect()
}

fn severity_for(headline_impact: Decimal) -> Severity {
    if headline_impact >= Decimal::ONE {
        Severity::High
    } else if headline_impact >= Decimal::new(5, 1) {
        Severity::Medium
    } else {
        Severity::Low
    }
}
