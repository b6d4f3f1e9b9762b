use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mp_types::EarlyWarning;

/// Trigger thresholds for the early-warning gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarningThresholds {
    /// Composite index at or above this raises the level trigger.
    pub index_floor: u32,
    /// Long-window delta at or above this raises the momentum trigger.
    pub delta_floor: i64,
    /// Warnings are suppressed outright below this confidence.
    pub confidence_floor: Decimal,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            index_floor: 65,
            delta_floor: 8,
            confidence_floor: Decimal::new(6, 1),
        }
    }
}

/// Evaluates the three warning triggers, then applies the confidence
/// gate over the lot.
///
/// Trigger order is fixed: index level, then long-window delta, then
/// acceleration; reasons keep that order. Confidence under the floor
/// suppresses the warning and its reasons entirely, it does not
/// annotate them.
pub fn early_warning(
    index_value: u32,
    delta: Option<i64>,
    acceleration: Option<i64>,
    confidence: Decimal,
    thresholds: &WarningThresholds,
) -> EarlyWarning {
    let mut reasons = Vec::new();

    if index_value >= thresholds.index_floor {
        reasons.push(format!(
            "risk index {} at or above {}",
            index_value, thresholds.index_floor
        ));
    }
    if let Some(d) = delta {
        if d >= thresholds.delta_floor {
            reasons.push(format!(
                "index climbed {} points over the trailing window (threshold {})",
                d, thresholds.delta_floor
            ));
        }
    }
    if let Some(a) = acceleration {
        if a > 0 {
            reasons.push(format!(
                "momentum accelerating: short window leads by {} points",
                a
            ));
        }
    }

    if confidence < thresholds.confidence_floor {
        if !reasons.is_empty() {
            debug!(
                suppressed = reasons.len(),
                %confidence,
                "early warning gated by low confidence"
            );
        }
        return EarlyWarning::none();
    }

    EarlyWarning {
        triggered: !reasons.is_empty(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn thresholds() -> WarningThresholds {
        WarningThresholds::default()
    }

    #[test]
    fn test_quiet_readings_stay_silent() {
        let w = early_warning(40, Some(2), Some(-3), dec!(0.9), &thresholds());
        assert!(!w.triggered);
        assert!(w.reasons.is_empty());
    }

    #[test]
    fn test_index_trigger() {
        let w = early_warning(65, None, None, dec!(0.8), &thresholds());
        assert!(w.triggered);
        assert_eq!(w.reasons.len(), 1);
        assert!(w.reasons[0].contains("risk index 65"));
    }

    #[test]
    fn test_delta_trigger() {
        let w = early_warning(30, Some(8), None, dec!(0.8), &thresholds());
        assert!(w.triggered);
        assert!(w.reasons[0].contains("climbed 8 points"));
    }

    #[test]
    fn test_acceleration_needs_strictly_positive() {
        let flat = early_warning(30, Some(2), Some(0), dec!(0.8), &thresholds());
        assert!(!flat.triggered);

        let building = early_warning(30, Some(2), Some(1), dec!(0.8), &thresholds());
        assert!(building.triggered);
        assert!(building.reasons[0].contains("accelerating"));
    }

    #[test]
    fn test_absent_signals_never_trigger() {
        let w = early_warning(30, None, None, dec!(0.9), &thresholds());
        assert!(!w.triggered);
    }

    #[test]
    fn test_reasons_keep_trigger_order() {
        let w = early_warning(72, Some(11), Some(4), dec!(0.9), &thresholds());
        assert!(w.triggered);
        assert_eq!(w.reasons.len(), 3);
        assert!(w.reasons[0].contains("risk index"));
        assert!(w.reasons[1].contains("climbed"));
        assert!(w.reasons[2].contains("accelerating"));
    }

    #[test]
    fn test_low_confidence_suppresses_everything() {
        let w = early_warning(90, Some(20), Some(6), dec!(0.59), &thresholds());
        assert!(!w.triggered);
        assert!(w.reasons.is_empty());
    }

    #[test]
    fn test_confidence_floor_is_inclusive_pass() {
        let w = early_warning(90, None, None, dec!(0.6), &thresholds());
        assert!(w.triggered);
    }
}
