use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::RiskLedger;
use mp_types::{validation_error, MomentumSignal, MpResult};

/// Windowed trend math over the risk ledger.
///
/// The short window reacts first; the long window anchors the
/// comparison. Defaults follow the desk convention of 30 and 60
/// minute lookbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumCalculator {
    pub short_window_minutes: i64,
    pub long_window_minutes: i64,
}

impl Default for MomentumCalculator {
    fn default() -> Self {
        Self {
            short_window_minutes: 30,
            long_window_minutes: 60,
        }
    }
}

impl MomentumCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom windows. Both must be positive and the short window must
    /// sit strictly inside the long one.
    pub fn with_windows(short_window_minutes: i64, long_window_minutes: i64) -> MpResult<Self> {
        if short_window_minutes <= 0 || long_window_minutes <= 0 {
            return Err(validation_error!(
                "momentum windows must be positive, got {} and {} minutes",
                short_window_minutes,
                long_window_minutes
            ));
        }
        if short_window_minutes >= long_window_minutes {
            return Err(validation_error!(
                "short window ({} min) must be narrower than long window ({} min)",
                short_window_minutes,
                long_window_minutes
            ));
        }
        Ok(Self {
            short_window_minutes,
            long_window_minutes,
        })
    }

    /// Index change across `window_minutes`: last in-window snapshot
    /// minus first. Returns None until the ledger holds at least two
    /// entries and the window covers at least two of them, so a thin
    /// history reads as "no signal" rather than a flat zero.
    pub fn delta(
        &self,
        ledger: &RiskLedger,
        window_minutes: i64,
        now: DateTime<Utc>,
    ) -> Option<i64> {
        if ledger.len() < 2 {
            return None;
        }
        let entries = ledger.query(window_minutes, now);
        if entries.len() < 2 {
            return None;
        }
        let first = entries.first()?;
        let last = entries.last()?;
        Some(last.index_value as i64 - first.index_value as i64)
    }

    /// Short-window delta minus long-window delta. Positive means the
    /// recent move is outpacing the broader trend.
    pub fn acceleration(&self, ledger: &RiskLedger, now: DateTime<Utc>) -> Option<i64> {
        let short = self.delta(ledger, self.short_window_minutes, now)?;
        let long = self.delta(ledger, self.long_window_minutes, now)?;
        Some(short - long)
    }

    /// Momentum readout for a report: long-window delta plus acceleration.
    pub fn signal(&self, ledger: &RiskLedger, now: DateTime<Utc>) -> MomentumSignal {
        MomentumSignal {
            window_minutes: self.long_window_minutes,
            delta: self.delta(ledger, self.long_window_minutes, now),
            acceleration: self.acceleration(ledger, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use mp_types::RiskSnapshot;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap()
    }

    fn ledger_with(entries: &[(i64, u32)]) -> RiskLedger {
        let mut ledger = RiskLedger::new();
        for (offset_minutes, index) in entries {
            ledger.record(RiskSnapshot::new(
                base_time() + Duration::minutes(*offset_minutes),
                *index,
            ));
        }
        ledger
    }

    #[test]
    fn test_delta_over_window() {
        // Snapshots 50 minutes apart, both inside the hour window.
        let ledger = ledger_with(&[(0, 30), (50, 42)]);
        let calc = MomentumCalculator::default();
        let now = base_time() + Duration::minutes(50);

        assert_eq!(calc.delta(&ledger, 60, now), Some(12));
    }

    #[test]
    fn test_delta_requires_two_entries() {
        let ledger = ledger_with(&[(0, 30)]);
        let calc = MomentumCalculator::default();
        let now = base_time() + Duration::minutes(10);

        assert_eq!(calc.delta(&ledger, 60, now), None);
    }

    #[test]
    fn test_delta_requires_two_entries_inside_window() {
        // Two entries total, but only the newest falls inside 30 minutes.
        let ledger = ledger_with(&[(0, 30), (50, 42)]);
        let calc = MomentumCalculator::default();
        let now = base_time() + Duration::minutes(50);

        assert_eq!(calc.delta(&ledger, 30, now), None);
    }

    #[test]
    fn test_deceleration_reads_negative() {
        // Early climb, then a slower tail: +12 over 30m vs +20 over 60m.
        let ledger = ledger_with(&[(0, 30), (25, 38), (50, 50)]);
        let calc = MomentumCalculator::default();
        let now = base_time() + Duration::minutes(50);

        assert_eq!(calc.delta(&ledger, 30, now), Some(12));
        assert_eq!(calc.delta(&ledger, 60, now), Some(20));
        assert_eq!(calc.acceleration(&ledger, now), Some(-8));
    }

    #[test]
    fn test_acceleration_none_when_short_window_thin() {
        let ledger = ledger_with(&[(0, 30), (5, 36)]);
        let calc = MomentumCalculator::default();
        let now = base_time() + Duration::minutes(50);

        // Long window sees both entries, short window only one.
        assert_eq!(calc.delta(&ledger, 60, now), Some(6));
        assert_eq!(calc.acceleration(&ledger, now), None);
    }

    #[test]
    fn test_signal_bundles_long_window() {
        let ledger = ledger_with(&[(0, 40), (20, 44), (40, 52)]);
        let calc = MomentumCalculator::default();
        let now = base_time() + Duration::minutes(40);

        let signal = calc.signal(&ledger, now);
        assert_eq!(signal.window_minutes, 60);
        assert_eq!(signal.delta, Some(12));
        // Short window holds the 20m and 40m entries: +8 against +12.
        assert_eq!(signal.acceleration, Some(-4));
    }

    #[test]
    fn test_window_validation() {
        assert!(MomentumCalculator::with_windows(15, 45).is_ok());
        assert!(MomentumCalculator::with_windows(0, 60).is_err());
        assert!(MomentumCalculator::with_windows(60, 30).is_err());
        assert!(MomentumCalculator::with_windows(60, 60).is_err());
    }
}
