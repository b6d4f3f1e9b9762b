//! Desk monitoring sessions: scenario-aware evaluation with alert emission.
//!
//! A [`MonitorSession`] owns one history ledger, applies the desk's
//! region focus to incoming batches, runs the scoring engine, and emits
//! [`RiskAlert`]s via a channel when the early-warning gate trips.

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mp_engine::{EngineConfig, RiskEvaluator};
use mp_history::SharedRiskLedger;
use mp_types::{
    EvaluationReport, HeadlineRecord, MpResult, Region, RiskBand, RiskSnapshot, Scenario,
};

use crate::alerts::RiskAlert;

/// Configuration for a monitoring session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub scenario: Scenario,
    /// Non-Global focus keeps headlines tagged with that region or
    /// Global; wire items without a region cue apply everywhere.
    pub region_focus: Region,
    pub engine: EngineConfig,
}

/// Point-in-time view of a session for the status display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub scenario: Scenario,
    pub region_focus: Region,
    pub ledger_len: usize,
    pub last_batch_size: Option<usize>,
    pub last_index: Option<u32>,
    pub last_band: Option<RiskBand>,
    pub last_evaluated_at: Option<DateTime<Utc>>,
}

/// One desk monitoring session.
///
/// Call [`MonitorSession::evaluate`] whenever a fresh batch arrives, then
/// [`MonitorSession::record`] to append the result to the trend ledger.
/// Alerts are emitted on the channel supplied at construction time.
pub struct MonitorSession {
    config: SessionConfig,
    evaluator: RiskEvaluator,
    ledger: SharedRiskLedger,
    alert_tx: Option<Sender<RiskAlert>>,
    last_report: Option<EvaluationReport>,
}

impl MonitorSession {
    /// Create a session that only logs its warnings.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            evaluator: RiskEvaluator::with_config(config.engine),
            config,
            ledger: SharedRiskLedger::new(),
            alert_tx: None,
            last_report: None,
        }
    }

    /// Create a session that also emits [`RiskAlert`]s on `alert_tx`.
    pub fn with_alert_channel(config: SessionConfig, alert_tx: Sender<RiskAlert>) -> Self {
        Self {
            alert_tx: Some(alert_tx),
            ..Self::new(config)
        }
    }

    /// Run one evaluation pass over `batch` under the session scenario.
    ///
    /// The region focus is applied first, so `batch_size` in the report
    /// counts only the headlines the desk is actually watching. Reads
    /// the ledger for momentum but never writes it; recording is a
    /// separate, explicit action.
    pub fn evaluate(&mut self, batch: &[HeadlineRecord], now: DateTime<Utc>) -> EvaluationReport {
        let scoped = self.scope_to_region(batch);
        let report = {
            let ledger = self.ledger.read();
            self.evaluator
                .evaluate(&scoped, self.config.scenario, &ledger, now)
        };

        if report.warning.triggered {
            self.emit(RiskAlert::new(
                report.evaluated_at,
                report.composite.index_value,
                report.composite.band,
                report.warning.reasons.clone(),
                format!("Early warning at index {}", report.composite),
            ));
        }

        self.last_report = Some(report.clone());
        report
    }

    /// Append the most recent evaluation to the trend ledger.
    ///
    /// Kept separate from [`MonitorSession::evaluate`] so exploratory
    /// what-if passes do not pollute the momentum history. Errors when
    /// nothing has been evaluated yet.
    pub fn record(&self, now: DateTime<Utc>) -> MpResult<RiskSnapshot> {
        let report = self.last_report.as_ref().ok_or_else(|| {
            mp_types::validation_error!("no evaluation to record; run evaluate first")
        })?;

        let snapshot = RiskSnapshot::new(now, report.composite.index_value);
        self.ledger.record(snapshot.clone());
        info!(
            index = snapshot.index_value,
            band = %snapshot.band,
            ledger_len = self.ledger.len(),
            "index snapshot recorded"
        );
        Ok(snapshot)
    }

    /// Switch the stress scenario for subsequent evaluations.
    pub fn set_scenario(&mut self, scenario: Scenario) {
        info!(scenario = %scenario, "scenario changed");
        self.config.scenario = scenario;
    }

    /// Narrow or widen the region focus for subsequent evaluations.
    pub fn set_region_focus(&mut self, region: Region) {
        info!(region = %region, "region focus changed");
        self.config.region_focus = region;
    }

    /// Current session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Most recent evaluation, if any.
    pub fn last_report(&self) -> Option<&EvaluationReport> {
        self.last_report.as_ref()
    }

    /// Cloneable handle on the session ledger for concurrent readers.
    pub fn ledger(&self) -> SharedRiskLedger {
        self.ledger.clone()
    }

    /// Session state for the status display.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            scenario: self.config.scenario,
            region_focus: self.config.region_focus,
            ledger_len: self.ledger.len(),
            last_batch_size: self.last_report.as_ref().map(|r| r.batch_size),
            last_index: self.last_report.as_ref().map(|r| r.composite.index_value),
            last_band: self.last_report.as_ref().map(|r| r.composite.band),
            last_evaluated_at: self.last_report.as_ref().map(|r| r.evaluated_at),
        }
    }

    // ---- internal helpers ----

    fn scope_to_region(&self, batch: &[HeadlineRecord]) -> Vec<HeadlineRecord> {
        let focus = self.config.region_focus;
        if focus.is_global() {
            return batch.to_vec();
        }
        batch
            .iter()
            .filter(|h| h.region == focus || h.region.is_global())
            .cloned()
            .collect()
    }

    fn emit(&self, alert: RiskAlert) {
        warn!(%alert.message, "EARLY WARNING");
        // Best-effort send; if receiver is dropped we just log.
        if let Some(tx) = &self.alert_tx {
            let _ = tx.try_send(alert);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use crossbeam_channel::unbounded;
    use mp_types::{RiskCategory, RiskLevel};

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap()
    }

    fn batch_at(
        category: RiskCategory,
        region: Region,
        count: usize,
        published_at: DateTime<Utc>,
    ) -> Vec<HeadlineRecord> {
        (0..count)
            .map(|i| {
                HeadlineRecord::new(&format!("headline {}", i), category, published_at, "test")
                    .with_region(region)
            })
            .collect()
    }

    fn fresh(category: RiskCategory, count: usize) -> Vec<HeadlineRecord> {
        batch_at(category, Region::Global, count, clock())
    }

    #[test]
    fn evaluate_stores_report_for_status() {
        let mut session = MonitorSession::new(SessionConfig::default());
        assert!(session.last_report().is_none());
        assert_eq!(session.status().last_index, None);

        let report = session.evaluate(&fresh(RiskCategory::Fx, 5), clock());
        assert_eq!(report.composite.index_value, 20);

        let status = session.status();
        assert_eq!(status.last_batch_size, Some(5));
        assert_eq!(status.last_index, Some(20));
        assert_eq!(status.last_band, Some(RiskBand::Stable));
        assert_eq!(status.last_evaluated_at, Some(clock()));
        // Evaluation alone never writes the ledger.
        assert_eq!(status.ledger_len, 0);
    }

    #[test]
    fn record_requires_prior_evaluation() {
        let session = MonitorSession::new(SessionConfig::default());
        assert!(session.record(clock()).is_err());
    }

    #[test]
    fn record_appends_to_ledger() {
        let mut session = MonitorSession::new(SessionConfig::default());
        session.evaluate(&fresh(RiskCategory::Fx, 5), clock());

        let snapshot = session.record(clock()).unwrap();
        assert_eq!(snapshot.index_value, 20);
        assert_eq!(snapshot.band, RiskBand::Stable);
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.status().ledger_len, 1);
    }

    #[test]
    fn momentum_builds_across_recorded_passes() {
        let mut session = MonitorSession::new(SessionConfig::default());

        session.evaluate(&fresh(RiskCategory::Fx, 5), clock());
        session.record(clock()).unwrap();

        // Twenty-five minutes later the tape heats up to index 52.
        let later = clock() + Duration::minutes(25);
        let mut hot = batch_at(RiskCategory::Fx, Region::Global, 7, later);
        hot.extend(batch_at(RiskCategory::InterestRates, Region::Global, 7, later));
        let report = session.evaluate(&hot, later);
        assert_eq!(report.composite.index_value, 52);
        // Only one ledger entry so far, so no delta yet.
        assert!(report.momentum.delta.is_none());
        session.record(later).unwrap();

        let report = session.evaluate(&[], clock() + Duration::minutes(29));
        assert_eq!(report.momentum.delta, Some(32));
        assert_eq!(report.momentum.acceleration, Some(0));
    }

    #[test]
    fn region_focus_scopes_the_batch() {
        let config = SessionConfig {
            region_focus: Region::UnitedStates,
            ..Default::default()
        };
        let mut session = MonitorSession::new(config);

        let mut batch = batch_at(RiskCategory::InterestRates, Region::UnitedStates, 7, clock());
        batch.extend(batch_at(RiskCategory::Fx, Region::Europe, 54, clock()));
        batch.extend(batch_at(RiskCategory::Geopolitics, Region::Global, 2, clock()));

        // European FX headlines drop out; US and Global stay.
        let scoped = session.evaluate(&batch, clock());
        assert_eq!(scoped.batch_size, 9);
        assert_eq!(scoped.dimensions.fx, RiskLevel::Low);
        assert_eq!(scoped.dimensions.interest_rates, RiskLevel::Medium);
        assert_eq!(scoped.composite.index_value, 36);

        session.set_region_focus(Region::Global);
        let global = session.evaluate(&batch, clock());
        assert_eq!(global.batch_size, 63);
        assert_eq!(global.dimensions.fx, RiskLevel::High);
        assert_eq!(global.composite.index_value, 68);
    }

    #[test]
    fn warning_emits_alert_on_channel() {
        let (tx, rx) = unbounded();
        let mut session = MonitorSession::with_alert_channel(SessionConfig::default(), tx);

        let mut batch = fresh(RiskCategory::Fx, 54);
        batch.extend(fresh(RiskCategory::InterestRates, 54));
        let report = session.evaluate(&batch, clock());
        assert!(report.warning.triggered);

        let alert = rx.try_recv().expect("expected early-warning alert");
        assert_eq!(alert.index_value, 84);
        assert_eq!(alert.band, RiskBand::Alert);
        assert_eq!(alert.reasons, report.warning.reasons);
        assert_eq!(alert.timestamp, clock());
        assert!(alert.message.contains("84"));
        assert!(!alert.acknowledged);
    }

    #[test]
    fn quiet_evaluation_stays_silent() {
        let (tx, rx) = unbounded();
        let mut session = MonitorSession::with_alert_channel(SessionConfig::default(), tx);

        session.evaluate(&fresh(RiskCategory::Fx, 5), clock());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_does_not_break_evaluation() {
        let (tx, rx) = unbounded();
        drop(rx);
        let mut session = MonitorSession::with_alert_channel(SessionConfig::default(), tx);

        let mut batch = fresh(RiskCategory::Fx, 54);
        batch.extend(fresh(RiskCategory::InterestRates, 54));
        let report = session.evaluate(&batch, clock());
        assert!(report.warning.triggered);
    }

    #[test]
    fn set_scenario_applies_to_next_pass() {
        let mut session = MonitorSession::new(SessionConfig::default());
        let batch = fresh(RiskCategory::InterestRates, 54);

        let base = session.evaluate(&batch, clock());
        assert_eq!(base.composite.index_value, 52);
        assert_eq!(base.composite.band, RiskBand::Watch);

        session.set_scenario(Scenario::HawkishFed);
        let stressed = session.evaluate(&batch, clock());
        assert_eq!(stressed.composite.index_value, 72);
        assert_eq!(stressed.composite.band, RiskBand::Alert);
        assert_eq!(session.status().scenario, Scenario::HawkishFed);
    }
}
