use chrono::{DateTime, Duration, Utc};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;
use tracing::debug;

use mp_types::RiskSnapshot;

/// Append-only sequence of composite index snapshots.
///
/// Entries arrive in recording order, which callers keep aligned with
/// `recorded_at`. Nothing is rewritten or dropped, so any trend figure
/// can be reproduced from the raw sequence after the fact.
#[derive(Debug, Clone, Default)]
pub struct RiskLedger {
    entries: Vec<RiskSnapshot>,
}

impl RiskLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends unconditionally. Back-to-back identical snapshots are
    /// distinct observations, not duplicates to collapse.
    pub fn record(&mut self, snapshot: RiskSnapshot) {
        debug!(
            index = snapshot.index_value,
            band = %snapshot.band,
            "ledger append"
        );
        self.entries.push(snapshot);
    }

    /// Snapshots recorded on or after `now - window_minutes`, oldest
    /// first. The window start is inclusive.
    pub fn query(&self, window_minutes: i64, now: DateTime<Utc>) -> Vec<RiskSnapshot> {
        let cutoff = now - Duration::minutes(window_minutes);
        self.entries
            .iter()
            .filter(|s| s.recorded_at >= cutoff)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&RiskSnapshot> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[RiskSnapshot] {
        &self.entries
    }
}

/// Thread-safe handle over a [`RiskLedger`].
///
/// The monitor session is the single writer; dashboards and service
/// endpoints read concurrently through clones of this handle.
#[derive(Debug, Clone, Default)]
pub struct SharedRiskLedger {
    inner: Arc<RwLock<RiskLedger>>,
}

impl SharedRiskLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, snapshot: RiskSnapshot) {
        self.inner.write().record(snapshot);
    }

    pub fn query(&self, window_minutes: i64, now: DateTime<Utc>) -> Vec<RiskSnapshot> {
        self.inner.read().query(window_minutes, now)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn last(&self) -> Option<RiskSnapshot> {
        self.inner.read().last().cloned()
    }

    /// Read guard for callers that walk the ledger across several calls.
    pub fn read(&self) -> RwLockReadGuard<'_, RiskLedger> {
        self.inner.read()
    }
}
