//! Alert payloads emitted when an evaluation trips the early-warning gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mp_types::RiskBand;

/// A single early-warning alert emitted by a monitoring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub id: Uuid,
    /// Clock of the evaluation pass that raised the alert.
    pub timestamp: DateTime<Utc>,
    pub index_value: u32,
    pub band: RiskBand,
    /// Trigger descriptions, in the order the triggers were checked.
    pub reasons: Vec<String>,
    pub message: String,
    /// Whether the alert has been acknowledged by a human operator.
    pub acknowledged: bool,
}

impl RiskAlert {
    /// Create a new alert.
    pub fn new(
        timestamp: DateTime<Utc>,
        index_value: u32,
        band: RiskBand,
        reasons: Vec<String>,
        message: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            index_value,
            band,
            reasons,
            message,
            acknowledged: false,
        }
    }
}
