//! Monitoring sessions and alert pipeline for MacroPulse.
//!
//! Provides:
//! - Session orchestration around the scoring engine (scenario, region focus)
//! - An explicit record action that feeds the momentum ledger
//! - Early-warning alert emission via channels
//! - The `mp-monitor-service` binary serving reports over TCP

pub mod alerts;
pub mod session;

pub use alerts::RiskAlert;
pub use session::{MonitorSession, SessionConfig, SessionStatus};
