//! Risk index history for MacroPulse.
//!
//! Provides:
//! - Append-only ledger of composite index snapshots
//! - Shared single-writer/many-reader handle for session use
//! - Windowed momentum and acceleration signals

pub mod ledger;
pub mod momentum;

pub use ledger::{RiskLedger, SharedRiskLedger};
pub use momentum::MomentumCalculator;
