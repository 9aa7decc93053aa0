//! Alert delivery

use crate::state::{Observation, RateAlert};
use std::io::Write;

/// Receives monitor events
///
/// Called from the polling task, outside the state lock.
pub trait AlertSink: Send + Sync {
    /// A sudden change was detected
    fn alert(&self, alert: &RateAlert);

    /// Any applied observation, including the one that raised an alert
    fn observed(&self, _observation: &Observation) {}

    /// A fetch failed
    fn failed(&self, _message: &str) {}
}

/// Logs alerts and rings the terminal bell
#[derive(Debug, Clone)]
pub struct LogAlertSink {
    beep: bool,
}

impl LogAlertSink {
    pub fn new(beep: bool) -> Self {
        Self { beep }
    }
}

impl Default for LogAlertSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AlertSink for LogAlertSink {
    fn alert(&self, alert: &RateAlert) {
        tracing::warn!("Sudden change: {}", alert);

        if self.beep {
            let mut stderr = std::io::stderr();
            if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
                tracing::debug!("Failed to ring bell: {}", e);
            }
        }
    }

    fn failed(&self, message: &str) {
        tracing::error!("Failed to fetch exchange rate: {}", message);
    }
}
