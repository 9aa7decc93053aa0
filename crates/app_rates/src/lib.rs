//! USD/JPY rate monitoring
//!
//! Polls a remote rate service, classifies each change against a
//! threshold and raises alerts on sudden moves.

pub mod classify;
pub mod source;
pub mod state;
pub mod alert;
pub mod monitor;

pub use classify::{classify, ChangeClass, RateStatus};
pub use source::{parse_rate, HttpRateSource, ProxyPayload, RateSource};
pub use state::{ChartPoint, HistoryRow, MonitorState, Observation, RateAlert};
pub use alert::{AlertSink, LogAlertSink};
pub use monitor::{effective_interval, RateMonitor, MIN_INTERVAL};

use app_core::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Rate data not found")]
    MissingRate,
}

pub type Result<T> = std::result::Result<T, RateError>;

impl From<RateError> for AppError {
    fn from(e: RateError) -> Self {
        AppError::Network(e.to_string())
    }
}
