//! Polling session

use crate::alert::AlertSink;
use crate::source::{HttpRateSource, RateSource};
use crate::state::MonitorState;
use crate::Result;
use app_core::MonitorConfig;
use chrono::Local;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest allowed polling interval
pub const MIN_INTERVAL: Duration = Duration::from_secs(5);

pub fn effective_interval(requested: Duration) -> Duration {
    requested.max(MIN_INTERVAL)
}

/// USD/JPY monitor session
///
/// Owns the polling task; dropping the monitor stops it.
pub struct RateMonitor {
    source: Arc<dyn RateSource>,
    sink: Arc<dyn AlertSink>,
    state: Arc<Mutex<MonitorState>>,
    task: Option<JoinHandle<()>>,
}

impl RateMonitor {
    pub fn new(source: Arc<dyn RateSource>, sink: Arc<dyn AlertSink>) -> Self {
        Self::with_state(source, sink, MonitorState::new())
    }

    pub fn with_state(
        source: Arc<dyn RateSource>,
        sink: Arc<dyn AlertSink>,
        state: MonitorState,
    ) -> Self {
        Self {
            source,
            sink,
            state: Arc::new(Mutex::new(state)),
            task: None,
        }
    }

    /// HTTP source and history limits built from configuration
    pub fn from_config(config: &MonitorConfig, sink: Arc<dyn AlertSink>) -> Result<Self> {
        let source = HttpRateSource::new(
            config.endpoint.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let mut state = MonitorState::with_limits(config.history_limit, config.chart_limit);
        state.set_threshold(config.threshold);

        Ok(Self::with_state(Arc::new(source), sink, state))
    }

    /// Start polling; returns the interval actually used
    ///
    /// Fetches immediately, then once per interval. Restarting replaces the
    /// running schedule. Must be called inside a tokio runtime.
    pub fn start(&mut self, interval: Duration, threshold: f64) -> Duration {
        self.stop();

        let interval = effective_interval(interval);
        self.state.lock().set_threshold(threshold);

        let source = self.source.clone();
        let sink = self.sink.clone();
        let state = self.state.clone();

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                // Each fetch runs on its own so a slow response never delays the schedule
                tokio::spawn(poll(source.clone(), state.clone(), sink.clone()));
            }
        }));

        tracing::info!("Monitoring started (interval: {}s)", interval.as_secs());
        interval
    }

    /// Stop the schedule; a fetch already in flight still lands
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("Monitoring stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn set_threshold(&self, threshold: f64) {
        self.state.lock().set_threshold(threshold);
    }

    /// Run a single fetch outside the schedule
    pub async fn fetch_once(&self) {
        poll(self.source.clone(), self.state.clone(), self.sink.clone()).await;
    }

    pub fn snapshot(&self) -> MonitorState {
        self.state.lock().clone()
    }
}

impl Drop for RateMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll(source: Arc<dyn RateSource>, state: Arc<Mutex<MonitorState>>, sink: Arc<dyn AlertSink>) {
    let seq = state.lock().begin_request();
    let result = source.fetch_rate().await;

    match result {
        Ok(rate) => {
            let observation = state.lock().apply_rate(seq, rate, Local::now());
            if let Some(observation) = observation {
                if let Some(alert) = &observation.alert {
                    sink.alert(alert);
                }
                sink.observed(&observation);
            }
        }
        Err(e) => {
            let message = e.to_string();
            if state.lock().apply_error(seq, message.clone()) {
                sink.failed(&message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Observation, RateAlert};
    use crate::RateError;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Replays scripted rates; `None` fails the fetch
    struct ScriptedSource {
        rates: Mutex<VecDeque<Option<f64>>>,
    }

    impl ScriptedSource {
        fn new(rates: &[Option<f64>]) -> Arc<Self> {
            Arc::new(Self {
                rates: Mutex::new(rates.iter().copied().collect()),
            })
        }
    }

    #[async_trait]
    impl RateSource for ScriptedSource {
        async fn fetch_rate(&self) -> Result<f64> {
            match self.rates.lock().pop_front() {
                Some(Some(rate)) => Ok(rate),
                Some(None) => Err(RateError::Status(500)),
                None => Err(RateError::MissingRate),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        alerts: Mutex<Vec<RateAlert>>,
        observed: Mutex<Vec<Observation>>,
        failures: Mutex<Vec<String>>,
    }

    impl AlertSink for RecordingSink {
        fn alert(&self, alert: &RateAlert) {
            self.alerts.lock().push(alert.clone());
        }

        fn observed(&self, observation: &Observation) {
            self.observed.lock().push(observation.clone());
        }

        fn failed(&self, message: &str) {
            self.failures.lock().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn test_one_alert_for_scenario() {
        let sink = Arc::new(RecordingSink::default());
        let monitor = RateMonitor::new(
            ScriptedSource::new(&[Some(150.00), Some(150.30), Some(151.00)]),
            sink.clone(),
        );

        for _ in 0..3 {
            monitor.fetch_once().await;
        }

        assert_eq!(sink.observed.lock().len(), 3);
        assert_eq!(sink.alerts.lock().len(), 1);
        assert_eq!(sink.alerts.lock()[0].current, 151.00);

        let state = monitor.snapshot();
        assert_eq!(state.history_len(), 3);
        assert_eq!(state.last_rate(), Some(151.00));
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_polling_continues() {
        let sink = Arc::new(RecordingSink::default());
        let monitor = RateMonitor::new(
            ScriptedSource::new(&[Some(150.0), None, Some(150.1)]),
            sink.clone(),
        );

        monitor.fetch_once().await;
        monitor.fetch_once().await;
        assert!(monitor.snapshot().error().is_some());
        assert_eq!(sink.failures.lock().len(), 1);

        monitor.fetch_once().await;
        let state = monitor.snapshot();
        assert_eq!(state.error(), None);
        assert_eq!(state.history_len(), 2);
        assert!(sink.alerts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_start_fetches_immediately() {
        let sink = Arc::new(RecordingSink::default());
        let mut monitor = RateMonitor::new(ScriptedSource::new(&[Some(150.0)]), sink.clone());

        let interval = monitor.start(Duration::from_secs(1), 0.5);
        assert_eq!(interval, MIN_INTERVAL);
        assert!(monitor.is_running());

        let landed = tokio::time::timeout(Duration::from_secs(2), async {
            while monitor.snapshot().history_len() == 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(landed.is_ok());

        monitor.stop();
        assert!(!monitor.is_running());
        assert_eq!(monitor.snapshot().threshold(), 0.5);
    }

    #[test]
    fn test_effective_interval() {
        assert_eq!(effective_interval(Duration::from_secs(0)), MIN_INTERVAL);
        assert_eq!(effective_interval(Duration::from_secs(60)), Duration::from_secs(60));
    }

    #[test]
    fn test_from_config() {
        let mut config = MonitorConfig::default();
        config.threshold = 1.5;
        config.history_limit = 10;

        let monitor =
            RateMonitor::from_config(&config, Arc::new(RecordingSink::default())).unwrap();
        let state = monitor.snapshot();
        assert_eq!(state.threshold(), 1.5);

        // History is capped at the configured limit
        let mut state = state;
        for i in 0..15 {
            state.record(150.0 + i as f64, Local::now());
        }
        assert_eq!(state.history_len(), 10);
        assert!(!monitor.is_running());
    }
}
