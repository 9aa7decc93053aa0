//! Monitor session state

use crate::classify::{classify, ChangeClass, RateStatus};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_CHART_LIMIT: usize = 20;

/// One row of the history table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub at: DateTime<Local>,
    pub rate: f64,
    /// 0.0 for the first observation
    pub change: f64,
    pub class: ChangeClass,
    pub status: RateStatus,
}

impl HistoryRow {
    pub fn time_label(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub rate: f64,
}

/// Sudden-change notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateAlert {
    pub at: DateTime<Local>,
    pub previous: f64,
    pub current: f64,
    pub change: f64,
}

impl RateAlert {
    pub fn is_rise(&self) -> bool {
        self.change > 0.0
    }
}

impl fmt::Display for RateAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - USD/JPY {} {:.2} yen ({:.2} -> {:.2})",
            self.at.format("%H:%M:%S"),
            if self.is_rise() { "rose" } else { "fell" },
            self.change.abs(),
            self.previous,
            self.current,
        )
    }
}

/// Result of applying one rate
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub row: HistoryRow,
    pub alert: Option<RateAlert>,
}

/// Everything the monitor display shows
#[derive(Debug, Clone, Serialize)]
pub struct MonitorState {
    threshold: f64,
    last_rate: Option<f64>,
    /// Newest first
    history: VecDeque<HistoryRow>,
    history_limit: usize,
    /// Oldest first
    chart: VecDeque<ChartPoint>,
    chart_limit: usize,
    /// Newest first
    alerts: VecDeque<RateAlert>,
    error: Option<String>,
    next_seq: u64,
    applied_seq: u64,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::with_limits(DEFAULT_HISTORY_LIMIT, DEFAULT_CHART_LIMIT)
    }
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(history_limit: usize, chart_limit: usize) -> Self {
        Self {
            threshold: 0.5,
            last_rate: None,
            history: VecDeque::new(),
            history_limit: history_limit.max(1),
            chart: VecDeque::new(),
            chart_limit: chart_limit.max(1),
            alerts: VecDeque::new(),
            error: None,
            next_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn last_rate(&self) -> Option<f64> {
        self.last_rate
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryRow> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn latest(&self) -> Option<&HistoryRow> {
        self.history.front()
    }

    pub fn chart(&self) -> impl Iterator<Item = &ChartPoint> {
        self.chart.iter()
    }

    pub fn chart_len(&self) -> usize {
        self.chart.len()
    }

    pub fn alerts(&self) -> impl Iterator<Item = &RateAlert> {
        self.alerts.iter()
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    /// Message of the last failed fetch, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Tag a new request
    pub fn begin_request(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied_seq {
            tracing::debug!(
                "Discarding stale response #{} (already applied #{})",
                seq,
                self.applied_seq
            );
            return false;
        }
        self.applied_seq = seq;
        true
    }

    /// Apply a fetched rate for request `seq`; `None` when it was stale
    pub fn apply_rate(&mut self, seq: u64, rate: f64, at: DateTime<Local>) -> Option<Observation> {
        if !self.accept(seq) {
            return None;
        }
        self.error = None;
        Some(self.record(rate, at))
    }

    /// Apply a failed fetch for request `seq`; `false` when it was stale
    pub fn apply_error(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if !self.accept(seq) {
            return false;
        }
        self.error = Some(message.into());
        true
    }

    /// Record an observation without sequencing
    pub fn record(&mut self, rate: f64, at: DateTime<Local>) -> Observation {
        let change = self.last_rate.map(|last| rate - last);
        let (class, status) = classify(change, self.threshold);

        let alert = match (self.last_rate, change) {
            (Some(previous), Some(change)) if status == RateStatus::Sudden => Some(RateAlert {
                at,
                previous,
                current: rate,
                change,
            }),
            _ => None,
        };

        let row = HistoryRow {
            at,
            rate,
            change: change.unwrap_or(0.0),
            class,
            status,
        };

        self.history.push_front(row.clone());
        self.history.truncate(self.history_limit);

        self.chart.push_back(ChartPoint {
            label: row.time_label(),
            rate,
        });
        while self.chart.len() > self.chart_limit {
            self.chart.pop_front();
        }

        if let Some(alert) = &alert {
            self.alerts.push_front(alert.clone());
            self.alerts.truncate(self.history_limit);
        }

        self.last_rate = Some(rate);
        Observation { row, alert }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_all(state: &mut MonitorState, rates: &[f64]) -> Vec<Observation> {
        rates.iter().map(|r| state.record(*r, Local::now())).collect()
    }

    #[test]
    fn test_sudden_change_scenario() {
        let mut state = MonitorState::new();
        let obs = record_all(&mut state, &[150.00, 150.30, 151.00]);

        assert_eq!(obs[0].row.class, ChangeClass::None);
        assert_eq!(obs[0].row.change, 0.0);

        assert_eq!(obs[1].row.class, ChangeClass::Increase);
        assert_eq!(obs[1].row.status, RateStatus::Normal);
        assert!((obs[1].row.change - 0.30).abs() < 1e-9);

        assert_eq!(obs[2].row.class, ChangeClass::SignificantIncrease);
        assert_eq!(obs[2].row.status, RateStatus::Sudden);
        assert!((obs[2].row.change - 0.70).abs() < 1e-9);

        assert_eq!(obs.iter().filter(|o| o.alert.is_some()).count(), 1);
        let alert = obs[2].alert.as_ref().unwrap();
        assert_eq!(alert.previous, 150.30);
        assert_eq!(alert.current, 151.00);
        assert!(alert.is_rise());
        assert_eq!(state.alert_count(), 1);
        assert_eq!(state.latest().unwrap().rate, 151.00);
    }

    #[test]
    fn test_history_and_chart_bounds() {
        let mut state = MonitorState::new();
        let rates: Vec<f64> = (0..130).map(|i| 140.0 + i as f64 * 0.01).collect();
        record_all(&mut state, &rates);

        assert_eq!(state.history_len(), 100);
        assert_eq!(state.chart_len(), 20);
        // Newest first in history, oldest first in the chart
        assert_eq!(state.history().next().unwrap().rate, rates[129]);
        assert_eq!(state.chart().next().unwrap().rate, rates[110]);
        assert_eq!(state.chart().last().unwrap().rate, rates[129]);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = MonitorState::new();
        let slow = state.begin_request();
        let fast = state.begin_request();

        assert!(state.apply_rate(fast, 151.0, Local::now()).is_some());
        assert!(state.apply_rate(slow, 150.0, Local::now()).is_none());
        assert!(!state.apply_error(slow, "timeout"));

        assert_eq!(state.last_rate(), Some(151.0));
        assert_eq!(state.history_len(), 1);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_error_state_cleared_by_success() {
        let mut state = MonitorState::new();
        let seq = state.begin_request();
        assert!(state.apply_error(seq, "connection refused"));
        assert_eq!(state.error(), Some("connection refused"));
        assert_eq!(state.history_len(), 0);

        let seq = state.begin_request();
        state.apply_rate(seq, 150.0, Local::now());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_threshold_change_applies_to_next_observation() {
        let mut state = MonitorState::new();
        state.record(150.0, Local::now());
        state.set_threshold(0.2);
        let obs = state.record(150.3, Local::now());
        assert_eq!(obs.row.status, RateStatus::Sudden);
        assert!(obs.alert.is_some());
    }

    #[test]
    fn test_fall_alert_text() {
        let mut state = MonitorState::new();
        state.record(151.0, Local::now());
        let obs = state.record(150.0, Local::now());
        let alert = obs.alert.unwrap();
        assert!(!alert.is_rise());
        assert!(alert.to_string().ends_with("USD/JPY fell 1.00 yen (151.00 -> 150.00)"));
    }
}
