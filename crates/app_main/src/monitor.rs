//! `pixshelf monitor`

use anyhow::Result;
use app_core::AppConfig;
use app_rates::{AlertSink, LogAlertSink, Observation, RateAlert, RateMonitor};
use chrono::Local;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Seconds between polls (at least 5)
    #[arg(long)]
    interval: Option<u64>,

    /// Change in yen that counts as sudden
    #[arg(long)]
    threshold: Option<f64>,

    /// Rate service URL
    #[arg(long)]
    endpoint: Option<String>,
}

/// Prints every observation and forwards alerts to the log sink
struct ConsoleSink {
    inner: LogAlertSink,
}

impl AlertSink for ConsoleSink {
    fn alert(&self, alert: &RateAlert) {
        println!("!! {}", alert);
        self.inner.alert(alert);
    }

    fn observed(&self, observation: &Observation) {
        let row = &observation.row;
        println!(
            "{}  {:>8.2}  {:>+6.2}  {}",
            row.time_label(),
            row.rate,
            row.change,
            row.status
        );
    }

    fn failed(&self, message: &str) {
        println!("{}  error: {}", Local::now().format("%H:%M:%S"), message);
        self.inner.failed(message);
    }
}

pub async fn run(config: &AppConfig, args: MonitorArgs) -> Result<()> {
    let mut settings = config.monitor.clone();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    let interval = Duration::from_secs(args.interval.unwrap_or(settings.interval_secs));
    let threshold = args.threshold.unwrap_or(settings.threshold);

    let sink = ConsoleSink {
        inner: LogAlertSink::new(settings.beep),
    };
    let mut monitor = RateMonitor::from_config(&settings, Arc::new(sink))?;
    let interval = monitor.start(interval, threshold);

    println!(
        "Watching USD/JPY every {}s (alert at ±{:.2} yen). Ctrl-C to stop.",
        interval.as_secs(),
        threshold
    );
    println!("{:<8}  {:>8}  {:>6}  status", "time", "rate", "change");

    tokio::signal::ctrl_c().await?;
    monitor.stop();

    let state = monitor.snapshot();
    println!(
        "\n{} observations, {} alerts",
        state.history_len(),
        state.alert_count()
    );
    Ok(())
}
