//! # Poller Module
//!
//! The read → evaluate → publish loop.
//!
//! Each tick re-reads the sensor log, scores the latest reading and
//! overwrites the remote record. A tick that finds no data or an unparsable
//! row skips publishing; a failed publish is logged and dropped. None of
//! these stop the loop. Only the shutdown signal does.

pub mod stats;

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::publish::{PublishedRecord, Publisher};
use crate::risk::evaluate;
use crate::sensor::{read_latest, Observation};

pub use stats::TickStats;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Log missing, empty or unreadable
    NoData,
    /// Latest row had a non-numeric or non-finite field
    ParseFailed,
    /// Record written to the remote
    Published(PublishedRecord),
    /// Remote write failed; the record is dropped
    PublishFailed(PublishedRecord),
}

/// Polls the sensor log and forwards the latest reading
pub struct Poller<P: Publisher> {
    sensor_path: PathBuf,
    visibility: u8,
    interval: Duration,
    status_interval_ticks: u64,
    publisher: P,
    stats: TickStats,
}

impl<P: Publisher> std::fmt::Debug for Poller<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("sensor_path", &self.sensor_path)
            .field("visibility", &self.visibility)
            .field("interval", &self.interval)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<P: Publisher> Poller<P> {
    /// Number of ticks between status log lines unless overridden
    pub const DEFAULT_STATUS_INTERVAL_TICKS: u64 = 60;

    /// Create a poller
    ///
    /// # Arguments
    ///
    /// * `sensor_path` - CSV log to poll
    /// * `visibility` - Visibility level fed to the risk evaluator (0-10)
    /// * `interval` - Time between ticks
    /// * `publisher` - Where records are sent
    pub fn new(
        sensor_path: impl Into<PathBuf>,
        visibility: u8,
        interval: Duration,
        publisher: P,
    ) -> Self {
        Self {
            sensor_path: sensor_path.into(),
            visibility,
            interval,
            status_interval_ticks: Self::DEFAULT_STATUS_INTERVAL_TICKS,
            publisher,
            stats: TickStats::default(),
        }
    }

    /// Log a status line every `ticks` ticks (clamped to at least 1)
    pub fn with_status_interval(mut self, ticks: u64) -> Self {
        self.status_interval_ticks = ticks.max(1);
        self
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Run a single read → evaluate → publish cycle
    pub async fn tick(&mut self) -> TickOutcome {
        let outcome = self.poll_once().await;
        self.stats.record(&outcome);

        if self.stats.ticks % self.status_interval_ticks == 0 {
            info!("{}", self.stats);
        }

        outcome
    }

    async fn poll_once(&self) -> TickOutcome {
        let Some(row) = read_latest(&self.sensor_path) else {
            debug!("No sensor data in {}", self.sensor_path.display());
            return TickOutcome::NoData;
        };

        let observation = match Observation::from_row(&row) {
            Ok(observation) => observation,
            Err(e) => {
                warn!("Parse error for latest row: {}", e);
                return TickOutcome::ParseFailed;
            }
        };

        let risk = evaluate(observation.acceleration, self.visibility);
        let record = PublishedRecord::new(observation, risk, self.visibility);

        match self.publisher.publish(&record).await {
            Ok(()) => {
                info!(
                    risk_score = record.risk_score,
                    pothole = record.pothole,
                    rough = record.rough,
                    "Pushed: {}",
                    serde_json::to_string(&record).unwrap_or_default()
                );
                TickOutcome::Published(record)
            }
            Err(e) => {
                warn!("Error pushing record: {}", e);
                TickOutcome::PublishFailed(record)
            }
        }
    }

    /// Tick until `shutdown` becomes `true` or its sender is dropped
    ///
    /// The first tick runs immediately; later ticks follow every `interval`.
    /// A tick that overruns the interval delays the next one rather than
    /// triggering a burst. The tick in progress when shutdown arrives is
    /// allowed to finish.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use road_risk_live::config::RemoteConfig;
    /// use road_risk_live::poller::Poller;
    /// use road_risk_live::publish::RestPublisher;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let remote = RemoteConfig::new("http://127.0.0.1:9000", "live_area", 5000);
    ///     let publisher = RestPublisher::new(&remote)?;
    ///     let mut poller = Poller::new("live_sensor.csv", 5, Duration::from_secs(1), publisher);
    ///
    ///     let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    ///     tokio::spawn(async move {
    ///         let _ = tokio::signal::ctrl_c().await;
    ///         let _ = shutdown_tx.send(true);
    ///     });
    ///
    ///     poller.run(shutdown_rx).await;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting poll loop. Reading: {} every {:?}",
            self.sensor_path.display(),
            self.interval
        );

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }

                changed = shutdown.changed() => {
                    if changed.is_err() {
                        debug!("Shutdown sender dropped");
                        break;
                    }
                }
            }
        }

        info!("Poll loop stopped. {}", self.stats);
    }
}
