//! Running counters for the poll loop, used for periodic status lines.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use super::TickOutcome;

/// Tick counters since the poller started
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStats {
    pub ticks: u64,
    pub published: u64,
    pub publish_failures: u64,
    pub no_data: u64,
    pub parse_failures: u64,
    /// Wall-clock time of the last successful publish
    pub last_published_at: Option<DateTime<Utc>>,
}

impl TickStats {
    /// Count one tick's outcome
    pub fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::NoData => self.no_data += 1,
            TickOutcome::ParseFailed => self.parse_failures += 1,
            TickOutcome::Published(_) => {
                self.published += 1;
                self.last_published_at = Some(Utc::now());
            }
            TickOutcome::PublishFailed(_) => self.publish_failures += 1,
        }
    }
}

impl fmt::Display for TickStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks: {} published, {} failed, {} no data, {} unparsable",
            self.ticks, self.published, self.publish_failures, self.no_data, self.parse_failures
        )?;

        match self.last_published_at {
            Some(at) => write!(
                f,
                ", last publish at {}",
                at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            None => write!(f, ", nothing published yet"),
        }
    }
}
