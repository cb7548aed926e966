//! # Sensor Log Reader
//!
//! Returns the most recently appended row of the CSV sensor log.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;

/// One raw CSV row keyed by header name
pub type SensorRow = HashMap<String, String>;

/// Read the last row of the sensor log
///
/// The whole file is read on every call; nothing is cached between polls.
///
/// # Arguments
///
/// * `path` - Path to the CSV log (must have a header row)
///
/// # Returns
///
/// * `Option<SensorRow>` - Last data row, or `None` when the file is missing,
///   has no data rows, or cannot be read
///
/// # Examples
///
/// ```no_run
/// use road_risk_live::sensor::read_latest;
///
/// if let Some(row) = read_latest("live_sensor.csv") {
///     println!("latest acceleration: {:?}", row.get("acceleration"));
/// }
/// ```
pub fn read_latest<P: AsRef<Path>>(path: P) -> Option<SensorRow> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Sensor log {} not found yet", path.display());
            return None;
        }
        Err(e) => {
            warn!("Error opening sensor log {}: {}", path.display(), e);
            return None;
        }
    };

    match last_row(file) {
        Ok(row) => row,
        Err(e) => {
            warn!("Error reading sensor log {}: {}", path.display(), e);
            None
        }
    }
}

/// Scan every record and keep the last one, zipped with the header
fn last_row<R: Read>(source: R) -> Result<Option<SensorRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();

    let mut last = None;
    for record in reader.records() {
        last = Some(record?);
    }

    Ok(last.map(|record| {
        headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }))
}
