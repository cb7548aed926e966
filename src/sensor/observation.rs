//! # Observation
//!
//! Typed view of the sensor columns the risk pipeline cares about.

use crate::error::{Result, RoadRiskError};

use super::reader::SensorRow;

/// Latitude column name
pub const COLUMN_LAT: &str = "lat";

/// Longitude column name
pub const COLUMN_LON: &str = "lon";

/// Acceleration column name
pub const COLUMN_ACCELERATION: &str = "acceleration";

/// Timestamp column name
pub const COLUMN_TIMESTAMP: &str = "timestamp";

/// Value used for a numeric column missing from the row
const MISSING_NUMBER: &str = "0";

/// One sensor reading
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub lat: f64,
    pub lon: f64,
    pub acceleration: f64,
    /// Passed through exactly as logged
    pub timestamp: String,
}

impl Observation {
    /// Parse an observation from a raw CSV row
    ///
    /// Missing numeric columns read as `0`, a missing timestamp as empty.
    /// Columns other than `lat`, `lon`, `acceleration` and `timestamp` are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RoadRiskError::Parse`] naming the first column whose value is
    /// not a finite number.
    pub fn from_row(row: &SensorRow) -> Result<Self> {
        Ok(Self {
            lat: parse_number(row, COLUMN_LAT)?,
            lon: parse_number(row, COLUMN_LON)?,
            acceleration: parse_number(row, COLUMN_ACCELERATION)?,
            timestamp: row.get(COLUMN_TIMESTAMP).cloned().unwrap_or_default(),
        })
    }
}

fn parse_number(row: &SensorRow, field: &'static str) -> Result<f64> {
    let raw = row.get(field).map(String::as_str).unwrap_or(MISSING_NUMBER);

    match raw.trim().parse::<f64>() {
        // NaN and infinities have no JSON number form
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RoadRiskError::Parse {
            field,
            value: raw.to_string(),
        }),
    }
}
