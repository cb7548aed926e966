//! # Sensor Module
//!
//! Reads the live sensor log written by the phone/device logger.
//!
//! This module handles:
//! - Re-reading the CSV log on every poll and keeping only the last row
//! - Treating a missing or empty log as "no data yet"
//! - Parsing the recognized columns into an [`Observation`]

pub mod observation;
pub mod reader;

pub use observation::Observation;
pub use reader::{read_latest, SensorRow};
