//! # Road Risk Live Library
//!
//! Forward the latest road sensor reading and its risk score to a realtime
//! database.
//!
//! This library provides the pieces of the polling loop: reading the latest
//! row of a live sensor CSV log, scoring it for potholes and rough road, and
//! overwriting a single remote record with the result.

pub mod config;
pub mod error;
pub mod logging;
pub mod poller;
pub mod publish;
pub mod risk;
pub mod sensor;
