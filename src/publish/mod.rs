//! # Publish Module
//!
//! Pushes the latest reading and its risk assessment to the remote record.
//!
//! This module handles:
//! - Building the flat JSON record from an observation and its risk
//! - Overwriting the single remote record over HTTP (see [`RestPublisher`])
//! - A [`Publisher`] trait so the polling loop can run against a mock

pub mod rest;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::risk::RiskAssessment;
use crate::sensor::Observation;

pub use rest::RestPublisher;

/// Flat record written to the remote on every publish
///
/// Field order and names match what the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedRecord {
    pub lat: f64,
    pub lon: f64,
    pub acc: f64,
    pub pothole: bool,
    pub rough: bool,
    pub visibility: u8,
    pub risk_score: u32,
    pub timestamp: String,
}

impl PublishedRecord {
    /// Combine an observation with the risk derived from it
    pub fn new(observation: Observation, risk: RiskAssessment, visibility: u8) -> Self {
        Self {
            lat: observation.lat,
            lon: observation.lon,
            acc: observation.acceleration,
            pothole: risk.pothole,
            rough: risk.rough,
            visibility,
            risk_score: risk.risk_score,
            timestamp: observation.timestamp,
        }
    }
}

/// Destination for published records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Replace the remote record with `record`
    async fn publish(&self, record: &PublishedRecord) -> Result<()>;
}
