//! # Risk Module
//!
//! Maps a single acceleration reading and a visibility level to a road
//! risk score.
//!
//! The rules are independent and additive:
//!
//! | Condition              | Flag      | Points |
//! |------------------------|-----------|--------|
//! | acceleration > 5.0     | `pothole` | +50    |
//! | acceleration > 3.0     | `rough`   | +30    |
//! | visibility < 4         | -         | +20    |
//!
//! A pothole is always rough as well, so a pothole reading scores 80 before
//! the visibility term. Nothing clamps the sum; with these constants it tops
//! out at 100.

use serde::Serialize;

/// Acceleration above which a reading is flagged as a pothole
pub const POTHOLE_THRESHOLD: f64 = 5.0;

/// Acceleration above which a reading is flagged as rough road
pub const ROUGH_THRESHOLD: f64 = 3.0;

/// Visibility strictly below this level adds the low-visibility term
pub const LOW_VISIBILITY_THRESHOLD: u8 = 4;

/// Points added for a pothole
pub const POTHOLE_WEIGHT: u32 = 50;

/// Points added for rough road
pub const ROUGH_WEIGHT: u32 = 30;

/// Points added for low visibility
pub const LOW_VISIBILITY_WEIGHT: u32 = 20;

/// Visibility used when none is configured (scale 0-10, lower is worse)
pub const DEFAULT_VISIBILITY: u8 = 5;

/// Highest visibility on the 0-10 scale
pub const MAX_VISIBILITY: u8 = 10;

/// Outcome of evaluating one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub risk_score: u32,
    pub pothole: bool,
    pub rough: bool,
}

/// Evaluate road risk for one acceleration reading
///
/// # Arguments
///
/// * `acceleration` - Acceleration magnitude from the sensor
/// * `visibility` - Visibility level, 0 (none) to 10 (clear)
///
/// # Returns
///
/// * `RiskAssessment` - Score and flags; same inputs always give the same output
///
/// # Examples
///
/// ```
/// use road_risk_live::risk::evaluate;
///
/// let risk = evaluate(6.0, 5);
/// assert_eq!(risk.risk_score, 80);
/// assert!(risk.pothole && risk.rough);
/// ```
pub fn evaluate(acceleration: f64, visibility: u8) -> RiskAssessment {
    let pothole = acceleration > POTHOLE_THRESHOLD;
    let rough = acceleration > ROUGH_THRESHOLD;

    let mut risk_score = 0;
    if pothole {
        risk_score += POTHOLE_WEIGHT;
    }
    if rough {
        risk_score += ROUGH_WEIGHT;
    }
    if visibility < LOW_VISIBILITY_THRESHOLD {
        risk_score += LOW_VISIBILITY_WEIGHT;
    }

    RiskAssessment {
        risk_score,
        pothole,
        rough,
    }
}
