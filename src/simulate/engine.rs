//! Temporal Simulation Engine
//!
//! Runs the flood model once per simulated hour over a synthetic timeline:
//! rainfall accumulates as a running total of the initial rate, pressure
//! declines 0.5 hPa per hour (floored at zero), every other field is held
//! constant to isolate the rainfall/pressure effect. This is a modeling
//! convenience for "what-if" plots, not a weather forecast.

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::model::{infer, Classifier, RiskLevel};

/// Hours simulated when the caller does not specify.
pub const DEFAULT_SIMULATION_HOURS: u32 = 24;

/// Pressure decline per simulated hour (hPa), representing mild storm
/// progression.
pub const PRESSURE_STEP_HPA: f32 = 0.5;

const RAINFALL_INDEX: usize = 4;
const PRESSURE_INDEX: usize = 3;

// ============================================================================
// TIMELINE
// ============================================================================

/// One simulated hour's state and resulting risk assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationFrame {
    pub hour: u32,
    pub probability: f32,
    pub risk_state: RiskLevel,
}

/// Project `base` forward across `hours` discrete hourly steps.
///
/// Frame `h` sees `rainfall = base_rainfall * (h + 1)` and
/// `pressure = max(0, base_pressure - 0.5 * h)`. The timeline is produced
/// eagerly, has exactly `hours` frames, and is fully reproducible given an
/// identical oracle.
pub fn simulate_flood(
    classifier: &dyn Classifier,
    base: &FeatureVector,
    hours: u32,
) -> Vec<SimulationFrame> {
    let base = base.sanitized();
    let base_rainfall = base.values[RAINFALL_INDEX];
    let base_pressure = base.values[PRESSURE_INDEX];

    let mut timeline = Vec::with_capacity(hours as usize);

    for hour in 0..hours {
        let mut features = base.clone();
        features.values[RAINFALL_INDEX] = base_rainfall * (hour + 1) as f32;
        features.values[PRESSURE_INDEX] = (base_pressure - PRESSURE_STEP_HPA * hour as f32).max(0.0);

        let result = infer(classifier, &features);
        timeline.push(SimulationFrame {
            hour,
            probability: result.probability,
            risk_state: result.risk_level,
        });
    }

    log::debug!(
        "Simulated {} hours, final probability {:.4}",
        hours,
        timeline.last().map(|f| f.probability).unwrap_or(0.0)
    );

    timeline
}

// ============================================================================
// TESTS
// ============================================================================
