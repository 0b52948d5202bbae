//! Risk Tier Mapping
//!
//! Shared probability → categorical risk mapping. Every component that
//! surfaces a label (point prediction, simulation frames, heatmap cells,
//! batch city reports) uses exactly this function; the boundaries are part
//! of the external contract and tests depend on them being exact.

use serde::{Deserialize, Serialize};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Four-tier ordinal flood risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a probability to its risk tier.
    ///
    /// Boundaries are half-open on the lower side:
    /// `[0, 0.25)` Low, `[0.25, 0.50)` Moderate, `[0.50, 0.75)` High,
    /// `[0.75, 1]` Critical.
    pub fn from_probability(probability: f32) -> Self {
        if probability < 0.25 {
            RiskLevel::Low
        } else if probability < 0.50 {
            RiskLevel::Moderate
        } else if probability < 0.75 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
