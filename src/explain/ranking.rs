//! Contribution Ranking
//!
//! Display ordering and qualitative banding for attribution output.

use serde::{Deserialize, Serialize};

use super::attribution::AttributionResult;

// ============================================================================
// BANDS
// ============================================================================

/// Qualitative magnitude band for a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Strong,
    Moderate,
    Slight,
}

impl Impact {
    /// `|v| > 0.10` strong, `0.05 < |v| <= 0.10` moderate, else slight.
    pub fn from_magnitude(value: f32) -> Self {
        let magnitude = value.abs();
        if magnitude > 0.10 {
            Impact::Strong
        } else if magnitude > 0.05 {
            Impact::Moderate
        } else {
            Impact::Slight
        }
    }
}

/// Whether a contribution pushed the prediction up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    /// Strictly positive contributions are `Increasing`; everything else,
    /// including an exact 0.0, is `Decreasing`. A zero contribution pushed
    /// the prediction nowhere, so its direction carries no information;
    /// display layers should lead with its [`Impact::Slight`] band.
    pub fn from_sign(value: f32) -> Self {
        if value > 0.0 {
            Direction::Increasing
        } else {
            Direction::Decreasing
        }
    }
}

// ============================================================================
// RANKED VIEW
// ============================================================================

/// One contribution prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedContribution {
    pub feature: String,
    pub value: f32,
    pub impact: Impact,
    pub direction: Direction,
}

/// Contributions sorted by absolute magnitude, descending.
///
/// The sort is stable, so equal magnitudes keep original feature order.
pub fn rank_contributions(result: &AttributionResult) -> Vec<RankedContribution> {
    let mut ranked: Vec<RankedContribution> = result
        .feature_names
        .iter()
        .zip(result.contributions.iter())
        .map(|(name, &value)| RankedContribution {
            feature: name.clone(),
            value,
            impact: Impact::from_magnitude(value),
            direction: Direction::from_sign(value),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.value
            .abs()
            .partial_cmp(&a.value.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}

// ============================================================================
// TESTS
// ============================================================================
