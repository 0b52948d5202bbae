//! Heatmap Generation
//!
//! Two modes over a bounding box:
//!
//! - **Interpolated**: exactly 5 expensive oracle+weather probes (four
//!   corners plus center) regardless of grid resolution, then a bilinear
//!   reconstruction with bounded Gaussian texture. External-call cost is
//!   independent of visual resolution.
//! - **Dense**: one probe per grid cell, no interpolation. Exact but
//!   expensive; per-cell provider failures become annotations instead of
//!   aborting the batch.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::geo::WeatherProvider;
use crate::model::{predict_probability, Classifier, RiskLevel};
use super::interpolate::{bilinear, grid_coordinate, BoundingBox, CornerValues};

/// Coordinate serialization precision (decimal places).
const COORDINATE_DECIMALS: i32 = 6;
/// Intensity serialization precision (decimal places).
const INTENSITY_DECIMALS: i32 = 4;

// ============================================================================
// CONFIG
// ============================================================================

/// Heatmap generation parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Grid resolution per axis; the grid carries `grid_size²` points.
    pub grid_size: usize,
    /// Standard deviation of the per-cell Gaussian texture.
    pub noise_std: f32,
    /// Fixed RNG seed for reproducible output; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            noise_std: 0.03,
            seed: None,
        }
    }
}

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lon: f64,
    /// Risk intensity in [0, 1].
    pub intensity: f32,
}

impl HeatmapPoint {
    /// Categorical label for this cell, via the shared risk thresholds.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_probability(self.intensity)
    }
}

/// Row-major rectangular grid of heatmap points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub grid_size: usize,
    pub points: Vec<HeatmapPoint>,
}

/// A dense-mode cell that could not be sampled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellError {
    pub row: usize,
    pub col: usize,
    pub reason: String,
}

/// Dense-mode output: sampled points plus per-cell failure annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseHeatmap {
    pub grid: HeatmapGrid,
    pub errors: Vec<CellError>,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn round_intensity(value: f32) -> f32 {
    let factor = 10f32.powi(INTENSITY_DECIMALS);
    (value * factor).round() / factor
}

// ============================================================================
// SAMPLING
// ============================================================================

/// One expensive probe: live weather plus one oracle call.
fn sample_probability(
    classifier: &dyn Classifier,
    provider: &dyn WeatherProvider,
    lat: f64,
    lon: f64,
) -> Result<f32, ProviderError> {
    let observation = provider.current_weather(lat, lon)?;
    Ok(predict_probability(classifier, &observation.to_features()))
}

// ============================================================================
// INTERPOLATED MODE
// ============================================================================

/// Interpolated heatmap: 5 probes, bilinear reconstruction, bounded noise.
///
/// The 5 probes are prerequisites, not batch items: a failed probe aborts
/// with the provider error. Pre-noise, the grid's corner cells reproduce
/// the sampled corner probabilities exactly.
pub fn interpolated_heatmap(
    classifier: &dyn Classifier,
    provider: &dyn WeatherProvider,
    bbox: &BoundingBox,
    config: &HeatmapConfig,
) -> Result<HeatmapGrid, ProviderError> {
    let [bl, br, tl, tr] = bbox.corners();
    let corners = CornerValues {
        v00: sample_probability(classifier, provider, bl.0, bl.1)?,
        v01: sample_probability(classifier, provider, br.0, br.1)?,
        v10: sample_probability(classifier, provider, tl.0, tl.1)?,
        v11: sample_probability(classifier, provider, tr.0, tr.1)?,
    };

    // Fifth probe of the fixed sample budget; interpolation uses only the
    // corners, the center value is diagnostic.
    let (center_lat, center_lon) = bbox.center();
    let center = sample_probability(classifier, provider, center_lat, center_lon)?;
    log::debug!(
        "Heatmap corner samples {:?}, center sample {:.4} (discarded)",
        corners,
        center
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let noise = if config.noise_std > 0.0 {
        Normal::new(0.0f32, config.noise_std).ok()
    } else {
        None
    };

    let grid_size = config.grid_size;
    let mut points = Vec::with_capacity(grid_size * grid_size);

    for i in 0..grid_size {
        let lat = grid_coordinate(bbox.min_lat, bbox.max_lat, i, grid_size);
        for j in 0..grid_size {
            let lon = grid_coordinate(bbox.min_lon, bbox.max_lon, j, grid_size);
            let (x, y) = bbox.normalize(lat, lon);

            let mut intensity = bilinear(&corners, x, y);
            if let Some(noise) = &noise {
                intensity += noise.sample(&mut rng);
            }

            points.push(HeatmapPoint {
                lat: round_to(lat, COORDINATE_DECIMALS),
                lon: round_to(lon, COORDINATE_DECIMALS),
                intensity: round_intensity(intensity.clamp(0.0, 1.0)),
            });
        }
    }

    Ok(HeatmapGrid { grid_size, points })
}

// ============================================================================
// DENSE MODE
// ============================================================================

/// Dense heatmap: sample the oracle at every one of `grid_size²` points.
///
/// Trades external-call cost for exactness; intended for small areas. A
/// failed cell is annotated and skipped, never aborting the remainder.
pub fn dense_heatmap(
    classifier: &dyn Classifier,
    provider: &dyn WeatherProvider,
    bbox: &BoundingBox,
    config: &HeatmapConfig,
) -> DenseHeatmap {
    let grid_size = config.grid_size;
    let mut points = Vec::with_capacity(grid_size * grid_size);
    let mut errors = Vec::new();

    for i in 0..grid_size {
        let lat = grid_coordinate(bbox.min_lat, bbox.max_lat, i, grid_size);
        for j in 0..grid_size {
            let lon = grid_coordinate(bbox.min_lon, bbox.max_lon, j, grid_size);

            match sample_probability(classifier, provider, lat, lon) {
                Ok(probability) => points.push(HeatmapPoint {
                    lat: round_to(lat, COORDINATE_DECIMALS),
                    lon: round_to(lon, COORDINATE_DECIMALS),
                    intensity: round_intensity(probability),
                }),
                Err(e) => {
                    log::warn!("Dense heatmap cell ({}, {}) failed: {}", i, j, e);
                    errors.push(CellError {
                        row: i,
                        col: j,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    DenseHeatmap {
        grid: HeatmapGrid { grid_size, points },
        errors,
    }
}

// ============================================================================
// TESTS
// ============================================================================
