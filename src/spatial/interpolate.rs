//! Bilinear Interpolation Primitives
//!
//! Pure math for reconstructing a dense risk surface from four corner
//! samples. No I/O, no randomness; the stochastic texture lives in
//! `heatmap.rs`.

use serde::{Deserialize, Serialize};

// ============================================================================
// BOUNDING BOX
// ============================================================================

/// Geographic bounding box (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// The four corners in sampling order:
    /// bottom-left, bottom-right, top-left, top-right.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_lat, self.min_lon),
            (self.min_lat, self.max_lon),
            (self.max_lat, self.min_lon),
            (self.max_lat, self.max_lon),
        ]
    }

    /// Normalize a point into unit square coordinates `(x, y)` where `x`
    /// follows longitude and `y` follows latitude. A zero-width or
    /// zero-height box normalizes to 0.5 on that axis to avoid division by
    /// zero.
    pub fn normalize(&self, lat: f64, lon: f64) -> (f64, f64) {
        let width = self.max_lon - self.min_lon;
        let height = self.max_lat - self.min_lat;

        let x = if width == 0.0 {
            0.5
        } else {
            (lon - self.min_lon) / width
        };
        let y = if height == 0.0 {
            0.5
        } else {
            (lat - self.min_lat) / height
        };

        (x, y)
    }
}

// ============================================================================
// CORNER VALUES & BLEND
// ============================================================================

/// The four retained corner probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerValues {
    /// Bottom-left (min_lat, min_lon)
    pub v00: f32,
    /// Bottom-right (min_lat, max_lon)
    pub v01: f32,
    /// Top-left (max_lat, min_lon)
    pub v10: f32,
    /// Top-right (max_lat, max_lon)
    pub v11: f32,
}

/// Bilinear blend at unit-square position `(x, y)`.
///
/// At x,y ∈ {0,1} this reproduces the corner values exactly.
pub fn bilinear(corners: &CornerValues, x: f64, y: f64) -> f32 {
    let x = x as f32;
    let y = y as f32;
    corners.v00 * (1.0 - x) * (1.0 - y)
        + corners.v01 * x * (1.0 - y)
        + corners.v10 * (1.0 - x) * y
        + corners.v11 * x * y
}

/// Grid node coordinate along one axis: `count` nodes spanning
/// `[min, max]` inclusive, so the first and last nodes sit on the box edge.
pub fn grid_coordinate(min: f64, max: f64, index: usize, count: usize) -> f64 {
    if count <= 1 {
        (min + max) / 2.0
    } else {
        min + (max - min) * index as f64 / (count - 1) as f64
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> CornerValues {
        CornerValues {
            v00: 0.1,
            v01: 0.4,
            v10: 0.6,
            v11: 0.9,
        }
    }

    #[test]
    fn test_bilinear_reproduces_corners_exactly() {
        let c = corners();
        assert_eq!(bilinear(&c, 0.0, 0.0), c.v00);
        assert_eq!(bilinear(&c, 1.0, 0.0), c.v01);
        assert_eq!(bilinear(&c, 0.0, 1.0), c.v10);
        assert_eq!(bilinear(&c, 1.0, 1.0), c.v11);
    }

    #[test]
    fn test_bilinear_center_is_mean() {
        let c = corners();
        let expected = (c.v00 + c.v01 + c.v10 + c.v11) / 4.0;
        assert!((bilinear(&c, 0.5, 0.5) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_bilinear_flat_surface() {
        let c = CornerValues {
            v00: 0.5,
            v01: 0.5,
            v10: 0.5,
            v11: 0.5,
        };
        for i in 0..=10 {
            for j in 0..=10 {
                let v = bilinear(&c, i as f64 / 10.0, j as f64 / 10.0);
                assert!((v - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_normalize_inside_box() {
        let bbox = BoundingBox {
            min_lat: 10.0,
            min_lon: 70.0,
            max_lat: 12.0,
            max_lon: 74.0,
        };
        assert_eq!(bbox.normalize(10.0, 70.0), (0.0, 0.0));
        assert_eq!(bbox.normalize(12.0, 74.0), (1.0, 1.0));
        assert_eq!(bbox.normalize(11.0, 72.0), (0.5, 0.5));
    }

    #[test]
    fn test_normalize_degenerate_box() {
        let bbox = BoundingBox {
            min_lat: 10.0,
            min_lon: 70.0,
            max_lat: 10.0,
            max_lon: 70.0,
        };
        assert_eq!(bbox.normalize(10.0, 70.0), (0.5, 0.5));
    }

    #[test]
    fn test_grid_coordinate_spans_inclusively() {
        assert_eq!(grid_coordinate(10.0, 12.0, 0, 5), 10.0);
        assert_eq!(grid_coordinate(10.0, 12.0, 4, 5), 12.0);
        assert_eq!(grid_coordinate(10.0, 12.0, 2, 5), 11.0);
        // Single-node grid sits at the center
        assert_eq!(grid_coordinate(10.0, 12.0, 0, 1), 11.0);
    }

    #[test]
    fn test_corners_order() {
        let bbox = BoundingBox {
            min_lat: 1.0,
            min_lon: 2.0,
            max_lat: 3.0,
            max_lon: 4.0,
        };
        assert_eq!(
            bbox.corners(),
            [(1.0, 2.0), (1.0, 4.0), (3.0, 2.0), (3.0, 4.0)]
        );
    }
}
