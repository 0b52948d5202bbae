//! Spatial Module - Risk Surface Interpolation

pub mod heatmap;
pub mod interpolate;

// Re-export common types
pub use heatmap::{
    dense_heatmap, interpolated_heatmap, CellError, DenseHeatmap, HeatmapConfig, HeatmapGrid,
    HeatmapPoint,
};
pub use interpolate::{bilinear, BoundingBox, CornerValues};
