//! Error taxonomy for the risk engine.
//!
//! Batch-style operations never abort on a single bad item; these types are
//! the explicit signals that replace the silent fallback chains of earlier
//! iterations.

use thiserror::Error;

/// Failure inside a classifier implementation.
///
/// The `infer` wrapper catches this, logs it, and substitutes probability
/// 0.0 so that batch callers are never aborted by one bad sample.
#[derive(Debug, Clone, Error)]
#[error("inference failed: {0}")]
pub struct InferenceError(pub String);

/// Geocoding/weather provider failure, surfaced per affected item.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The place name could not be resolved to coordinates.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// The provider was reachable but returned no usable data,
    /// or was not reachable at all.
    #[error("weather data unavailable: {0}")]
    Unavailable(String),
}

/// The exact attribution method's prerequisites are missing.
///
/// This is surfaced distinctly; substituting the heuristic is a caller
/// policy decision, never made silently inside the attributor.
#[derive(Debug, Clone, Error)]
#[error("exact attribution unavailable: {reason}")]
pub struct AttributionUnavailable {
    pub reason: String,
}

impl AttributionUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Wrong feature count: a contract violation, reported instead of being
/// papered over by padding or truncation.
#[derive(Debug, Clone, Error)]
#[error("feature vector has {actual} values, expected {expected}")]
pub struct InputShapeError {
    pub expected: usize,
    pub actual: usize,
}
