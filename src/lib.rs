//! Flood Risk Inference & Interpolation Engine
//!
//! Turns a single opaque binary flood-risk classifier into a decision
//! support surface:
//!
//! - point-in-time classification with a shared four-tier risk mapping
//!   ([`model`]),
//! - per-feature attribution of why a score was produced, with an exact
//!   tree-path method and a tagged heuristic fallback ([`explain`]),
//! - deterministic hourly what-if projection ([`simulate`]),
//! - sparse-sample bilinear risk surfaces over a bounding box ([`spatial`]),
//! - live per-city and multi-day batch operations ([`live`]).
//!
//! The classifier is consumed strictly as an injected oracle
//! (`predict(FeatureVector) -> probability`); this crate never trains,
//! loads, or persists model weights, and its attributions are a consistent
//! decomposition of the model output, not a causal claim.

pub mod error;
pub mod explain;
pub mod features;
pub mod geo;
pub mod live;
pub mod model;
pub mod simulate;
pub mod spatial;

pub use error::{AttributionUnavailable, InferenceError, InputShapeError, ProviderError};
pub use features::{FeatureVector, FeatureVectorBuilder, FEATURE_COUNT, FEATURE_LAYOUT};
pub use model::{infer, Classifier, PredictionResult, RiskLevel};
