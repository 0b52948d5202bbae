//! Features Module - Feature Schema & Vector
//!
//! Owns the ordered 9-feature weather schema the flood model was trained
//! against. Everything that talks to the classifier goes through
//! `FeatureVector`.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{feature_index, feature_name, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::{FeatureVector, FeatureVectorBuilder};
