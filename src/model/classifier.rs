//! Classifier Capability & Safe Inference
//!
//! The pretrained flood model is consumed as an opaque oracle behind the
//! `Classifier` trait and injected into every component. Nothing in this
//! crate loads, trains, or owns model weights.
//!
//! `infer` is the single entry point the rest of the engine uses. It never
//! panics and never propagates: heatmap generation calls the oracle hundreds
//! of times and one bad sample must not abort the batch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::features::FeatureVector;
use super::risk::RiskLevel;
use super::trees::TreeEnsemble;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// The injected prediction capability.
///
/// `predict` is the only required operation. The two optional capabilities
/// feed the attribution paths: `feature_importances` drives the heuristic
/// fallback, `tree_structure` enables exact path attribution.
pub trait Classifier {
    /// Positive-class probability for one feature vector.
    ///
    /// Implementations may fail; callers go through [`infer`], which maps
    /// failure to probability 0.0.
    fn predict(&self, features: &FeatureVector) -> Result<f32, InferenceError>;

    /// Global per-feature importances keyed by layout name, if the model
    /// exposes them. When `normalize` is set the values sum to 1.
    fn feature_importances(&self, normalize: bool) -> Option<HashMap<String, f32>> {
        let _ = normalize;
        None
    }

    /// Internal decision structure, if the model exposes it.
    fn tree_structure(&self) -> Option<&TreeEnsemble> {
        None
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// One point-in-time classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability: f32,
    pub risk_level: RiskLevel,
}

impl PredictionResult {
    pub fn from_probability(probability: f32) -> Self {
        Self {
            probability,
            risk_level: RiskLevel::from_probability(probability),
        }
    }
}

// ============================================================================
// SAFE INFERENCE
// ============================================================================

/// Raw probability with the never-propagate policy applied.
///
/// Non-finite inputs are substituted with 0.0 (logged), classifier failures
/// and malformed outputs become probability 0.0 (logged), and the result is
/// clamped to [0, 1].
pub fn predict_probability(classifier: &dyn Classifier, features: &FeatureVector) -> f32 {
    let features = if features.is_finite() {
        features.clone()
    } else {
        log::warn!(
            "Non-finite feature values substituted with 0.0: {}",
            features.to_log_entry()
        );
        features.sanitized()
    };

    match classifier.predict(&features) {
        Ok(probability) if probability.is_finite() => probability.clamp(0.0, 1.0),
        Ok(probability) => {
            log::warn!("Classifier returned non-finite probability {}", probability);
            0.0
        }
        Err(e) => {
            log::error!("Classifier failure, substituting probability 0.0: {}", e);
            0.0
        }
    }
}

/// One classification with the shared risk tier attached.
pub fn infer(classifier: &dyn Classifier, features: &FeatureVector) -> PredictionResult {
    let probability = predict_probability(classifier, features);
    log::debug!("Predicted probability: {}", probability);
    PredictionResult::from_probability(probability)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVectorBuilder;

    struct ConstantModel(f32);

    impl Classifier for ConstantModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f32, InferenceError> {
            Ok(self.0)
        }
    }

    struct BrokenModel;

    impl Classifier for BrokenModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f32, InferenceError> {
            Err(InferenceError("model artifact corrupted".to_string()))
        }
    }

    #[test]
    fn test_infer_attaches_risk_level() {
        let result = infer(&ConstantModel(0.8), &FeatureVector::new());
        assert_eq!(result.probability, 0.8);
        assert_eq!(result.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_failure_becomes_zero_probability() {
        let result = infer(&BrokenModel, &FeatureVector::new());
        assert_eq!(result.probability, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_nan_output_becomes_zero() {
        let result = infer(&ConstantModel(f32::NAN), &FeatureVector::new());
        assert_eq!(result.probability, 0.0);
    }

    #[test]
    fn test_out_of_range_output_clamped() {
        assert_eq!(predict_probability(&ConstantModel(1.7), &FeatureVector::new()), 1.0);
        assert_eq!(predict_probability(&ConstantModel(-0.3), &FeatureVector::new()), 0.0);
    }

    #[test]
    fn test_nan_input_sanitized_not_rejected() {
        struct RejectNan;
        impl Classifier for RejectNan {
            fn predict(&self, features: &FeatureVector) -> Result<f32, InferenceError> {
                if features.is_finite() {
                    Ok(0.5)
                } else {
                    Err(InferenceError("NaN input".to_string()))
                }
            }
        }

        let features = FeatureVectorBuilder::new().rainfall(f32::NAN).build();
        // Sanitization happens before the model sees the vector
        assert_eq!(predict_probability(&RejectNan, &features), 0.5);
    }
}
