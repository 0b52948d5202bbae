//! Feature Attribution
//!
//! Decomposes one prediction into per-feature contributions.
//!
//! Two methods, never conflated:
//! - **Exact**: additive path attribution over the decision structure the
//!   oracle optionally exposes. Base value plus contribution sum reproduces
//!   the model output to within 1e-4, or the method reports itself
//!   unavailable.
//! - **Heuristic**: `contribution[i] = normalized_importance[i] * value[i]`.
//!   Always available, does NOT reconstruct the prediction. Results carry a
//!   method tag so callers can tell which one they got; substituting the
//!   heuristic when the exact path fails is a caller decision.

use serde::{Deserialize, Serialize};

use crate::error::AttributionUnavailable;
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::model::trees::{TreeEnsemble, TreeNode};
use crate::model::{predict_probability, Classifier};

/// Tolerance for exact-method reconstruction of the model output.
pub const EXACT_TOLERANCE: f32 = 1e-4;

// ============================================================================
// ATTRIBUTION RESULT
// ============================================================================

/// Which procedure produced an attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributionMethod {
    /// Path attribution over exposed tree structure; reconstruction exact.
    Exact,
    /// Importance-weighted heuristic; reconstruction approximate only.
    Heuristic,
}

/// Per-feature decomposition of one prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionResult {
    /// Expected model output over the training population (0.0 for the
    /// heuristic method, which has no meaningful baseline).
    pub base_value: f32,
    /// Feature names, layout order.
    pub feature_names: Vec<String>,
    /// One contribution per feature, layout order.
    pub contributions: Vec<f32>,
    /// The model output being explained.
    pub prediction: f32,
    pub method: AttributionMethod,
}

fn layout_names() -> Vec<String> {
    FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// EXACT METHOD
// ============================================================================

/// Exact additive attribution over the oracle's exposed tree structure.
///
/// For each tree the instance's decision path is walked from the root; the
/// change in the positive-class expectation across every split is credited
/// to the split feature. The base value is the mean root expectation across
/// trees, so `base + sum(contributions)` equals the ensemble's mean leaf
/// value by construction. If the oracle exposes no structure, or the
/// structure is malformed, or it fails to reproduce `predict` within
/// [`EXACT_TOLERANCE`], the caller receives an explicit unavailable signal.
pub fn attribute_exact(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> Result<AttributionResult, AttributionUnavailable> {
    let ensemble = classifier
        .tree_structure()
        .ok_or_else(|| AttributionUnavailable::new("classifier exposes no tree structure"))?;

    ensemble.validate().map_err(AttributionUnavailable::new)?;

    let features = features.sanitized();
    let channel = ensemble.positive_class();
    let n_trees = ensemble.trees.len() as f32;

    let mut base_value = 0.0f32;
    let mut contributions = [0.0f32; FEATURE_COUNT];

    for tree in &ensemble.trees {
        let mut index = 0usize;
        base_value += tree.nodes[index].expected()[channel];

        while let TreeNode::Split {
            feature,
            threshold,
            left,
            right,
            ..
        } = &tree.nodes[index]
        {
            let next = if features.values[*feature] <= *threshold {
                *left
            } else {
                *right
            };
            let delta = tree.nodes[next].expected()[channel] - tree.nodes[index].expected()[channel];
            contributions[*feature] += delta;
            index = next;
        }
    }

    base_value /= n_trees;
    for contribution in contributions.iter_mut() {
        *contribution /= n_trees;
    }

    let prediction = predict_probability(classifier, &features);
    let reconstructed = base_value + contributions.iter().sum::<f32>();
    if (reconstructed - prediction).abs() > EXACT_TOLERANCE {
        return Err(AttributionUnavailable::new(format!(
            "tree structure does not reproduce model output ({} vs {})",
            reconstructed, prediction
        )));
    }

    Ok(AttributionResult {
        base_value,
        feature_names: layout_names(),
        contributions: contributions.to_vec(),
        prediction,
        method: AttributionMethod::Exact,
    })
}

// ============================================================================
// HEURISTIC METHOD
// ============================================================================

/// Importances aligned to layout order, renormalized to sum 1.
///
/// Uses whatever the oracle exposes; names absent from the mapping get
/// weight 0. A missing or degenerate mapping falls back to uniform 1/9.
pub fn normalized_importances(classifier: &dyn Classifier) -> [f32; FEATURE_COUNT] {
    let mut weights = [0.0f32; FEATURE_COUNT];

    match classifier.feature_importances(true) {
        Some(mapping) => {
            for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
                weights[i] = mapping.get(*name).copied().unwrap_or(0.0).max(0.0);
            }
        }
        None => {
            log::debug!("Classifier exposes no importances, using uniform weights");
            weights = [1.0; FEATURE_COUNT];
        }
    }

    let total: f32 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        log::warn!("Degenerate importance mapping, using uniform weights");
        weights = [1.0 / FEATURE_COUNT as f32; FEATURE_COUNT];
    } else {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }

    weights
}

/// Heuristic attribution: `contribution[i] = normalized_importance[i] *
/// feature_value[i]`.
///
/// Always available. The contribution sum is NOT forced to equal
/// `prediction - base_value`; this is a known approximation, tagged as such.
pub fn attribute_heuristic(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> AttributionResult {
    let features = features.sanitized();
    let weights = normalized_importances(classifier);

    let contributions: Vec<f32> = weights
        .iter()
        .zip(features.values.iter())
        .map(|(w, v)| w * v)
        .collect();

    AttributionResult {
        base_value: 0.0,
        feature_names: layout_names(),
        contributions,
        prediction: predict_probability(classifier, &features),
        method: AttributionMethod::Heuristic,
    }
}

// ============================================================================
// TESTS
// ============================================================================
