//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};

use crate::error::InputShapeError;
use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned feature vector with layout metadata.
///
/// This struct MUST be used for all feature data to ensure compatibility.
/// Never pass raw `Vec<f32>` into the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Create from a slice.
    ///
    /// A wrong-length slice is a contract violation (the model was trained
    /// against exactly this layout), so this fails fast instead of padding
    /// or truncating.
    pub fn from_slice(values: &[f32]) -> Result<Self, InputShapeError> {
        if values.len() != FEATURE_COUNT {
            return Err(InputShapeError {
                expected: FEATURE_COUNT,
                actual: values.len(),
            });
        }
        let mut array = [0.0f32; FEATURE_COUNT];
        array.copy_from_slice(values);
        Ok(Self::from_values(array))
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// True if every value is a finite real number
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Copy with any NaN/Inf values replaced by 0.0.
    ///
    /// The classifier contract requires finite inputs; upstream data is
    /// tolerated by substitution, not rejection.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for v in out.values.iter_mut() {
            if !v.is_finite() {
                *v = 0.0;
            }
        }
        out
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Check if this vector is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get feature names for this vector
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self {
            vector: FeatureVector::new(),
        }
    }

    pub fn temperature(mut self, value: f32) -> Self {
        self.vector.set_by_name("temperature", value);
        self
    }

    pub fn temperature_max(mut self, value: f32) -> Self {
        self.vector.set_by_name("temperature_max", value);
        self
    }

    pub fn temperature_min(mut self, value: f32) -> Self {
        self.vector.set_by_name("temperature_min", value);
        self
    }

    pub fn pressure(mut self, value: f32) -> Self {
        self.vector.set_by_name("pressure", value);
        self
    }

    pub fn rainfall(mut self, value: f32) -> Self {
        self.vector.set_by_name("rainfall", value);
        self
    }

    pub fn humidity(mut self, value: f32) -> Self {
        self.vector.set_by_name("humidity", value);
        self
    }

    pub fn wind_speed(mut self, value: f32) -> Self {
        self.vector.set_by_name("wind_speed", value);
        self
    }

    pub fn rain_anomaly(mut self, value: f32) -> Self {
        self.vector.set_by_name("rain_anomaly", value);
        self
    }

    pub fn temp_anomaly(mut self, value: f32) -> Self {
        self.vector.set_by_name("temp_anomaly", value);
        self
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f32) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_vector_builder() {
        let vector = FeatureVectorBuilder::new()
            .temperature(30.0)
            .rainfall(50.0)
            .build();

        assert_eq!(vector.get_by_name("temperature"), Some(30.0));
        assert_eq!(vector.get_by_name("rainfall"), Some(50.0));
        assert_eq!(vector.get_by_name("humidity"), Some(0.0));
    }

    #[test]
    fn test_feature_vector_set_by_name() {
        let mut vector = FeatureVector::new();
        assert!(vector.set_by_name("pressure", 1013.0));
        assert_eq!(vector.get_by_name("pressure"), Some(1013.0));

        assert!(!vector.set_by_name("nonexistent", 0.0));
    }

    #[test]
    fn test_from_slice_exact_length() {
        let vector = FeatureVector::from_slice(&[1.0; FEATURE_COUNT]).unwrap();
        assert_eq!(vector.values, [1.0; FEATURE_COUNT]);
    }

    #[test]
    fn test_from_slice_wrong_length_fails_fast() {
        let err = FeatureVector::from_slice(&[1.0; 5]).unwrap_err();
        assert_eq!(err.expected, FEATURE_COUNT);
        assert_eq!(err.actual, 5);

        assert!(FeatureVector::from_slice(&[1.0; 12]).is_err());
    }

    #[test]
    fn test_sanitized_replaces_non_finite() {
        let mut vector = FeatureVector::new();
        vector.set(0, f32::NAN);
        vector.set(3, f32::INFINITY);
        vector.set(4, 50.0);

        assert!(!vector.is_finite());

        let clean = vector.sanitized();
        assert!(clean.is_finite());
        assert_eq!(clean.get(0), Some(0.0));
        assert_eq!(clean.get(3), Some(0.0));
        assert_eq!(clean.get(4), Some(50.0));
    }

    #[test]
    fn test_feature_vector_validation() {
        let vector = FeatureVector::new();
        assert!(vector.is_compatible());
        assert!(vector.validate().is_ok());
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVectorBuilder::new().rainfall(12.5).build();

        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert!(log["layout_hash"].as_u64().is_some());
        assert_eq!(log["named_values"]["rainfall"], 12.5);
    }
}
