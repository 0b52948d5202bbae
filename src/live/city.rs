//! Live City Predictions
//!
//! Batch-friendly per-city risk reports built from live weather. A city
//! entry never raises: an unresolvable name or a weather outage becomes a
//! per-item error annotation, and the batch keeps its input order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::geo::{Coordinates, GeocodeCache, WeatherObservation, WeatherProvider};
use crate::model::{predict_probability, Classifier, RiskLevel};

/// Probability serialization precision (decimal places).
const PROBABILITY_DECIMALS: i32 = 3;

// ============================================================================
// COORDINATE INPUT
// ============================================================================

/// Accepts "lat,lon" with optional sign and whitespace, e.g. "12.922, 77.505".
static COORDINATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+\.?\d*\s*,\s*-?\d+\.?\d*$").expect("valid coordinate regex"));

/// Parse a place string as raw coordinates, bypassing geocoding.
///
/// Returns `None` for anything that is not a range-valid coordinate pair.
pub fn parse_coordinates(place: &str) -> Option<Coordinates> {
    let trimmed = place.trim();
    if !COORDINATE_PATTERN.is_match(trimmed) {
        return None;
    }

    let mut parts = trimmed.split(',').map(str::trim);
    let latitude: f64 = parts.next()?.parse().ok()?;
    let longitude: f64 = parts.next()?.parse().ok()?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    Some(Coordinates {
        latitude,
        longitude,
    })
}

fn coordinate_label(coords: &Coordinates) -> String {
    format!(
        "Location ({:.4}, {:.4})",
        coords.latitude, coords.longitude
    )
}

fn round_probability(value: f32) -> f32 {
    let factor = 10f32.powi(PROBABILITY_DECIMALS);
    (value * factor).round() / factor
}

// ============================================================================
// CITY PREDICTION
// ============================================================================

/// One city's live risk report.
///
/// `error` is the per-item annotation: when set, `risk_level` and `weather`
/// are absent and `probability` is 0.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityPrediction {
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub probability: f32,
    pub risk_level: Option<RiskLevel>,
    pub weather: Option<WeatherObservation>,
    pub error: Option<String>,
}

impl CityPrediction {
    fn failed(city: String, coords: Option<Coordinates>, error: ProviderError) -> Self {
        Self {
            city,
            latitude: coords.map(|c| c.latitude),
            longitude: coords.map(|c| c.longitude),
            probability: 0.0,
            risk_level: None,
            weather: None,
            error: Some(error.to_string()),
        }
    }
}

/// Live flood risk for one place name or "lat,lon" string. Never raises.
pub fn predict_for_city(
    classifier: &dyn Classifier,
    provider: &dyn WeatherProvider,
    cache: &GeocodeCache,
    place: &str,
) -> CityPrediction {
    let (city, coords) = match parse_coordinates(place) {
        Some(coords) => (coordinate_label(&coords), Ok(coords)),
        None => (place.to_string(), cache.resolve(provider, place)),
    };

    let coords = match coords {
        Ok(coords) => coords,
        Err(e) => {
            log::warn!("Could not resolve '{}': {}", place, e);
            return CityPrediction::failed(city, None, e);
        }
    };

    let weather = match provider.current_weather(coords.latitude, coords.longitude) {
        Ok(weather) => weather,
        Err(e) => {
            log::warn!("Weather unavailable for '{}': {}", city, e);
            return CityPrediction::failed(city, Some(coords), e);
        }
    };

    let probability = predict_probability(classifier, &weather.to_features());

    CityPrediction {
        city,
        latitude: Some(coords.latitude),
        longitude: Some(coords.longitude),
        probability: round_probability(probability),
        risk_level: Some(RiskLevel::from_probability(probability)),
        weather: Some(weather),
        error: None,
    }
}

/// Batch city predictions: one entry per input, input order preserved,
/// partial results on failure.
pub fn predict_for_cities(
    classifier: &dyn Classifier,
    provider: &dyn WeatherProvider,
    cache: &GeocodeCache,
    places: &[String],
) -> Vec<CityPrediction> {
    places
        .iter()
        .map(|place| predict_for_city(classifier, provider, cache, place))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::error::InferenceError;
    use crate::features::FeatureVector;
    use crate::geo::DailyForecast;

    struct ConstantModel(f32);

    impl Classifier for ConstantModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f32, InferenceError> {
            Ok(self.0)
        }
    }

    /// Knows a fixed set of city names; weather is uniform.
    struct Gazetteer(&'static [&'static str]);

    impl WeatherProvider for Gazetteer {
        fn geocode(&self, place: &str) -> Result<Coordinates, ProviderError> {
            if self.0.contains(&place) {
                Ok(Coordinates {
                    latitude: 19.07,
                    longitude: 72.88,
                })
            } else {
                Err(ProviderError::LocationNotFound(place.to_string()))
            }
        }

        fn current_weather(&self, _: f64, _: f64) -> Result<WeatherObservation, ProviderError> {
            Ok(WeatherObservation {
                temperature: 28.0,
                humidity: 80.0,
                pressure: 1008.0,
                wind_speed: 12.0,
                rainfall: 4.5,
                fetched_at: Utc::now(),
            })
        }

        fn daily_forecast(&self, _: f64, _: f64, _: u32) -> Result<Vec<DailyForecast>, ProviderError> {
            Err(ProviderError::Unavailable("not supported".to_string()))
        }
    }

    #[test]
    fn test_parse_coordinates() {
        let coords = parse_coordinates("12.922, 77.505").unwrap();
        assert_eq!(coords.latitude, 12.922);
        assert_eq!(coords.longitude, 77.505);

        assert!(parse_coordinates("-33.87,151.21").is_some());
        assert!(parse_coordinates("  12.9 , 77.5  ").is_some());
    }

    #[test]
    fn test_parse_coordinates_rejects_non_coordinates() {
        assert!(parse_coordinates("Mumbai").is_none());
        assert!(parse_coordinates("12.9").is_none());
        assert!(parse_coordinates("12.9,77.5,3").is_none());
        // Out of range
        assert!(parse_coordinates("95.0, 77.5").is_none());
        assert!(parse_coordinates("12.9, 190.0").is_none());
    }

    #[test]
    fn test_coordinate_input_bypasses_geocoding() {
        let cache = GeocodeCache::new();
        let result = predict_for_city(
            &ConstantModel(0.6),
            &Gazetteer(&[]),
            &cache,
            "12.922, 77.505",
        );

        assert_eq!(result.city, "Location (12.9220, 77.5050)");
        assert_eq!(result.latitude, Some(12.922));
        assert_eq!(result.risk_level, Some(RiskLevel::High));
        assert!(result.error.is_none());
        // Nothing was geocoded
        assert!(cache.is_empty());
    }

    #[test]
    fn test_known_city_gets_full_report() {
        let cache = GeocodeCache::new();
        let result = predict_for_city(
            &ConstantModel(0.8),
            &Gazetteer(&["Mumbai"]),
            &cache,
            "Mumbai",
        );

        assert_eq!(result.city, "Mumbai");
        assert_eq!(result.probability, 0.8);
        assert_eq!(result.risk_level, Some(RiskLevel::Critical));
        assert!(result.weather.is_some());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_unknown_city_gets_error_annotation() {
        let cache = GeocodeCache::new();
        let result = predict_for_city(
            &ConstantModel(0.8),
            &Gazetteer(&["Mumbai"]),
            &cache,
            "Atlantis",
        );

        assert_eq!(result.city, "Atlantis");
        assert_eq!(result.probability, 0.0);
        assert!(result.risk_level.is_none());
        assert!(result.latitude.is_none());
        assert!(result.error.as_ref().unwrap().contains("location not found"));
    }

    #[test]
    fn test_batch_preserves_order_and_annotates_failures() {
        let cache = GeocodeCache::new();
        let places = vec![
            "Mumbai".to_string(),
            "Atlantis".to_string(),
            "Chennai".to_string(),
        ];
        let results = predict_for_cities(
            &ConstantModel(0.4),
            &Gazetteer(&["Mumbai", "Chennai"]),
            &cache,
            &places,
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].city, "Mumbai");
        assert_eq!(results[1].city, "Atlantis");
        assert_eq!(results[2].city, "Chennai");
        assert_eq!(results.iter().filter(|r| r.error.is_some()).count(), 1);
        assert!(results[1].error.is_some());
    }

    #[test]
    fn test_probability_rounded_to_three_decimals() {
        let cache = GeocodeCache::new();
        let result = predict_for_city(
            &ConstantModel(0.123456),
            &Gazetteer(&["Mumbai"]),
            &cache,
            "Mumbai",
        );
        assert_eq!(result.probability, 0.123);
    }
}
