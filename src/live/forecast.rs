//! Multi-Day Forecast Outlook
//!
//! Runs the flood model over provider daily-forecast aggregates for a
//! place. Resolving the place can fail (surfaced as a provider error);
//! per-day predictions cannot, since inference never propagates.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::features::FeatureVectorBuilder;
use crate::geo::{DailyForecast, GeocodeCache, WeatherProvider};
use crate::model::{predict_probability, Classifier, RiskLevel};
use super::city::parse_coordinates;

/// Days forecast when the caller does not specify.
pub const DEFAULT_FORECAST_DAYS: u32 = 3;

/// Relative humidity assumed for forecast days; the daily feed does not
/// carry one.
const ASSUMED_HUMIDITY: f32 = 70.0;

// ============================================================================
// OUTLOOK
// ============================================================================

/// One forecast day's risk assessment. `day` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRisk {
    pub day: u32,
    pub probability: f32,
    pub risk: RiskLevel,
}

fn forecast_features(day: &DailyForecast) -> crate::features::FeatureVector {
    FeatureVectorBuilder::new()
        .temperature((day.temperature_max + day.temperature_min) / 2.0)
        .temperature_max(day.temperature_max)
        .temperature_min(day.temperature_min)
        .pressure(day.pressure_mean)
        .rainfall(day.rainfall_sum)
        .humidity(ASSUMED_HUMIDITY)
        .wind_speed(day.wind_speed_max)
        .rain_anomaly(0.0)
        .temp_anomaly(0.0)
        .build()
}

fn round_probability(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Risk outlook for the next `days` days at a place name or "lat,lon".
pub fn forecast_outlook(
    classifier: &dyn Classifier,
    provider: &dyn WeatherProvider,
    cache: &GeocodeCache,
    place: &str,
    days: u32,
) -> Result<Vec<DailyRisk>, ProviderError> {
    let coords = match parse_coordinates(place) {
        Some(coords) => coords,
        None => cache.resolve(provider, place)?,
    };

    let daily = provider.daily_forecast(coords.latitude, coords.longitude, days)?;

    Ok(daily
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let probability = predict_probability(classifier, &forecast_features(day));
            DailyRisk {
                day: i as u32 + 1,
                probability: round_probability(probability),
                risk: RiskLevel::from_probability(probability),
            }
        })
        .collect())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::InferenceError;
    use crate::features::FeatureVector;
    use crate::geo::{Coordinates, WeatherObservation};

    /// Probability follows rainfall_sum / 100.
    struct RainfallModel;

    impl Classifier for RainfallModel {
        fn predict(&self, features: &FeatureVector) -> Result<f32, InferenceError> {
            Ok((features.values[4] / 100.0).clamp(0.0, 1.0))
        }
    }

    struct ForecastProvider {
        known: bool,
    }

    impl WeatherProvider for ForecastProvider {
        fn geocode(&self, place: &str) -> Result<Coordinates, ProviderError> {
            if self.known {
                Ok(Coordinates {
                    latitude: 13.08,
                    longitude: 80.27,
                })
            } else {
                Err(ProviderError::LocationNotFound(place.to_string()))
            }
        }

        fn current_weather(&self, _: f64, _: f64) -> Result<WeatherObservation, ProviderError> {
            Err(ProviderError::Unavailable("not used".to_string()))
        }

        fn daily_forecast(
            &self,
            _: f64,
            _: f64,
            days: u32,
        ) -> Result<Vec<DailyForecast>, ProviderError> {
            Ok((0..days)
                .map(|i| DailyForecast {
                    temperature_max: 32.0,
                    temperature_min: 26.0,
                    rainfall_sum: 30.0 * (i + 1) as f32,
                    wind_speed_max: 12.0,
                    pressure_mean: 1006.0,
                })
                .collect())
        }
    }

    #[test]
    fn test_outlook_one_entry_per_day() {
        let cache = GeocodeCache::new();
        let outlook = forecast_outlook(
            &RainfallModel,
            &ForecastProvider { known: true },
            &cache,
            "Chennai",
            3,
        )
        .unwrap();

        assert_eq!(outlook.len(), 3);
        assert_eq!(outlook[0].day, 1);
        assert_eq!(outlook[2].day, 3);
        // rainfall 30/60/90 -> 0.3/0.6/0.9
        assert_eq!(outlook[0].probability, 0.3);
        assert_eq!(outlook[0].risk, RiskLevel::Moderate);
        assert_eq!(outlook[1].risk, RiskLevel::High);
        assert_eq!(outlook[2].risk, RiskLevel::Critical);
    }

    #[test]
    fn test_unknown_place_surfaces_provider_error() {
        let cache = GeocodeCache::new();
        let result = forecast_outlook(
            &RainfallModel,
            &ForecastProvider { known: false },
            &cache,
            "Atlantis",
            3,
        );
        assert!(matches!(result, Err(ProviderError::LocationNotFound(_))));
    }

    #[test]
    fn test_coordinate_place_skips_geocoding() {
        let cache = GeocodeCache::new();
        let outlook = forecast_outlook(
            &RainfallModel,
            &ForecastProvider { known: false },
            &cache,
            "13.08, 80.27",
            2,
        )
        .unwrap();
        assert_eq!(outlook.len(), 2);
    }

    #[test]
    fn test_forecast_feature_assembly() {
        let day = DailyForecast {
            temperature_max: 34.0,
            temperature_min: 26.0,
            rainfall_sum: 12.0,
            wind_speed_max: 18.0,
            pressure_mean: 1002.0,
        };
        let features = forecast_features(&day);
        assert_eq!(
            features.values,
            [30.0, 34.0, 26.0, 1002.0, 12.0, 70.0, 18.0, 0.0, 0.0]
        );
    }
}
