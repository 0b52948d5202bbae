//! Weather/Geocoding Provider
//!
//! External collaborator boundary: resolves place names to coordinates and
//! fetches current/daily weather. Consumed synchronously; retry policy, if
//! any, belongs to the calling layer. Failures surface as explicit
//! `ProviderError` values, never as a crash and never as silently
//! substituted default weather.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// HTTP timeout for provider calls.
const REQUEST_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// DATA TYPES
// ============================================================================

/// Geographic coordinates (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub wind_speed: f32,
    pub rainfall: f32,
    /// When this observation was fetched (not when it was measured).
    pub fetched_at: DateTime<Utc>,
}

impl WeatherObservation {
    /// Assemble the model feature vector for a live observation.
    ///
    /// Daily max/min are approximated as `temperature ± 2` and the anomaly
    /// terms are zeroed; live feeds carry neither.
    pub fn to_features(&self) -> crate::features::FeatureVector {
        crate::features::FeatureVectorBuilder::new()
            .temperature(self.temperature)
            .temperature_max(self.temperature + 2.0)
            .temperature_min(self.temperature - 2.0)
            .pressure(self.pressure)
            .rainfall(self.rainfall)
            .humidity(self.humidity)
            .wind_speed(self.wind_speed)
            .rain_anomaly(0.0)
            .temp_anomaly(0.0)
            .build()
    }
}

/// One day of forecast aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub temperature_max: f32,
    pub temperature_min: f32,
    pub rainfall_sum: f32,
    pub wind_speed_max: f32,
    pub pressure_mean: f32,
}

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

/// The consumed weather/geocoding capability.
pub trait WeatherProvider {
    /// Resolve a place name to coordinates.
    fn geocode(&self, place: &str) -> Result<Coordinates, ProviderError>;

    /// Current weather at a point.
    fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherObservation, ProviderError>;

    /// Daily forecast aggregates for the next `days` days.
    fn daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        days: u32,
    ) -> Result<Vec<DailyForecast>, ProviderError>;
}

// ============================================================================
// OPEN-METEO IMPLEMENTATION
// ============================================================================

/// Open-Meteo backed provider (geocoding + forecast APIs).
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    agent: ureq::Agent,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_urls(
            "https://geocoding-api.open-meteo.com/v1/search",
            "https://api.open-meteo.com/v1/forecast",
        )
    }

    /// Custom base URLs (test servers, regional mirrors).
    pub fn with_urls(geocoding_url: &str, forecast_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build();
        Self {
            geocoding_url: geocoding_url.to_string(),
            forecast_url: forecast_url.to_string(),
            agent,
        }
    }

    fn get_json(&self, url: &str) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        response
            .into_json()
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {}", e)))
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f32,
    relative_humidity_2m: f32,
    pressure_msl: f32,
    wind_speed_10m: f32,
    precipitation: f32,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    temperature_2m_max: Vec<f32>,
    temperature_2m_min: Vec<f32>,
    precipitation_sum: Vec<f32>,
    wind_speed_10m_max: Vec<f32>,
    pressure_msl_mean: Vec<f32>,
}

impl WeatherProvider for OpenMeteoProvider {
    fn geocode(&self, place: &str) -> Result<Coordinates, ProviderError> {
        let url = format!(
            "{}?name={}&count=1&language=en",
            self.geocoding_url,
            urlencode(place)
        );
        let value = self.get_json(&url)?;
        let parsed: GeocodeResponse = serde_json::from_value(value)
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {}", e)))?;

        match parsed.results.first() {
            Some(hit) => Ok(Coordinates {
                latitude: hit.latitude,
                longitude: hit.longitude,
            }),
            None => {
                log::warn!("Geocoding returned no results for '{}'", place);
                Err(ProviderError::LocationNotFound(place.to_string()))
            }
        }
    }

    fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherObservation, ProviderError> {
        let url = format!(
            "{}?latitude={}&longitude={}\
             &current=temperature_2m,relative_humidity_2m,pressure_msl,wind_speed_10m,precipitation",
            self.forecast_url, lat, lon
        );
        let value = self.get_json(&url)?;
        let parsed: CurrentResponse = serde_json::from_value(value)
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {}", e)))?;

        Ok(WeatherObservation {
            temperature: parsed.current.temperature_2m,
            humidity: parsed.current.relative_humidity_2m,
            pressure: parsed.current.pressure_msl,
            wind_speed: parsed.current.wind_speed_10m,
            rainfall: parsed.current.precipitation,
            fetched_at: Utc::now(),
        })
    }

    fn daily_forecast(
        &self,
        lat: f64,
        lon: f64,
        days: u32,
    ) -> Result<Vec<DailyForecast>, ProviderError> {
        let url = format!(
            "{}?latitude={}&longitude={}\
             &daily=temperature_2m_max,temperature_2m_min,precipitation_sum,\
             wind_speed_10m_max,pressure_msl_mean&forecast_days={}",
            self.forecast_url, lat, lon, days
        );
        let value = self.get_json(&url)?;
        let parsed: DailyResponse = serde_json::from_value(value)
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {}", e)))?;

        let daily = parsed.daily;
        let len = daily
            .temperature_2m_max
            .len()
            .min(daily.temperature_2m_min.len())
            .min(daily.precipitation_sum.len())
            .min(daily.wind_speed_10m_max.len())
            .min(daily.pressure_msl_mean.len());

        if len == 0 {
            return Err(ProviderError::Unavailable(
                "forecast response contained no days".to_string(),
            ));
        }

        Ok((0..len.min(days as usize))
            .map(|i| DailyForecast {
                temperature_max: daily.temperature_2m_max[i],
                temperature_min: daily.temperature_2m_min[i],
                rainfall_sum: daily.precipitation_sum[i],
                wind_speed_max: daily.wind_speed_10m_max[i],
                pressure_mean: daily.pressure_msl_mean[i],
            })
            .collect())
    }
}

/// Minimal percent-encoding for place names in query strings.
fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
