//! Live Module - Batch Operations over Live Weather
//!
//! Composes the classifier, provider, and cache into the user-facing batch
//! operations: per-city reports, multi-city batches, forecast outlooks.

pub mod city;
pub mod forecast;

// Re-export common types
pub use city::{parse_coordinates, predict_for_cities, predict_for_city, CityPrediction};
pub use forecast::{forecast_outlook, DailyRisk, DEFAULT_FORECAST_DAYS};
