//! Geo Module - Weather/Geocoding Collaborator & Cache

pub mod cache;
pub mod provider;

// Re-export common types
pub use cache::GeocodeCache;
pub use provider::{
    Coordinates, DailyForecast, OpenMeteoProvider, WeatherObservation, WeatherProvider,
};
