//! Geocode Cache
//!
//! Append-only place-name → coordinates cache, injected rather than
//! module-global so tests never share process-wide state. No eviction:
//! entries live for the owner's lifetime. Redundant concurrent writes for
//! the same key are harmless (last write wins with identical data).

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::ProviderError;
use super::provider::{Coordinates, WeatherProvider};

/// Append-only geocoding result cache.
#[derive(Debug, Default)]
pub struct GeocodeCache {
    entries: RwLock<HashMap<String, Coordinates>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, place: &str) -> Option<Coordinates> {
        self.entries.read().get(place).copied()
    }

    pub fn insert(&self, place: &str, coords: Coordinates) {
        self.entries.write().insert(place.to_string(), coords);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Cached geocode: read through to the provider on a miss and remember
    /// the answer. Failures are not cached, so a transient outage does not
    /// poison the key.
    pub fn resolve(
        &self,
        provider: &dyn WeatherProvider,
        place: &str,
    ) -> Result<Coordinates, ProviderError> {
        if let Some(coords) = self.get(place) {
            log::debug!("Geocode cache hit for '{}'", place);
            return Ok(coords);
        }

        let coords = provider.geocode(place)?;
        self.insert(place, coords);
        Ok(coords)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::geo::provider::{DailyForecast, WeatherObservation};

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl WeatherProvider for CountingProvider {
        fn geocode(&self, place: &str) -> Result<Coordinates, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ProviderError::LocationNotFound(place.to_string()))
            } else {
                Ok(Coordinates {
                    latitude: 12.9,
                    longitude: 77.5,
                })
            }
        }

        fn current_weather(&self, _: f64, _: f64) -> Result<WeatherObservation, ProviderError> {
            unreachable!("not used in cache tests")
        }

        fn daily_forecast(&self, _: f64, _: f64, _: u32) -> Result<Vec<DailyForecast>, ProviderError> {
            unreachable!("not used in cache tests")
        }
    }

    #[test]
    fn test_resolve_caches_success() {
        let provider = CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let cache = GeocodeCache::new();

        let first = cache.resolve(&provider, "Bengaluru").unwrap();
        let second = cache.resolve(&provider, "Bengaluru").unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_not_cached() {
        let provider = CountingProvider {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let cache = GeocodeCache::new();

        assert!(cache.resolve(&provider, "Atlantis").is_err());
        assert!(cache.resolve(&provider, "Atlantis").is_err());

        // Each miss retried the provider
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_idempotent_insert() {
        let cache = GeocodeCache::new();
        let coords = Coordinates {
            latitude: 1.0,
            longitude: 2.0,
        };
        cache.insert("X", coords);
        cache.insert("X", coords);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("X"), Some(coords));
    }
}
