use async_trait::async_trait;
use std::fmt::Debug;

use crate::models::{LocationQuery, WeatherReading};

/// What a live lookup asks the provider for
#[derive(Debug, Clone, PartialEq)]
pub enum LookupTarget {
    Coordinates { lat: f64, lon: f64 },
    City(String),
}

impl LookupTarget {
    /// Coordinates win when both are present, then any non-empty city
    /// (sent as given), then `default_city`.
    #[must_use]
    pub fn from_query(query: &LocationQuery, default_city: &str) -> Self {
        if let (Some(lat), Some(lon)) = (query.lat, query.lon) {
            return LookupTarget::Coordinates { lat, lon };
        }

        match query.city.as_deref() {
            Some(city) if !city.is_empty() => LookupTarget::City(city.to_string()),
            _ => LookupTarget::City(default_city.to_string()),
        }
    }
}

/// A live source of current weather
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, target: &LookupTarget) -> anyhow::Result<WeatherReading>;
}
