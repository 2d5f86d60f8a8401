//! Weather resolution: live lookup, condition normalization and mock fallback
//!
//! The resolver never fails. When no credential is configured, or the live
//! lookup errors for any reason, it answers with synthesized data.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::WeatherConfig;
use crate::models::{LocationQuery, WeatherReading};

pub mod fallback;
pub mod openweather;
pub mod provider;

pub use openweather::OpenWeatherClient;
pub use provider::{LookupTarget, WeatherProvider};

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Reading fetched from the provider
    Live(WeatherReading),
    /// Synthesized reading
    Fallback(WeatherReading),
}

impl Resolution {
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Resolution::Live(_))
    }

    #[must_use]
    pub fn into_reading(self) -> WeatherReading {
        match self {
            Resolution::Live(reading) | Resolution::Fallback(reading) => reading,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherResolver {
    provider: Option<Arc<dyn WeatherProvider>>,
    default_city: String,
}

impl WeatherResolver {
    pub fn new(provider: Option<Arc<dyn WeatherProvider>>, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            default_city: default_city.into(),
        }
    }

    /// Build a resolver backed by OpenWeatherMap when an API key is configured
    pub fn from_config(config: &WeatherConfig) -> Result<Self> {
        let provider = match &config.api_key {
            Some(api_key) => {
                let client = OpenWeatherClient::new(api_key.clone(), config)?;
                Some(Arc::new(client) as Arc<dyn WeatherProvider>)
            }
            None => None,
        };
        Ok(Self::new(provider, config.default_city.clone()))
    }

    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn resolve(&self, query: &LocationQuery) -> Resolution {
        let Some(provider) = &self.provider else {
            debug!("No weather credential configured, using mock data");
            return Resolution::Fallback(fallback::synthesize());
        };

        let target = LookupTarget::from_query(query, &self.default_city);
        match provider.current(&target).await {
            Ok(reading) => Resolution::Live(reading),
            Err(e) => {
                warn!("Error fetching weather for {:?}: {:#}", target, e);
                Resolution::Fallback(fallback::synthesize())
            }
        }
    }

    /// Current weather for the query, live if possible
    pub async fn current_weather(&self, query: &LocationQuery) -> WeatherReading {
        self.resolve(query).await.into_reading()
    }
}
