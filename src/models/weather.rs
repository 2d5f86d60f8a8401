//! Weather readings served to the app and the condition vocabulary they use

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weather state shown to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Sunny,
        Condition::Cloudy,
        Condition::Rainy,
        Condition::Snowy,
        Condition::Windy,
    ];

    /// Map a provider condition keyword (e.g. OpenWeatherMap's `weather[0].main`)
    /// onto the app vocabulary. Unknown keywords read as sunny.
    #[must_use]
    pub fn from_provider_keyword(keyword: &str) -> Self {
        match keyword.trim().to_lowercase().as_str() {
            "clear" => Condition::Sunny,
            "clouds" => Condition::Cloudy,
            "rain" | "drizzle" | "thunderstorm" => Condition::Rainy,
            "snow" => Condition::Snowy,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" => Condition::Cloudy,
            "squall" | "tornado" => Condition::Windy,
            _ => Condition::Sunny,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::Cloudy => "cloudy",
            Condition::Rainy => "rainy",
            Condition::Snowy => "snowy",
            Condition::Windy => "windy",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current weather as returned by `GET /api/weather/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Temperature in the provider's unit system (Fahrenheit by default)
    pub temp: f64,
    pub condition: Condition,
    /// Relative humidity in percent
    pub humidity: u8,
    pub description: String,
    /// Label of the resolved location
    pub location: String,
}

/// Location descriptor accepted by the weather endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
}

impl LocationQuery {
    #[must_use]
    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            city: None,
        }
    }

    #[must_use]
    pub fn city<S: Into<String>>(city: S) -> Self {
        Self {
            lat: None,
            lon: None,
            city: Some(city.into()),
        }
    }
}
