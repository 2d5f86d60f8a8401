//! Mock weather used when no live reading is available

use rand::RngExt;

use crate::models::{Condition, WeatherReading};

pub const FALLBACK_LOCATION: &str = "Demo City";
pub const BASE_TEMPERATURE: i32 = 70;
pub const TEMPERATURE_SPREAD: i32 = 10;
pub const HUMIDITY_RANGE: (u8, u8) = (30, 70);
pub const GENERIC_DESCRIPTION: &str = "Nice weather";

/// Snowy is never picked at random.
pub const FALLBACK_CONDITIONS: [Condition; 4] = [
    Condition::Sunny,
    Condition::Cloudy,
    Condition::Rainy,
    Condition::Windy,
];

const CANNED_DESCRIPTIONS: [(Condition, &str); 5] = [
    (Condition::Sunny, "Clear skies and sunny"),
    (Condition::Cloudy, "Overcast clouds"),
    (Condition::Rainy, "Light rain showers"),
    (Condition::Windy, "Strong breeze"),
    (Condition::Snowy, "Light snow"),
];

#[must_use]
pub fn canned_description(condition: Condition) -> &'static str {
    CANNED_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == condition)
        .map(|(_, text)| *text)
        .unwrap_or(GENERIC_DESCRIPTION)
}

/// Synthesize a plausible reading
#[must_use]
pub fn synthesize() -> WeatherReading {
    let mut rng = rand::rng();

    let condition = FALLBACK_CONDITIONS[rng.random_range(0..FALLBACK_CONDITIONS.len())];
    let offset = rng.random_range(-TEMPERATURE_SPREAD..=TEMPERATURE_SPREAD);
    let humidity = rng.random_range(HUMIDITY_RANGE.0..=HUMIDITY_RANGE.1);

    WeatherReading {
        temp: f64::from(BASE_TEMPERATURE + offset),
        condition,
        humidity,
        description: canned_description(condition).to_string(),
        location: FALLBACK_LOCATION.to_string(),
    }
}
