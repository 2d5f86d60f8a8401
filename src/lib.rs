//! Closet Muse - backend for the Closet Muse fashion app
//!
//! Serves curated fashion trends, current weather (live from OpenWeatherMap
//! with a mock fallback) and the user's uploaded wardrobe items.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod trends;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::AppConfig;
pub use error::ClosetMuseError;
pub use models::{ClothingItem, Condition, LocationQuery, TrendItem, WeatherReading};
pub use storage::Wardrobe;
pub use weather::{Resolution, WeatherResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClosetMuseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
