//! Data models for the Closet Muse API

pub mod item;
pub mod trend;
pub mod weather;

pub use item::{ClothingItem, NewClothingItem, Page};
pub use trend::TrendItem;
pub use weather::{Condition, LocationQuery, WeatherReading};
