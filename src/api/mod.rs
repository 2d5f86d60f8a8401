use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::{storage::Wardrobe, weather::WeatherResolver};

mod fashion;
mod items;
mod weather;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<WeatherResolver>,
    pub wardrobe: Wardrobe,
}

impl AppState {
    pub fn new(resolver: WeatherResolver, wardrobe: Wardrobe) -> Self {
        Self {
            resolver: Arc::new(resolver),
            wardrobe,
        }
    }
}

/// Routes mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather::get_weather))
        .route("/weather/", get(weather::get_weather))
        .route("/fashion/trends", get(fashion::get_trends))
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/", get(items::list_items).post(items::create_item))
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Closet Muse API" }))
}
