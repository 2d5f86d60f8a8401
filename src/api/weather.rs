use axum::{
    extract::{Query, State},
    response::Json,
};

use super::AppState;
use crate::models::{LocationQuery, WeatherReading};

/// Always answers with a reading; failures upstream degrade to mock data.
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Json<WeatherReading> {
    Json(state.resolver.current_weather(&query).await)
}
