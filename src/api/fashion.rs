use axum::{extract::Query, response::Json};
use serde::Deserialize;

use crate::{models::TrendItem, trends};

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub category: Option<String>,
}

pub async fn get_trends(Query(query): Query<TrendsQuery>) -> Json<Vec<TrendItem>> {
    Json(trends::trends_for(query.category.as_deref()))
}
