//! Weather resolution against a local stand-in for the OpenWeatherMap API

use std::collections::HashMap;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::Query,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use closet_muse::{
    AppConfig, Condition, LocationQuery, WeatherResolver, config::WeatherConfig, web,
};
use serde_json::{Value, json};
use tower::ServiceExt;

const API_KEY: &str = "test-key";

async fn fake_openweather(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("appid").map(String::as_str) != Some(API_KEY)
        || params.get("units").map(String::as_str) != Some("imperial")
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"cod": 401, "message": "Invalid API key"})),
        )
            .into_response();
    }

    let name = match (params.get("lat"), params.get("lon"), params.get("q")) {
        (Some(lat), Some(lon), _) => format!("coords {lat},{lon}"),
        (_, _, Some(q)) => q.clone(),
        _ => return (StatusCode::BAD_REQUEST, "Nothing to geocode").into_response(),
    };

    let (main, description) = match name.as_str() {
        "Paris" => ("Thunderstorm", "thunderstorm with light rain"),
        "Atlantis" => ("Volcanic", "lava everywhere"),
        "Oslo" => ("Snow", "heavy SNOW"),
        "Broken" => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
        }
        "Garbage" => return (StatusCode::OK, "definitely not json").into_response(),
        "Empty" => {
            return Json(json!({"name": "Empty", "main": {"temp": 1.0, "humidity": 1}, "weather": []}))
                .into_response();
        }
        _ => ("Clear", "clear sky"),
    };

    Json(json!({
        "coord": {"lon": 0.0, "lat": 0.0},
        "weather": [{"id": 800, "main": main, "description": description, "icon": "01d"}],
        "main": {"temp": 58.3, "feels_like": 57.0, "pressure": 1012, "humidity": 77},
        "name": name,
        "cod": 200
    }))
    .into_response()
}

/// Serve the fake provider on an ephemeral port and return its URL
async fn spawn_fake_provider() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/data/2.5/weather", get(fake_openweather));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/data/2.5/weather")
}

fn weather_config(base_url: String) -> WeatherConfig {
    WeatherConfig {
        api_key: Some(API_KEY.to_string()),
        base_url,
        ..WeatherConfig::default()
    }
}

async fn live_resolver() -> WeatherResolver {
    let base_url = spawn_fake_provider().await;
    WeatherResolver::from_config(&weather_config(base_url)).unwrap()
}

fn assert_fallback(reading: &closet_muse::WeatherReading) {
    assert!((60.0..=80.0).contains(&reading.temp));
    assert!((30..=70).contains(&reading.humidity));
    assert!(reading.condition != Condition::Snowy);
    assert_eq!(reading.location, "Demo City");
}

#[tokio::test]
async fn thunderstorm_maps_to_rainy() {
    let resolver = live_resolver().await;
    let resolution = resolver.resolve(&LocationQuery::city("Paris")).await;
    assert!(resolution.is_live());

    let reading = resolution.into_reading();
    assert_eq!(reading.condition, Condition::Rainy);
    assert_eq!(reading.temp, 58.3);
    assert_eq!(reading.humidity, 77);
    assert_eq!(reading.description, "Thunderstorm with light rain");
    assert_eq!(reading.location, "Paris");
}

#[tokio::test]
async fn unknown_condition_maps_to_sunny() {
    let resolver = live_resolver().await;
    let reading = resolver.current_weather(&LocationQuery::city("Atlantis")).await;
    assert_eq!(reading.condition, Condition::Sunny);
    assert_eq!(reading.location, "Atlantis");
}

#[tokio::test]
async fn snow_is_reported_live() {
    let resolver = live_resolver().await;
    let reading = resolver.current_weather(&LocationQuery::city("Oslo")).await;
    assert_eq!(reading.condition, Condition::Snowy);
    assert_eq!(reading.description, "Heavy snow");
}

#[tokio::test]
async fn coordinates_take_precedence_over_city() {
    let resolver = live_resolver().await;
    let query = LocationQuery {
        lat: Some(48.85),
        lon: Some(2.35),
        city: Some("Paris".to_string()),
    };
    let reading = resolver.current_weather(&query).await;
    assert_eq!(reading.location, "coords 48.85,2.35");
    assert_eq!(reading.condition, Condition::Sunny);
}

#[tokio::test]
async fn empty_query_uses_default_city() {
    let resolver = live_resolver().await;
    let reading = resolver.current_weather(&LocationQuery::default()).await;
    assert_eq!(reading.location, "New York");
}

#[tokio::test]
async fn provider_failures_fall_back_to_mock_data() {
    let resolver = live_resolver().await;
    for city in ["Broken", "Garbage", "Empty"] {
        let resolution = resolver.resolve(&LocationQuery::city(city)).await;
        assert!(!resolution.is_live(), "{city} should fall back");
        assert_fallback(&resolution.into_reading());
    }
}

#[tokio::test]
async fn rejected_credential_falls_back() {
    let base_url = spawn_fake_provider().await;
    let config = WeatherConfig {
        api_key: Some("wrong-key".to_string()),
        ..weather_config(base_url)
    };
    let resolver = WeatherResolver::from_config(&config).unwrap();
    let resolution = resolver.resolve(&LocationQuery::city("Paris")).await;
    assert!(!resolution.is_live());
    assert_fallback(&resolution.into_reading());
}

#[tokio::test]
async fn unreachable_provider_falls_back() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = weather_config(format!("http://{addr}/data/2.5/weather"));
    let resolver = WeatherResolver::from_config(&config).unwrap();
    let resolution = resolver.resolve(&LocationQuery::city("Paris")).await;
    assert!(!resolution.is_live());
    assert_fallback(&resolution.into_reading());
}

#[tokio::test]
async fn endpoint_serves_live_weather() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.weather = weather_config(spawn_fake_provider().await);
    config.storage.database_path = dir.path().join("closet.db").to_string_lossy().into_owned();
    config.storage.upload_dir = dir.path().join("uploads").to_string_lossy().into_owned();

    let state = web::build_state(&config).await.unwrap();
    let app = web::app(&config, state).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/weather/?city=Paris&lat=10.5&lon=20.25")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap())
            .unwrap();
    assert_eq!(body["location"], "coords 10.5,20.25");
    assert_eq!(body["condition"], "sunny");
    assert_eq!(body["description"], "Clear sky");
    assert_eq!(body["humidity"], 77);
}
