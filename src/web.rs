use std::time::Duration;

use anyhow::{Context, Result};
use axum::{Router, extract::DefaultBodyLimit, http::HeaderValue, routing::get};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::storage::Wardrobe;
use crate::weather::WeatherResolver;

/// Wire up the resolver and the wardrobe store from configuration
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let resolver = WeatherResolver::from_config(&config.weather)?;
    if resolver.has_provider() {
        info!("Live weather enabled ({})", config.weather.base_url);
    } else {
        warn!("No weather API key configured, serving mock weather data");
    }

    let wardrobe = Wardrobe::open(&config.storage)
        .await
        .context("Failed to open wardrobe storage")?;

    Ok(AppState::new(resolver, wardrobe))
}

pub fn app(config: &AppConfig, state: AppState) -> Result<Router> {
    let cors = cors_layer(&config.server.cors_origins)?;
    let uploads = ServeDir::new(state.wardrobe.uploads().dir());
    let timeout = Duration::from_secs(config.server.request_timeout_seconds.into());

    Ok(Router::new()
        .route("/", get(api::root))
        .nest("/api", api::router())
        .nest_service(&config.storage.public_url_prefix, uploads)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes()))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    // credentials cannot be combined with a wildcard origin
    if origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(AllowOrigin::any()));
    }

    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

pub async fn run(config: &AppConfig, state: AppState) -> Result<()> {
    let app = app(config, state)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_origin() {
        assert!(cors_layer(&["http://ok.example".to_string(), "bad\norigin".to_string()]).is_err());
    }

    #[test]
    fn accepts_default_and_wildcard_origins() {
        assert!(cors_layer(&AppConfig::default().server.cors_origins).is_ok());
        assert!(cors_layer(&["*".to_string()]).is_ok());
    }
}
