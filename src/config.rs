//! Configuration management for the Closet Muse backend
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and validates every setting before the server starts.

use crate::ClosetMuseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the OpenWeatherMap credential.
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "closet-muse.toml";

/// Root configuration structure for the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Wardrobe storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed to call the API from a browser
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; without it every lookup uses mock data
    pub api_key: Option<String>,
    /// Current-weather endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Unit system passed to the provider
    #[serde(default = "default_weather_units")]
    pub units: String,
    /// City queried when the request names no location
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Outbound request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Wardrobe storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Directory uploaded images are written to
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// URL prefix under which uploads are served
    #[serde(default = "default_public_url_prefix")]
    pub public_url_prefix: String,
    /// Maximum request body size for uploads in MB
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://localhost:3002".to_string(),
    ]
}

fn default_request_timeout() -> u32 {
    30
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_units() -> String {
    "imperial".to_string()
}

fn default_city() -> String {
    "New York".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_database_path() -> String {
    "closet_muse.db".to_string()
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_public_url_prefix() -> String {
    "/uploads".to_string()
}

fn default_max_upload_mb() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            units: default_weather_units(),
            default_city: default_city(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            upload_dir: default_upload_dir(),
            public_url_prefix: default_public_url_prefix(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the given file (or `closet-muse.toml`) and
    /// environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // CLOSET_MUSE__SERVER__PORT=9000 style overrides
        builder = builder.add_source(
            Environment::with_prefix("CLOSET_MUSE")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_credential(std::env::var(WEATHER_API_KEY_ENV).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Let the provider credential variable override the configured key
    pub fn apply_credential(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = Some(key.trim().to_string());
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .weather
            .api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty())
        {
            self.weather.api_key = None;
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.units.is_empty() {
            self.weather.units = default_weather_units();
        }
        if self.weather.default_city.trim().is_empty() {
            self.weather.default_city = default_city();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.storage.database_path.is_empty() {
            self.storage.database_path = default_database_path();
        }
        if self.storage.upload_dir.is_empty() {
            self.storage.upload_dir = default_upload_dir();
        }
        if self.storage.public_url_prefix.is_empty() {
            self.storage.public_url_prefix = default_public_url_prefix();
        }
        if self.storage.max_upload_mb == 0 {
            self.storage.max_upload_mb = default_max_upload_mb();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Whether live weather lookups are possible
    #[must_use]
    pub fn has_weather_credential(&self) -> bool {
        self.weather.api_key.is_some()
    }

    /// Maximum upload body size in bytes
    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.storage.max_upload_mb as usize * 1024 * 1024
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ClosetMuseError::config("Server port must be non-zero").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                ClosetMuseError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.timeout_seconds > 300 {
            return Err(
                ClosetMuseError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.storage.max_upload_mb > 100 {
            return Err(
                ClosetMuseError::config("Upload limit cannot exceed 100 MB").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ClosetMuseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ClosetMuseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_units = ["standard", "metric", "imperial"];
        if !valid_units.contains(&self.weather.units.as_str()) {
            return Err(ClosetMuseError::config(format!(
                "Invalid unit system '{}'. Must be one of: {}",
                self.weather.units,
                valid_units.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(ClosetMuseError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if !self.storage.public_url_prefix.starts_with('/') {
            return Err(
                ClosetMuseError::config("Upload URL prefix must start with '/'").into(),
            );
        }

        Ok(())
    }
}
