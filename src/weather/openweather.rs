//! OpenWeatherMap current-weather client

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::provider::{LookupTarget, WeatherProvider};
use crate::config::WeatherConfig;
use crate::models::{Condition, WeatherReading};

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, config: &WeatherConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("closet-muse/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            units: config.units.clone(),
            http,
        })
    }

    fn query_params(&self, target: &LookupTarget) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("appid", self.api_key.clone()),
            ("units", self.units.clone()),
        ];
        match target {
            LookupTarget::Coordinates { lat, lon } => {
                params.push(("lat", lat.to_string()));
                params.push(("lon", lon.to_string()));
            }
            LookupTarget::City(city) => params.push(("q", city.clone())),
        }
        params
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(&self, target: &LookupTarget) -> Result<WeatherReading> {
        let start_time = Instant::now();

        let res = self
            .http
            .get(&self.base_url)
            .query(&self.query_params(target))
            .send()
            .await
            // the request URL carries the API key
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to OpenWeather")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read OpenWeather response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather JSON")?;
        let reading = parsed.into_reading()?;

        let elapsed = start_time.elapsed();
        info!(
            "Fetched weather for {} in {:.3}s: {}",
            reading.location,
            elapsed.as_secs_f64(),
            reading.condition
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow weather API response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(reading)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_reading(self) -> Result<WeatherReading> {
        let primary = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("OpenWeather response contained no weather entries"))?;

        let keyword = primary.main.to_lowercase();
        let condition = Condition::from_provider_keyword(&keyword);
        debug!("Mapped provider condition '{}' to {}", keyword, condition);

        Ok(WeatherReading {
            temp: self.main.temp,
            condition,
            humidity: self.main.humidity,
            description: capitalize(&primary.description),
            location: self.name,
        })
    }
}

/// Upper-case the first character and lower-case the rest
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
