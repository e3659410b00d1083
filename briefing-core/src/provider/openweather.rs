use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{CurrentConditions, Location};

use super::{ProviderError, ProviderId, WeatherProvider, http_client, success_body, unix_to_utc};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> reqwest::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> reqwest::Result<Self> {
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: http_client()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
}

/// Parse a `/data/2.5/weather` body requested with `units=imperial`.
pub fn parse_current(body: &str) -> Result<CurrentConditions, ProviderError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;

    let condition_text = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| ProviderError::Malformed("OpenWeather response has no weather entry".into()))?;

    let observed_at = parsed.dt.and_then(unix_to_utc).unwrap_or_else(Utc::now);
    let wind = parsed.wind.map(|w| format!("{:.0} miles per hour", w.speed));

    Ok(CurrentConditions { temperature_f: parsed.main.temp, condition_text, observed_at, wind })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions, ProviderError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let query = location.query();

        tracing::debug!(%url, %query, "requesting OpenWeather current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;

        let body = success_body(res).await?;
        parse_current(&body)
    }
}
