//! Weather Underground legacy API, "conditions" data feature.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{CurrentConditions, Location};

use super::{ProviderError, ProviderId, WeatherProvider, http_client, success_body, unix_to_utc};

const DEFAULT_BASE_URL: &str = "http://api.wunderground.com";

#[derive(Debug, Clone)]
pub struct WundergroundProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WundergroundProvider {
    pub fn new(api_key: String) -> reqwest::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> reqwest::Result<Self> {
        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http: http_client()? })
    }

    fn conditions_url(&self, location: &Location) -> String {
        format!(
            "{}/api/{}/geolookup/conditions/q/{}/{}.json",
            self.base_url,
            self.api_key,
            location.region.trim().to_uppercase(),
            location.city.trim().replace(' ', "_"),
        )
    }
}

#[derive(Debug, Deserialize)]
struct WuError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WuMeta {
    error: Option<WuError>,
}

#[derive(Debug, Deserialize)]
struct WuObservation {
    temp_f: f64,
    weather: String,
    wind_string: Option<String>,
    observation_epoch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WuResponse {
    response: Option<WuMeta>,
    current_observation: Option<WuObservation>,
}

/// Parse a `geolookup/conditions` body.
pub fn parse_conditions(body: &str) -> Result<CurrentConditions, ProviderError> {
    let parsed: WuResponse = serde_json::from_str(body)?;

    let Some(obs) = parsed.current_observation else {
        let reason = parsed
            .response
            .and_then(|m| m.error)
            .and_then(|e| e.description)
            .unwrap_or_else(|| "missing current_observation".to_string());
        return Err(ProviderError::Malformed(reason));
    };

    let observed_at = obs
        .observation_epoch
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(unix_to_utc)
        .unwrap_or_else(Utc::now);

    let wind = obs.wind_string.map(|w| w.trim().to_string()).filter(|w| !w.is_empty());

    Ok(CurrentConditions {
        temperature_f: obs.temp_f,
        condition_text: obs.weather.trim().to_string(),
        observed_at,
        wind,
    })
}

#[async_trait]
impl WeatherProvider for WundergroundProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Wunderground
    }

    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions, ProviderError> {
        let url = self.conditions_url(location);
        tracing::debug!(%location, "requesting Wunderground conditions");

        let res = self.http.get(&url).send().await?;
        let body = success_body(res).await?;
        parse_conditions(&body)
    }
}
