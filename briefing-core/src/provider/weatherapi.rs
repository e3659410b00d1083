use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{CurrentConditions, Location};

use super::{ProviderError, ProviderId, WeatherProvider, http_client, success_body, unix_to_utc};

const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> reqwest::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> reqwest::Result<Self> {
        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http: http_client()? })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_f: f64,
    wind_mph: Option<f64>,
    wind_dir: Option<String>,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: Option<WaLocation>,
    current: WaCurrent,
}

/// Parse a `/v1/current.json` body.
pub fn parse_current(body: &str) -> Result<CurrentConditions, ProviderError> {
    let parsed: WaResponse = serde_json::from_str(body)?;

    let ts = parsed
        .current
        .last_updated_epoch
        .or(parsed.location.and_then(|l| l.localtime_epoch));
    let observed_at = ts.and_then(unix_to_utc).unwrap_or_else(Utc::now);

    let wind = match (parsed.current.wind_dir, parsed.current.wind_mph) {
        (Some(dir), Some(mph)) => Some(format!("from the {dir} at {mph:.0} miles per hour")),
        (None, Some(mph)) => Some(format!("{mph:.0} miles per hour")),
        _ => None,
    };

    Ok(CurrentConditions {
        temperature_f: parsed.current.temp_f,
        condition_text: parsed.current.condition.text.trim().to_string(),
        observed_at,
        wind,
    })
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions, ProviderError> {
        let url = format!("{}/v1/current.json", self.base_url);
        let query = location.query();

        tracing::debug!(%url, %query, "requesting WeatherAPI current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query.as_str())])
            .send()
            .await?;

        let body = success_body(res).await?;
        parse_current(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_payload() {
        let body = r#"{
            "location": { "name": "Boise", "country": "USA", "localtime_epoch": 1760680000 },
            "current": {
                "temp_c": 2.0, "temp_f": 35.6,
                "wind_mph": 11.2, "wind_dir": "NNW",
                "condition": { "text": "Light snow " },
                "last_updated_epoch": 1760679900
            }
        }"#;

        let c = parse_current(body).expect("valid payload");
        assert_eq!(c.temperature_f, 35.6);
        assert_eq!(c.condition_text, "Light snow");
        assert_eq!(c.observed_at.timestamp(), 1760679900);
        assert_eq!(c.wind.as_deref(), Some("from the NNW at 11 miles per hour"));
    }

    #[test]
    fn falls_back_to_location_time() {
        let body = r#"{
            "location": { "localtime_epoch": 1760680000 },
            "current": { "temp_f": 70.0, "condition": { "text": "Sunny" } }
        }"#;

        let c = parse_current(body).unwrap();
        assert_eq!(c.observed_at.timestamp(), 1760680000);
        assert!(c.wind.is_none());
    }

    #[test]
    fn error_payload_is_malformed() {
        let body = r#"{ "error": { "code": 1006, "message": "No matching location found." } }"#;
        assert!(matches!(parse_current(body), Err(ProviderError::Malformed(_))));
    }
}
