use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    error::ServiceError,
    model::{Coordinates, WeatherSnapshot},
};

use super::{ServiceId, WeatherService, endpoint, read_json};

const SERVICE: ServiceId = ServiceId::OpenWeather;

#[derive(Debug, Clone)]
pub struct OpenWeatherService {
    api_key: String,
    http: Client,
    base_url: Url,
}

impl OpenWeatherService {
    pub fn new(http: Client, base_url: Url, api_key: String) -> Self {
        Self { api_key, http, base_url }
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
struct OwCurrentResponse {
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        WeatherSnapshot { temperature_c: parsed.main.temp, description }
    }
}

#[async_trait]
impl WeatherService for OpenWeatherService {
    async fn current(&self, at: Coordinates) -> Result<WeatherSnapshot, ServiceError> {
        if self.api_key.is_empty() {
            return Err(ServiceError::MissingCredentials { service: SERVICE });
        }

        let res = self
            .http
            .get(endpoint(&self.base_url, "data/2.5/weather"))
            .query(&[
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|source| ServiceError::Transport { service: SERVICE, source })?;

        let parsed: OwCurrentResponse = read_json(SERVICE, res).await?;

        Ok(parsed.into())
    }
}
