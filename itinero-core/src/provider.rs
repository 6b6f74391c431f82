use crate::{
    Config,
    error::{ServiceError, truncate_body},
    hotels::HotelElement,
    model::{BackendResponse, Coordinates, TripSubmission, WeatherSnapshot},
    provider::{
        backend::BackendClient, nominatim::NominatimGeocoder, openweather::OpenWeatherService,
        overpass::OverpassDirectory,
    },
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug, future::Future, sync::Arc, time::Duration};

pub mod backend;
pub mod nominatim;
pub mod openweather;
pub mod overpass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Nominatim,
    OpenWeather,
    Overpass,
    Backend,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Nominatim => "nominatim",
            ServiceId::OpenWeather => "openweather",
            ServiceId::Overpass => "overpass",
            ServiceId::Backend => "backend",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Nominatim, ServiceId::OpenWeather, ServiceId::Overpass, ServiceId::Backend]
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ServiceId::Nominatim => "https://nominatim.openstreetmap.org",
            ServiceId::OpenWeather => "https://api.openweathermap.org",
            ServiceId::Overpass => "https://overpass-api.de",
            ServiceId::Backend => "https://march-cohort-backend.onrender.com",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ServiceId::OpenWeather)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "nominatim" => Ok(ServiceId::Nominatim),
            "openweather" => Ok(ServiceId::OpenWeather),
            "overpass" => Ok(ServiceId::Overpass),
            "backend" => Ok(ServiceId::Backend),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: nominatim, openweather, overpass, backend."
            )),
        }
    }
}

/// Free-text place search.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// First candidate for `query`, or `None` when the service knows no such place.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, ServiceError>;
}

#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    async fn current(&self, at: Coordinates) -> Result<WeatherSnapshot, ServiceError>;
}

#[async_trait]
pub trait HotelDirectory: Send + Sync + Debug {
    async fn hotels_near(
        &self,
        at: Coordinates,
        radius_m: u32,
    ) -> Result<Vec<HotelElement>, ServiceError>;
}

#[async_trait]
pub trait ItineraryBackend: Send + Sync + Debug {
    async fn generate(&self, submission: &TripSubmission) -> Result<BackendResponse, ServiceError>;

    async fn download_pdf(&self, pdf_path: &str) -> Result<Vec<u8>, ServiceError>;

    /// Where the PDF for `pdf_path` can be fetched from.
    fn pdf_download_url(&self, pdf_path: &str) -> Url;
}

/// The outbound collaborators of both screens, each call bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct Services {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherService>,
    pub hotels: Arc<dyn HotelDirectory>,
    pub backend: Arc<dyn ItineraryBackend>,
    pub timeout: Duration,
    pub hotel_radius_m: u32,
}

impl Services {
    /// Construct the HTTP-backed services from config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = http_client()?;

        // Weather is best-effort: without a key its lookups fail and are reported as such.
        let weather_key = config.api_key(ServiceId::OpenWeather).unwrap_or_else(|| {
            tracing::warn!(
                "no API key configured for service 'openweather'; \
                 run `itinero configure openweather` to enable weather"
            );
            ""
        });

        Ok(Self {
            geocoder: Arc::new(NominatimGeocoder::new(
                http.clone(),
                config.base_url(ServiceId::Nominatim)?,
            )),
            weather: Arc::new(OpenWeatherService::new(
                http.clone(),
                config.base_url(ServiceId::OpenWeather)?,
                weather_key.to_owned(),
            )),
            hotels: Arc::new(OverpassDirectory::new(
                http.clone(),
                config.base_url(ServiceId::Overpass)?,
            )),
            backend: Arc::new(BackendClient::new(http, config.base_url(ServiceId::Backend)?)),
            timeout: config.timeout(),
            hotel_radius_m: config.hotel_radius_m(),
        })
    }

    pub async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, ServiceError> {
        with_deadline(ServiceId::Nominatim, self.timeout, self.geocoder.geocode(query)).await
    }

    pub async fn current_weather(&self, at: Coordinates) -> Result<WeatherSnapshot, ServiceError> {
        with_deadline(ServiceId::OpenWeather, self.timeout, self.weather.current(at)).await
    }

    pub async fn hotels_near(&self, at: Coordinates) -> Result<Vec<HotelElement>, ServiceError> {
        with_deadline(
            ServiceId::Overpass,
            self.timeout,
            self.hotels.hotels_near(at, self.hotel_radius_m),
        )
        .await
    }

    pub async fn generate(
        &self,
        submission: &TripSubmission,
    ) -> Result<BackendResponse, ServiceError> {
        with_deadline(ServiceId::Backend, self.timeout, self.backend.generate(submission)).await
    }

    pub async fn download_pdf(&self, pdf_path: &str) -> Result<Vec<u8>, ServiceError> {
        with_deadline(ServiceId::Backend, self.timeout, self.backend.download_pdf(pdf_path)).await
    }
}

pub(crate) async fn with_deadline<T, F>(
    service: ServiceId,
    after: Duration,
    call: F,
) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    tokio::time::timeout(after, call)
        .await
        .map_err(|_| ServiceError::Timeout { service, after })?
}

pub(crate) fn http_client() -> anyhow::Result<Client> {
    // Nominatim and Overpass reject requests without an identifying agent.
    Client::builder()
        .user_agent(concat!("itinero/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Read the body, reject non-2xx statuses and decode JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: ServiceId,
    res: reqwest::Response,
) -> Result<T, ServiceError> {
    let body = read_body(service, res).await?;
    serde_json::from_slice(&body).map_err(|source| ServiceError::Decode { service, source })
}

pub(crate) async fn read_body(
    service: ServiceId,
    res: reqwest::Response,
) -> Result<Vec<u8>, ServiceError> {
    let status = res.status();
    let body = res.bytes().await.map_err(|source| ServiceError::Transport { service, source })?;

    if !status.is_success() {
        return Err(ServiceError::Status {
            service,
            status,
            body: truncate_body(&String::from_utf8_lossy(&body)),
        });
    }

    Ok(body.to_vec())
}

pub(crate) fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!("{}/{}", base.path().trim_end_matches('/'), path.trim_start_matches('/'));
    url.set_path(&joined);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{FakeGeocoder, fake_services};

    #[test]
    fn service_id_as_str_roundtrip() {
        for id in ServiceId::all() {
            let parsed = ServiceId::try_from(id.as_str()).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
        assert_eq!(ServiceId::try_from("OpenWeather").unwrap(), ServiceId::OpenWeather);
    }

    #[test]
    fn unknown_service_error() {
        let err = ServiceId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[tokio::test]
    async fn missing_weather_key_surfaces_as_lookup_error() {
        let cfg = Config::default();
        let services = Services::from_config(&cfg).expect("services should build without a key");

        let err = services
            .current_weather(Coordinates { latitude: 48.85, longitude: 2.35 })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::MissingCredentials { service: ServiceId::OpenWeather }));
        assert!(err.to_string().contains("itinero configure openweather"));
    }

    #[test]
    fn services_from_config_works_when_weather_key_set() {
        let mut cfg = Config::default();
        cfg.upsert_api_key(ServiceId::OpenWeather, "KEY".to_string());

        let services = Services::from_config(&cfg).expect("services should build");
        assert_eq!(services.timeout, Duration::from_secs(10));
        assert_eq!(services.hotel_radius_m, 5000);
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = Url::parse("https://example.org/api/").unwrap();
        assert_eq!(endpoint(&base, "search").as_str(), "https://example.org/api/search");

        let base = Url::parse("https://example.org").unwrap();
        assert_eq!(endpoint(&base, "/search").as_str(), "https://example.org/search");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let mut services = fake_services();
        services.geocoder = Arc::new(FakeGeocoder::found(48.85, 2.35).delayed(Duration::from_secs(30)));
        services.timeout = Duration::from_secs(10);

        let err = services.geocode("Paris").await.unwrap_err();
        assert!(matches!(err, ServiceError::Timeout { service: ServiceId::Nominatim, .. }));
    }
}
