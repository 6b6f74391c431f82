//! In-memory stand-ins for the HTTP services.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    error::ServiceError,
    hotels::HotelElement,
    model::{BackendResponse, Coordinates, TripSubmission, WeatherSnapshot},
    provider::{Geocoder, HotelDirectory, ItineraryBackend, ServiceId, Services, WeatherService},
};

fn server_error(service: ServiceId) -> ServiceError {
    ServiceError::Status {
        service,
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".into(),
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(d) = delay {
        tokio::time::sleep(d).await;
    }
}

#[derive(Debug, Clone)]
enum GeoOutcome {
    Found(Coordinates),
    Empty,
    Fail,
}

#[derive(Debug)]
pub struct FakeGeocoder {
    outcome: GeoOutcome,
    places: HashMap<String, Coordinates>,
    delays: HashMap<String, Duration>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    fn with(outcome: GeoOutcome) -> Self {
        Self {
            outcome,
            places: HashMap::new(),
            delays: HashMap::new(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn found(latitude: f64, longitude: f64) -> Self {
        Self::with(GeoOutcome::Found(Coordinates { latitude, longitude }))
    }

    pub fn empty() -> Self {
        Self::with(GeoOutcome::Empty)
    }

    pub fn failing() -> Self {
        Self::with(GeoOutcome::Fail)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer `query` with its own point after `delay`.
    pub fn place(mut self, query: &str, latitude: f64, delay: Duration) -> Self {
        self.places.insert(query.to_string(), Coordinates { latitude, longitude: 0.0 });
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        pause(self.delays.get(query).copied().or(self.delay)).await;

        if let Some(c) = self.places.get(query) {
            return Ok(Some(*c));
        }
        match &self.outcome {
            GeoOutcome::Found(c) => Ok(Some(*c)),
            GeoOutcome::Empty => Ok(None),
            GeoOutcome::Fail => Err(server_error(ServiceId::Nominatim)),
        }
    }
}

#[derive(Debug)]
pub struct FakeWeather {
    snapshot: Option<WeatherSnapshot>,
    echo_latitude: bool,
    calls: AtomicUsize,
}

impl FakeWeather {
    pub fn ok(temperature_c: f64, description: &str) -> Self {
        Self {
            snapshot: Some(WeatherSnapshot { temperature_c, description: description.into() }),
            echo_latitude: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self { snapshot: None, echo_latitude: false, calls: AtomicUsize::new(0) }
    }

    /// Reports the queried latitude as the temperature.
    pub fn echo_latitude() -> Self {
        Self { snapshot: None, echo_latitude: true, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherService for FakeWeather {
    async fn current(&self, at: Coordinates) -> Result<WeatherSnapshot, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.echo_latitude {
            return Ok(WeatherSnapshot { temperature_c: at.latitude, description: "echo".into() });
        }
        self.snapshot.clone().ok_or_else(|| server_error(ServiceId::OpenWeather))
    }
}

#[derive(Debug)]
pub struct FakeHotels {
    elements: Option<Vec<HotelElement>>,
    calls: AtomicUsize,
    last_radius: Mutex<Option<u32>>,
}

impl FakeHotels {
    pub fn with_count(n: usize) -> Self {
        let elements = (0..n)
            .map(|i| HotelElement {
                name: Some(format!("Hotel {i}")),
                street: Some(format!("Rue {i}")),
            })
            .collect();
        Self { elements: Some(elements), calls: AtomicUsize::new(0), last_radius: Mutex::new(None) }
    }

    pub fn failing() -> Self {
        Self { elements: None, calls: AtomicUsize::new(0), last_radius: Mutex::new(None) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_radius(&self) -> Option<u32> {
        *self.last_radius.lock().unwrap()
    }
}

#[async_trait]
impl HotelDirectory for FakeHotels {
    async fn hotels_near(
        &self,
        _at: Coordinates,
        radius_m: u32,
    ) -> Result<Vec<HotelElement>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_radius.lock().unwrap() = Some(radius_m);
        self.elements.clone().ok_or_else(|| server_error(ServiceId::Overpass))
    }
}

#[derive(Debug)]
pub struct FakeBackend {
    response: Option<BackendResponse>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last: Mutex<Option<TripSubmission>>,
}

impl FakeBackend {
    pub fn ok(itinerary_text: &str, pdf_path: Option<&str>) -> Self {
        Self {
            response: Some(BackendResponse {
                itinerary_text: itinerary_text.into(),
                pdf_path: pdf_path.map(Into::into),
            }),
            delay: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self { response: None, delay: None, calls: AtomicUsize::new(0), last: Mutex::new(None) }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_submission(&self) -> Option<TripSubmission> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItineraryBackend for FakeBackend {
    async fn generate(&self, submission: &TripSubmission) -> Result<BackendResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(submission.clone());
        pause(self.delay).await;
        self.response.clone().ok_or_else(|| server_error(ServiceId::Backend))
    }

    async fn download_pdf(&self, _pdf_path: &str) -> Result<Vec<u8>, ServiceError> {
        Ok(b"%PDF-1.4 fake".to_vec())
    }

    fn pdf_download_url(&self, pdf_path: &str) -> Url {
        let mut url = Url::parse("https://backend.test/download_pdf").unwrap();
        url.query_pairs_mut().append_pair("path", pdf_path);
        url
    }
}

/// Paris at 22°C with six hotels and a two-day itinerary.
pub fn fake_services() -> Services {
    Services {
        geocoder: Arc::new(FakeGeocoder::found(48.8566, 2.3522)),
        weather: Arc::new(FakeWeather::ok(22.0, "clear sky")),
        hotels: Arc::new(FakeHotels::with_count(6)),
        backend: Arc::new(FakeBackend::ok(
            "Day 1:\nVisit Louvre\nDay 2:\nEiffel Tower",
            Some("/tmp/x.pdf"),
        )),
        timeout: Duration::from_secs(10),
        hotel_radius_m: 5000,
    }
}
