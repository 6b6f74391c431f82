//! The trip form: field updates, destination enrichment and submission.

use chrono::NaiveDate;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    error::{LookupFailure, SubmitError, ValidationError},
    lookup::{DestinationLookup, lookup_destination},
    model::{Coordinates, NavigationPayload, TripRequest, TripSubmission, TripType, WeatherSnapshot},
    provider::Services,
    reviews::ReviewTable,
    route::{Navigation, Route},
    sequence::{LookupTicket, RequestSequencer},
};

pub const NO_MAP: &str = "Enter a destination to see the map.";

/// Set while a submission is in flight. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Label of the submit trigger for the current state.
    pub fn label(&self) -> &'static str {
        if self.is_busy() { "Generating..." } else { "Generate Itinerary" }
    }
}

/// Clears the flag on every exit path, including a dropped future.
struct BusyGuard(BusyFlag);

impl BusyGuard {
    fn engage(flag: &BusyFlag) -> Self {
        flag.0.store(true, Ordering::SeqCst);
        Self(flag.clone())
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct PlanTrip {
    services: Services,
    reviews: ReviewTable,
    form: TripRequest,
    coordinates: Option<Coordinates>,
    weather: Option<WeatherSnapshot>,
    review: String,
    failures: Vec<LookupFailure>,
    sequencer: RequestSequencer,
    busy: BusyFlag,
}

impl PlanTrip {
    pub fn new(services: Services, reviews: ReviewTable) -> Self {
        let review = reviews.review_for("").to_string();
        Self {
            services,
            reviews,
            form: TripRequest::default(),
            coordinates: None,
            weather: None,
            review,
            failures: Vec::new(),
            sequencer: RequestSequencer::default(),
            busy: BusyFlag::default(),
        }
    }

    pub fn form(&self) -> &TripRequest {
        &self.form
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn set_source(&mut self, value: impl Into<String>) {
        self.form.source = value.into();
    }

    pub fn set_start_date(&mut self, value: Option<NaiveDate>) {
        self.form.start_date = value;
    }

    pub fn set_end_date(&mut self, value: Option<NaiveDate>) {
        self.form.end_date = value;
    }

    pub fn set_budget(&mut self, value: impl Into<String>) {
        self.form.budget = value.into();
    }

    pub fn set_trip_type(&mut self, value: TripType) {
        self.form.trip_type = value;
    }

    pub fn set_preferences(&mut self, value: impl Into<String>) {
        self.form.preferences = value.into();
    }

    /// Store the destination and re-derive everything that hangs off it.
    ///
    /// The review updates immediately. Coordinates and weather are cleared; the
    /// returned ticket drives the lookup that refills them. An empty destination
    /// yields no ticket, but still invalidates lookups already in flight.
    pub fn set_destination(&mut self, value: impl Into<String>) -> Option<LookupTicket> {
        self.form.destination = value.into();
        self.review = self.reviews.review_for(&self.form.destination).to_string();
        self.coordinates = None;
        self.weather = None;
        self.failures.clear();

        let ticket = self.sequencer.issue(&self.form.destination);
        (!self.form.destination.is_empty()).then_some(ticket)
    }

    /// Write a finished lookup back, unless a newer destination superseded it.
    pub fn apply_lookup(&mut self, lookup: DestinationLookup) -> bool {
        if !self.sequencer.is_current(&lookup.ticket) {
            tracing::debug!(
                destination = lookup.ticket.destination(),
                "discarding stale destination lookup"
            );
            return false;
        }

        self.coordinates = lookup.coordinates;
        self.weather = lookup.weather;
        self.failures = lookup.failures;
        true
    }

    /// `set_destination`, then run and apply its lookup.
    pub async fn update_destination(&mut self, value: impl Into<String>) {
        if let Some(ticket) = self.set_destination(value) {
            let lookup = lookup_destination(&self.services, ticket).await;
            self.apply_lookup(lookup);
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn lookup_failures(&self) -> &[LookupFailure] {
        &self.failures
    }

    /// `Weather in Paris: 22°C, clear sky`, once a destination is entered.
    pub fn weather_line(&self) -> Option<String> {
        if self.form.destination.is_empty() {
            return None;
        }
        let weather = match &self.weather {
            Some(w) => w.to_string(),
            None => "unavailable".to_string(),
        };
        Some(format!("Weather in {}: {weather}", self.form.destination))
    }

    pub fn map_line(&self) -> String {
        match self.coordinates {
            Some(c) => format!("{} @ {c}", self.form.destination),
            None => NO_MAP.to_string(),
        }
    }

    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Validate, post the trip and, on success, navigate to the itinerary screen.
    pub async fn submit(&mut self) -> Result<Navigation, SubmitError> {
        let (Some(start), Some(end)) = (self.form.start_date, self.form.end_date) else {
            tracing::warn!("submission blocked: start or end date missing");
            return Err(ValidationError::MissingDates.into());
        };

        let _busy = BusyGuard::engage(&self.busy);
        let submission = TripSubmission::new(&self.form, start, end);

        let response = self.services.generate(&submission).await.map_err(|err| {
            tracing::error!(error = %err, "itinerary generation failed");
            SubmitError::Submission(err)
        })?;

        tracing::info!(
            destination = %self.form.destination,
            has_pdf = response.pdf_path.is_some(),
            "itinerary generated"
        );

        Ok(Navigation::with_payload(
            Route::Itinerary,
            NavigationPayload::new(self.form.clone(), response),
        ))
    }
}
