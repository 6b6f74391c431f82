//! The itinerary screen.
//!
//! Built from whatever the form handed over, which may be nothing at all when the
//! screen is reached directly. Every accessor then falls back to a display default.

use rand::Rng;
use reqwest::Url;

use crate::{
    error::LookupFailure,
    hotels::{HotelPanel, listings_from},
    itinerary::{DaywiseSegment, NO_ITINERARY, parse_daywise},
    lookup::{HotelLookup, lookup_hotels},
    model::{Coordinates, NavigationPayload},
    provider::Services,
    route::{Navigation, Route},
    sequence::{LookupTicket, RequestSequencer},
};

pub const UNKNOWN_DESTINATION: &str = "Unknown Destination";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE_SPECIFIED: &str = "None specified";

#[derive(Debug, Default)]
pub struct ItineraryView {
    payload: Option<NavigationPayload>,
    segments: Vec<DaywiseSegment>,
    hotels: HotelPanel,
    coordinates: Option<Coordinates>,
    failures: Vec<LookupFailure>,
    sequencer: RequestSequencer,
}

impl ItineraryView {
    pub fn new(payload: Option<NavigationPayload>) -> Self {
        let segments = payload
            .as_ref()
            .and_then(|p| p.itinerary.as_deref())
            .map(parse_daywise)
            .unwrap_or_default();

        Self { payload, segments, ..Self::default() }
    }

    /// Mount from a navigation, consuming its payload.
    pub fn from_navigation(navigation: &mut Navigation) -> Self {
        Self::new(navigation.take_payload())
    }

    pub fn payload(&self) -> Option<&NavigationPayload> {
        self.payload.as_ref()
    }

    fn carried_destination(&self) -> Option<&str> {
        self.payload.as_ref().map(|p| p.request.destination.as_str()).filter(|d| !d.is_empty())
    }

    pub fn destination(&self) -> &str {
        self.carried_destination().unwrap_or(UNKNOWN_DESTINATION)
    }

    pub fn budget(&self) -> String {
        match self.payload.as_ref().map(|p| p.request.budget.trim()) {
            Some(budget) if !budget.is_empty() => format!("Rs {budget}"),
            _ => NOT_SPECIFIED.to_string(),
        }
    }

    pub fn trip_type(&self) -> &str {
        self.payload.as_ref().map_or(NOT_SPECIFIED, |p| p.request.trip_type.as_str())
    }

    pub fn preferences(&self) -> &str {
        self.payload
            .as_ref()
            .map(|p| p.request.preferences.trim())
            .filter(|p| !p.is_empty())
            .unwrap_or(NONE_SPECIFIED)
    }

    pub fn segments(&self) -> &[DaywiseSegment] {
        &self.segments
    }

    /// Shown in place of the day list when there is nothing to list.
    pub fn itinerary_notice(&self) -> Option<&'static str> {
        self.segments.is_empty().then_some(NO_ITINERARY)
    }

    pub fn hotels(&self) -> &HotelPanel {
        &self.hotels
    }

    pub fn toggle_more_hotels(&mut self) {
        self.hotels.toggle();
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn lookup_failures(&self) -> &[LookupFailure] {
        &self.failures
    }

    /// Download link, offered only when the backend reported a PDF.
    pub fn pdf_download(&self, services: &Services) -> Option<Url> {
        let path = self.payload.as_ref()?.pdf_path.as_deref()?;
        Some(services.backend.pdf_download_url(path))
    }

    /// "Generate new itinerary" goes back to the form.
    pub fn generate_new(&self) -> Navigation {
        Navigation::to(Route::PlanTrip)
    }

    /// Ticket for the hotel lookup of the carried destination, if there is one.
    pub fn begin_hotel_lookup(&mut self) -> Option<LookupTicket> {
        let destination = self.carried_destination()?.to_string();
        Some(self.sequencer.issue(&destination))
    }

    pub fn apply_hotels<R: Rng>(&mut self, lookup: HotelLookup, rng: &mut R) -> bool {
        if !self.sequencer.is_current(&lookup.ticket) {
            tracing::debug!(
                destination = lookup.ticket.destination(),
                "discarding stale hotel lookup"
            );
            return false;
        }

        self.coordinates = lookup.coordinates;
        self.failures = lookup.failures;
        if let Some(elements) = lookup.hotels {
            self.hotels = HotelPanel::new(listings_from(elements, rng));
        }
        true
    }

    pub async fn load_hotels(&mut self, services: &Services) {
        let Some(ticket) = self.begin_hotel_lookup() else {
            return;
        };
        let lookup = lookup_hotels(services, ticket).await;
        self.apply_hotels(lookup, &mut rand::thread_rng());
    }
}
