//! Destination enrichment shared by both screens.
//!
//! Every step is best-effort: a failure is logged and recorded, and whatever was
//! derived before it is kept. Dependent steps only run once geocoding produced
//! coordinates.

use crate::{
    error::{LookupFailure, LookupReason, LookupStage, ServiceError},
    hotels::HotelElement,
    model::{Coordinates, WeatherSnapshot},
    provider::Services,
    sequence::LookupTicket,
};

/// Outcome of geocode then weather for one destination value.
#[derive(Debug)]
pub struct DestinationLookup {
    pub ticket: LookupTicket,
    pub coordinates: Option<Coordinates>,
    pub weather: Option<WeatherSnapshot>,
    pub failures: Vec<LookupFailure>,
}

/// Outcome of geocode then hotel search for one destination value.
#[derive(Debug)]
pub struct HotelLookup {
    pub ticket: LookupTicket,
    pub coordinates: Option<Coordinates>,
    pub hotels: Option<Vec<HotelElement>>,
    pub failures: Vec<LookupFailure>,
}

pub async fn lookup_destination(services: &Services, ticket: LookupTicket) -> DestinationLookup {
    let mut out =
        DestinationLookup { ticket, coordinates: None, weather: None, failures: Vec::new() };
    let destination = out.ticket.destination().to_string();

    let coordinates = match locate(services, &destination).await {
        Ok(c) => c,
        Err(failure) => {
            out.failures.push(failure);
            return out;
        }
    };
    out.coordinates = Some(coordinates);

    match services.current_weather(coordinates).await {
        Ok(weather) => out.weather = Some(weather),
        Err(err) => out.failures.push(failed(LookupStage::Weather, &destination, err.into())),
    }

    out
}

pub async fn lookup_hotels(services: &Services, ticket: LookupTicket) -> HotelLookup {
    let mut out = HotelLookup { ticket, coordinates: None, hotels: None, failures: Vec::new() };
    let destination = out.ticket.destination().to_string();

    let coordinates = match locate(services, &destination).await {
        Ok(c) => c,
        Err(failure) => {
            out.failures.push(failure);
            return out;
        }
    };
    out.coordinates = Some(coordinates);

    match services.hotels_near(coordinates).await {
        Ok(hotels) => {
            tracing::debug!(destination = %destination, count = hotels.len(), "hotels found");
            out.hotels = Some(hotels);
        }
        Err(err) => out.failures.push(failed(LookupStage::Hotels, &destination, err.into())),
    }

    out
}

async fn locate(services: &Services, destination: &str) -> Result<Coordinates, LookupFailure> {
    match services.geocode(destination).await {
        Ok(Some(coordinates)) => Ok(coordinates),
        Ok(None) => Err(failed(LookupStage::Geocode, destination, LookupReason::NoMatch)),
        Err(err) => Err(failed(LookupStage::Geocode, destination, err.into())),
    }
}

fn failed(stage: LookupStage, destination: &str, reason: LookupReason) -> LookupFailure {
    let failure = LookupFailure { stage, destination: destination.to_string(), reason };
    match &failure.reason {
        LookupReason::NoMatch => tracing::warn!(%stage, destination, "no location data found"),
        LookupReason::Service(err) => log_service_error(stage, destination, err),
    }
    failure
}

fn log_service_error(stage: LookupStage, destination: &str, err: &ServiceError) {
    tracing::warn!(%stage, destination, service = %err.service(), error = %err, "lookup failed");
}
