//! Core library for the `itinero` trip planner.
//!
//! This crate defines:
//! - The trip form orchestrator (`plan_trip`) and the itinerary screen (`presenter`)
//! - Clients for geocoding, weather, hotel directory and itinerary backend services
//! - Parsing of the backend's day-by-day itinerary text
//! - Configuration & credentials handling
//!
//! It is used by `itinero-cli`, but holds no terminal I/O of its own.

pub mod config;
pub mod error;
pub mod hotels;
pub mod itinerary;
pub mod lookup;
pub mod model;
pub mod plan_trip;
pub mod presenter;
pub mod provider;
pub mod reviews;
pub mod route;
pub mod sequence;

#[cfg(test)]
mod testing;

pub use config::{Config, ServiceConfig};
pub use error::{LookupFailure, ServiceError, SubmitError, ValidationError};
pub use hotels::{HotelListing, HotelPanel};
pub use itinerary::{DaywiseSegment, parse_daywise};
pub use model::{
    BackendResponse, Coordinates, NavigationPayload, TripRequest, TripSubmission, TripType,
    WeatherSnapshot,
};
pub use plan_trip::PlanTrip;
pub use presenter::ItineraryView;
pub use provider::{ServiceId, Services};
pub use reviews::ReviewTable;
pub use route::{Navigation, Route};
