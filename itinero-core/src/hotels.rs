//! Hotel listings shown on the itinerary screen.
//!
//! The directory only knows names and street addresses. Ratings and images are
//! placeholders: one shared picture, and a rating drawn uniformly from `[3.0, 5.0]`.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const UNNAMED_HOTEL: &str = "Unnamed Hotel";
pub const NO_ADDRESS: &str = "Address not available";
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://res.cloudinary.com/dafdencvh/image/upload/v1743315392/tagckawes9yy0h2ohtdr.jpg";

/// Listings always visible before "show more".
pub const VISIBLE_HOTELS: usize = 4;

/// A raw directory hit. Either tag may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelElement {
    pub name: Option<String>,
    pub street: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelListing {
    pub name: String,
    pub address: String,
    /// One fractional digit.
    pub rating: f64,
    pub image_url: String,
}

impl HotelListing {
    pub fn from_element<R: Rng>(element: HotelElement, rng: &mut R) -> Self {
        Self {
            name: element
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNNAMED_HOTEL.to_string()),
            address: element
                .street
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| NO_ADDRESS.to_string()),
            rating: placeholder_rating(rng),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

pub fn listings_from<R: Rng>(elements: Vec<HotelElement>, rng: &mut R) -> Vec<HotelListing> {
    elements.into_iter().map(|e| HotelListing::from_element(e, rng)).collect()
}

fn placeholder_rating<R: Rng>(rng: &mut R) -> f64 {
    let raw: f64 = rng.gen_range(3.0..=5.0);
    (raw * 10.0).round() / 10.0
}

/// The first few listings plus a collapsible remainder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelPanel {
    listings: Vec<HotelListing>,
    expanded: bool,
}

impl HotelPanel {
    pub fn new(listings: Vec<HotelListing>) -> Self {
        Self { listings, expanded: false }
    }

    pub fn all(&self) -> &[HotelListing] {
        &self.listings
    }

    pub fn featured(&self) -> &[HotelListing] {
        &self.listings[..self.listings.len().min(VISIBLE_HOTELS)]
    }

    /// Listings past the featured set; empty while collapsed.
    pub fn more(&self) -> &[HotelListing] {
        if self.expanded { self.overflow() } else { &[] }
    }

    pub fn overflow(&self) -> &[HotelListing] {
        &self.listings[self.listings.len().min(VISIBLE_HOTELS)..]
    }

    pub fn has_more(&self) -> bool {
        self.listings.len() > VISIBLE_HOTELS
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Label of the toggle, when one is offered at all.
    pub fn toggle_label(&self) -> Option<&'static str> {
        self.has_more().then_some(if self.expanded { "Show Less" } else { "View More Hotels" })
    }
}
