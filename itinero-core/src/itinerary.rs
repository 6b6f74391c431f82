//! Splits the backend's free-text itinerary into days.
//!
//! The backend marks each day with `Day <n>:` and nothing else. Text before the first
//! marker is dropped; everything after a marker up to the next one belongs to that day.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const NO_ACTIVITIES: &str = "No activities specified.";
pub const NO_ITINERARY: &str = "No itinerary generated.";

static DAY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Day \d+:").expect("day marker pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaywiseSegment {
    /// The marker itself, e.g. `Day 3:`.
    pub day: String,
    pub activities: String,
}

impl DaywiseSegment {
    /// One entry per non-blank line of the day's text, in order.
    pub fn steps(&self) -> Vec<&str> {
        self.activities.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
    }
}

pub fn parse_daywise(text: &str) -> Vec<DaywiseSegment> {
    let markers: Vec<_> = DAY_MARKER.find_iter(text).collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            let body = text[marker.end()..end].trim();

            DaywiseSegment {
                day: marker.as_str().trim().to_string(),
                activities: if body.is_empty() { NO_ACTIVITIES.to_string() } else { body.to_string() },
            }
        })
        .collect()
}
