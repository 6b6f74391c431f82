use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format the itinerary backend expects in a submission.
pub const BACKEND_DATE_FORMAT: &str = "%d-%m-%Y";

/// Date format the form collects.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TripType {
    #[default]
    Solo,
    Family,
    Friends,
    Business,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Solo => "Solo",
            TripType::Family => "Family",
            TripType::Friends => "Friends",
            TripType::Business => "Business",
        }
    }

    pub const fn all() -> &'static [TripType] {
        &[TripType::Solo, TripType::Family, TripType::Friends, TripType::Business]
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TripType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "solo" => Ok(TripType::Solo),
            "family" => Ok(TripType::Family),
            "friends" => Ok(TripType::Friends),
            "business" => Ok(TripType::Business),
            _ => Err(anyhow::anyhow!(
                "Unknown trip type '{value}'. Supported trip types: solo, family, friends, business."
            )),
        }
    }
}

/// The form as the user is filling it in. Dates stay optional until submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripRequest {
    pub source: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: String,
    pub trip_type: TripType,
    pub preferences: String,
}

/// Body posted to the itinerary backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSubmission {
    pub source: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub trip_type: TripType,
    pub preferences: String,
}

impl TripSubmission {
    pub fn new(request: &TripRequest, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            source: request.source.clone(),
            destination: request.destination.clone(),
            start_date: backend_date(start),
            end_date: backend_date(end),
            budget: request.budget.clone(),
            trip_type: request.trip_type,
            preferences: request.preferences.clone(),
        }
    }
}

/// `2025-07-04` becomes `04-07-2025`.
pub fn backend_date(date: NaiveDate) -> String {
    date.format(BACKEND_DATE_FORMAT).to_string()
}

pub fn parse_form_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), FORM_DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub description: String,
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C, {}", self.temperature_c, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendResponse {
    pub itinerary_text: String,
    #[serde(default)]
    pub pdf_path: Option<String>,
}

/// Everything the form hands to the itinerary screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPayload {
    #[serde(flatten)]
    pub request: TripRequest,
    pub itinerary: Option<String>,
    pub pdf_path: Option<String>,
}

impl NavigationPayload {
    pub fn new(request: TripRequest, response: BackendResponse) -> Self {
        Self {
            request,
            itinerary: Some(response.itinerary_text),
            pdf_path: response.pdf_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_form_date(s).unwrap()
    }

    #[test]
    fn backend_date_swaps_day_and_year() {
        assert_eq!(backend_date(date("2025-07-04")), "04-07-2025");
        assert_eq!(backend_date(date("2025-12-31")), "31-12-2025");
        assert_eq!(backend_date(date("2024-01-09")), "09-01-2024");
    }

    #[test]
    fn parse_form_date_rejects_other_layouts() {
        assert!(parse_form_date("04-07-2025").is_err());
        assert!(parse_form_date("").is_err());
    }

    #[test]
    fn trip_type_parses_case_insensitively() {
        assert_eq!(TripType::try_from("FAMILY").unwrap(), TripType::Family);
        assert!(TripType::try_from("couple").is_err());
        for t in TripType::all() {
            assert_eq!(TripType::try_from(t.as_str()).unwrap(), *t);
        }
    }

    #[test]
    fn submission_serializes_with_form_keys() {
        let request = TripRequest {
            source: "Mumbai".into(),
            destination: "Paris".into(),
            budget: "50000".into(),
            trip_type: TripType::Solo,
            preferences: "museums".into(),
            ..TripRequest::default()
        };
        let submission = TripSubmission::new(&request, date("2025-09-01"), date("2025-09-05"));
        let json = serde_json::to_value(&submission).unwrap();

        assert_eq!(json["startDate"], "01-09-2025");
        assert_eq!(json["endDate"], "05-09-2025");
        assert_eq!(json["tripType"], "Solo");
        assert_eq!(json["destination"], "Paris");
    }

    #[test]
    fn weather_line_drops_trailing_zero() {
        let w = WeatherSnapshot { temperature_c: 22.0, description: "clear sky".into() };
        assert_eq!(w.to_string(), "22°C, clear sky");

        let w = WeatherSnapshot { temperature_c: 18.4, description: "mist".into() };
        assert_eq!(w.to_string(), "18.4°C, mist");
    }

    #[test]
    fn payload_flattens_form_fields() {
        let payload = NavigationPayload::new(
            TripRequest { destination: "Goa".into(), ..TripRequest::default() },
            BackendResponse { itinerary_text: "Day 1:\nBeach".into(), pdf_path: None },
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["destination"], "Goa");
        assert_eq!(json["itinerary"], "Day 1:\nBeach");

        let back: NavigationPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }
}
