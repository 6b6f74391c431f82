use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{error::ServiceError, model::Coordinates};

use super::{Geocoder, ServiceId, endpoint, read_json};

const SERVICE: ServiceId = ServiceId::Nominatim;

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: Url,
}

impl NominatimGeocoder {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

/// Nominatim reports coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, ServiceError> {
        let res = self
            .http
            .get(endpoint(&self.base_url, "search"))
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await
            .map_err(|source| ServiceError::Transport { service: SERVICE, source })?;

        let places: Vec<NmPlace> = read_json(SERVICE, res).await?;

        places.into_iter().next().map(to_coordinates).transpose()
    }
}

fn to_coordinates(place: NmPlace) -> Result<Coordinates, ServiceError> {
    Ok(Coordinates {
        latitude: parse_degrees(&place.lat)?,
        longitude: parse_degrees(&place.lon)?,
    })
}

fn parse_degrees(value: &str) -> Result<f64, ServiceError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ServiceError::InvalidCoordinate { service: SERVICE, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_candidate_is_parsed() {
        let places: Vec<NmPlace> = serde_json::from_str(
            r#"[{"lat":"48.8534951","lon":"2.3483915","display_name":"Paris"},
                {"lat":"33.66","lon":"-95.55","display_name":"Paris, Texas"}]"#,
        )
        .unwrap();

        let coords = places.into_iter().next().map(to_coordinates).transpose().unwrap().unwrap();
        assert!((coords.latitude - 48.8534951).abs() < 1e-9);
        assert!((coords.longitude - 2.3483915).abs() < 1e-9);
    }

    #[test]
    fn garbage_coordinate_is_an_error() {
        let err = to_coordinates(NmPlace { lat: "north".into(), lon: "2.0".into() }).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCoordinate { .. }));
        assert!(parse_degrees("NaN").is_err());
    }
}
