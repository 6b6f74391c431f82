use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;

use crate::{error::ServiceError, hotels::HotelElement, model::Coordinates};

use super::{HotelDirectory, ServiceId, endpoint, read_json};

const SERVICE: ServiceId = ServiceId::Overpass;

#[derive(Debug, Clone)]
pub struct OverpassDirectory {
    http: Client,
    base_url: Url,
}

impl OverpassDirectory {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

#[derive(Debug, Deserialize)]
struct OpElement {
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OpResponse {
    #[serde(default)]
    elements: Vec<OpElement>,
}

impl From<OpElement> for HotelElement {
    fn from(mut element: OpElement) -> Self {
        HotelElement {
            name: element.tags.remove("name"),
            street: element.tags.remove("addr:street"),
        }
    }
}

/// Overpass QL for hotel nodes, ways and relations within `radius_m` of `at`.
pub fn hotel_query(at: Coordinates, radius_m: u32) -> String {
    let around = format!("around:{radius_m},{},{}", at.latitude, at.longitude);
    format!(
        "[out:json];\n(\n  node[\"tourism\"=\"hotel\"]({around});\n  way[\"tourism\"=\"hotel\"]({around});\n  relation[\"tourism\"=\"hotel\"]({around});\n);\nout center;\n"
    )
}

#[async_trait]
impl HotelDirectory for OverpassDirectory {
    async fn hotels_near(
        &self,
        at: Coordinates,
        radius_m: u32,
    ) -> Result<Vec<HotelElement>, ServiceError> {
        let res = self
            .http
            .get(endpoint(&self.base_url, "api/interpreter"))
            .query(&[("data", hotel_query(at, radius_m))])
            .send()
            .await
            .map_err(|source| ServiceError::Transport { service: SERVICE, source })?;

        let parsed: OpResponse = read_json(SERVICE, res).await?;

        Ok(parsed.elements.into_iter().map(HotelElement::from).collect())
    }
}
