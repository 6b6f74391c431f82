use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    error::ServiceError,
    model::{BackendResponse, TripSubmission},
};

use super::{ItineraryBackend, ServiceId, endpoint, read_body, read_json};

const SERVICE: ServiceId = ServiceId::Backend;

/// Client for the itinerary generation service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl ItineraryBackend for BackendClient {
    async fn generate(&self, submission: &TripSubmission) -> Result<BackendResponse, ServiceError> {
        tracing::info!(destination = %submission.destination, "submitting trip to backend");

        let res = self
            .http
            .post(endpoint(&self.base_url, "generate_itinerary"))
            .json(submission)
            .send()
            .await
            .map_err(|source| ServiceError::Transport { service: SERVICE, source })?;

        read_json(SERVICE, res).await
    }

    async fn download_pdf(&self, pdf_path: &str) -> Result<Vec<u8>, ServiceError> {
        let res = self
            .http
            .get(self.pdf_download_url(pdf_path))
            .send()
            .await
            .map_err(|source| ServiceError::Transport { service: SERVICE, source })?;

        read_body(SERVICE, res).await
    }

    fn pdf_download_url(&self, pdf_path: &str) -> Url {
        let mut url = endpoint(&self.base_url, "download_pdf");
        url.query_pairs_mut().append_pair("path", pdf_path);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn download_url_carries_the_pdf_path() {
        let url = client("https://backend.example").pdf_download_url("/tmp/x.pdf");
        assert_eq!(url.path(), "/download_pdf");

        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "path");
        assert_eq!(value, "/tmp/x.pdf");
    }

    #[test]
    fn different_paths_give_different_urls() {
        let backend = client("https://backend.example/v1/");
        let a = backend.pdf_download_url("itinerary.pdf");
        let b = backend.pdf_download_url("other.pdf");

        assert_ne!(a, b);
        assert_eq!(a.path(), "/v1/download_pdf");
    }

    #[test]
    fn response_without_pdf_path_decodes() {
        let parsed: BackendResponse =
            serde_json::from_str(r#"{"itinerary_text":"Day 1:\nArrive"}"#).unwrap();
        assert_eq!(parsed.pdf_path, None);

        let parsed: BackendResponse =
            serde_json::from_str(r#"{"itinerary_text":"","pdf_path":"itinerary.pdf"}"#).unwrap();
        assert_eq!(parsed.pdf_path.as_deref(), Some("itinerary.pdf"));
    }
}
