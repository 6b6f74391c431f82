use std::time::Duration;

use crate::provider::ServiceId;

/// Failure of a single outbound call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{service}: request failed: {source}")]
    Transport {
        service: ServiceId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service}: request failed with status {status}: {body}")]
    Status {
        service: ServiceId,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{service}: failed to parse response: {source}")]
    Decode {
        service: ServiceId,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service}: invalid coordinate '{value}'")]
    InvalidCoordinate { service: ServiceId, value: String },

    #[error("{service}: no response within {after:?}")]
    Timeout { service: ServiceId, after: Duration },

    #[error("{service}: no API key configured (run `itinero configure {service}`)")]
    MissingCredentials { service: ServiceId },
}

impl ServiceError {
    pub fn service(&self) -> ServiceId {
        match self {
            ServiceError::Transport { service, .. }
            | ServiceError::Status { service, .. }
            | ServiceError::Decode { service, .. }
            | ServiceError::InvalidCoordinate { service, .. }
            | ServiceError::Timeout { service, .. }
            | ServiceError::MissingCredentials { service } => *service,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    Geocode,
    Weather,
    Hotels,
}

impl std::fmt::Display for LookupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LookupStage::Geocode => "geocode",
            LookupStage::Weather => "weather",
            LookupStage::Hotels => "hotels",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupReason {
    #[error("no matching location")]
    NoMatch,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// An enrichment lookup that left its derived field unset.
///
/// These are recorded on the view and logged; they never reach the user as an error.
#[derive(Debug, thiserror::Error)]
#[error("{stage} lookup for '{destination}' failed: {reason}")]
pub struct LookupFailure {
    pub stage: LookupStage,
    pub destination: String,
    #[source]
    pub reason: LookupReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select both start and end dates.")]
    MissingDates,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to connect to backend.")]
    Submission(#[source] ServiceError),
}

impl SubmitError {
    /// Text for the blocking notice shown to the user.
    pub fn notice(&self) -> String {
        self.to_string()
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
