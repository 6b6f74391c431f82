use anyhow::{Context, Result};
use std::{collections::HashMap, fs, path::Path};

pub const NO_REVIEW: &str = "No reviews available for this location";

const BUNDLED: &str = include_str!("../data/reviews.json");

/// Destination name to a short traveller review, keyed by exact name.
#[derive(Debug, Clone, Default)]
pub struct ReviewTable {
    reviews: HashMap<String, String>,
}

impl ReviewTable {
    pub fn from_json(contents: &str) -> Result<Self> {
        let reviews = serde_json::from_str(contents).context("Failed to parse review dataset")?;
        Ok(Self { reviews })
    }

    pub fn bundled() -> Self {
        Self::from_json(BUNDLED).unwrap_or_else(|err| {
            tracing::error!(error = %err, "bundled review dataset is unreadable");
            Self::default()
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read review dataset: {}", path.display()))?;
        Self::from_json(&contents)
    }

    /// Load once at start-up. A missing or broken file leaves the table empty.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        match path {
            None => Self::bundled(),
            Some(path) => Self::load(path).unwrap_or_else(|err| {
                tracing::warn!(error = %format!("{err:#}"), "error fetching reviews");
                Self::default()
            }),
        }
    }

    pub fn review_for(&self, destination: &str) -> &str {
        self.reviews.get(destination).map(String::as_str).unwrap_or(NO_REVIEW)
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
