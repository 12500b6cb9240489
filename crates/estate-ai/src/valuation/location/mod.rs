//! Location summaries backed by an injected data source.
//!
//! Lookups are deterministic: the same location name always resolves to the
//! same record, or to `NotFound` when the source has no entry for it.

mod catalog;

pub use catalog::{CatalogError, LocationCatalog};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{InputConstraint, ValuationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysisRequest {
    pub location: String,
}

/// Neighborhood overview returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    pub location: String,
    pub safety_rating: f64,
    pub schools: Vec<String>,
    pub transport: Vec<String>,
    pub summary: String,
}

/// Backing store for location summaries. Keys are trimmed and lowercased.
pub trait LocationDataSource: Send + Sync {
    fn lookup(&self, key: &str) -> Result<Option<LocationAnalysis>, LocationSourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationSourceError {
    #[error("location source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error(transparent)]
    Invalid(#[from] ValuationError),
    #[error("no location data for '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Source(#[from] LocationSourceError),
}

pub struct LocationAnalyzer<S> {
    source: S,
}

impl<S> LocationAnalyzer<S>
where
    S: LocationDataSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn analyze(
        &self,
        request: &LocationAnalysisRequest,
    ) -> Result<LocationAnalysis, LocationError> {
        let key = location_key(&request.location);
        if key.is_empty() {
            return Err(ValuationError::invalid("location", InputConstraint::Empty).into());
        }

        let analysis = self
            .source
            .lookup(&key)?
            .ok_or_else(|| LocationError::NotFound(request.location.trim().to_string()))?;

        debug!(location = %analysis.location, "location analysis resolved");
        Ok(analysis)
    }
}

pub(crate) fn location_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}
