use estate_ai::valuation::{CatalogError, LocationCatalog, PropertyType};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads the catalog at `path`, or the bundled catalog when no path is configured.
pub(crate) fn load_location_catalog(path: Option<&Path>) -> Result<LocationCatalog, CatalogError> {
    let catalog = match path {
        Some(path) => LocationCatalog::from_path(path)?,
        None => LocationCatalog::bundled()?,
    };
    info!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "bundled".to_string()),
        locations = catalog.len(),
        "location catalog loaded"
    );
    Ok(catalog)
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    raw.parse::<PropertyType>().map_err(|err| err.to_string())
}
