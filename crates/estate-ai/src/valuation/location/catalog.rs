use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{location_key, LocationAnalysis, LocationDataSource, LocationSourceError};

const BUNDLED_CATALOG: &str = include_str!("../../../data/locations.csv");
const LIST_SEPARATOR: char = ';';

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read location catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid location catalog data: {0}")]
    Csv(#[from] csv::Error),
    #[error("location catalog row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// In-memory location summaries keyed by case-folded name.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    entries: HashMap<String, LocationAnalysis>,
}

impl LocationCatalog {
    /// Catalog compiled into the crate, covering a handful of demo markets.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_CATALOG.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = HashMap::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            // header occupies line 1
            let row_number = index + 2;
            let row = record?;
            let analysis = row.into_analysis(row_number)?;
            let key = location_key(&analysis.location);
            if entries.contains_key(&key) {
                return Err(CatalogError::InvalidRow {
                    row: row_number,
                    reason: format!("duplicate location '{}'", analysis.location),
                });
            }
            entries.insert(key, analysis);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names, sorted.
    pub fn locations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .values()
            .map(|entry| entry.location.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl LocationDataSource for LocationCatalog {
    fn lookup(&self, key: &str) -> Result<Option<LocationAnalysis>, LocationSourceError> {
        Ok(self.entries.get(key).cloned())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    location: String,
    safety_rating: f64,
    #[serde(default)]
    schools: String,
    #[serde(default)]
    transport: String,
    #[serde(default)]
    summary: String,
}

impl CatalogRow {
    fn into_analysis(self, row: usize) -> Result<LocationAnalysis, CatalogError> {
        if self.location.is_empty() {
            return Err(CatalogError::InvalidRow {
                row,
                reason: "location is empty".to_string(),
            });
        }
        if !(0.0..=10.0).contains(&self.safety_rating) {
            return Err(CatalogError::InvalidRow {
                row,
                reason: format!(
                    "safety_rating {} is outside 0.0..=10.0",
                    self.safety_rating
                ),
            });
        }

        Ok(LocationAnalysis {
            location: self.location,
            safety_rating: self.safety_rating,
            schools: split_list(&self.schools),
            transport: split_list(&self.transport),
            summary: self.summary,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
