//! Meteogram city catalog loaded from `city_data.csv`.
//!
//! Rows are `eng_name,rus_name,url`; an optional header row is skipped.

use std::path::Path;

use tracing::{info, warn};

use super::StorageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeteogramCity {
    pub eng_name: String,
    pub rus_name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct MeteogramCatalog {
    cities: Vec<MeteogramCity>,
}

impl MeteogramCatalog {
    pub fn new(cities: Vec<MeteogramCity>) -> Self {
        Self { cities }
    }

    /// Load the catalog; a missing file yields an empty catalog.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            warn!("Meteogram catalog {} not found, meteograms disabled", path.display());
            return Ok(Self::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| StorageError::csv(path, e))?;

        let mut cities = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| StorageError::csv(path, e))?;
            if row.len() < 3 || row[0].trim().eq_ignore_ascii_case("eng_name") {
                continue;
            }
            cities.push(MeteogramCity {
                eng_name: row[0].trim().to_string(),
                rus_name: row[1].trim().to_string(),
                url: row[2].trim().to_string(),
            });
        }

        info!("Loaded {} meteogram cities", cities.len());
        Ok(Self { cities })
    }

    /// Case-insensitive match on either the Russian or the English name.
    pub fn find(&self, name: &str) -> Option<&MeteogramCity> {
        let name = name.trim().to_lowercase();
        self.cities
            .iter()
            .find(|c| c.rus_name.to_lowercase() == name || c.eng_name.to_lowercase() == name)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
