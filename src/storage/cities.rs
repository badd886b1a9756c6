//! City preference store.
//!
//! `cities.csv` holds one `user_id,city` row per identity. Saves rewrite the
//! whole file (last write wins); reads go through a cache first.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use super::{StorageError, blocking};
use crate::cache::{CacheConfig, CacheRegistry, TypedCache};
use crate::models::Identity;

/// Durable identity -> city mapping.
#[async_trait]
pub trait CityStore: Send + Sync {
    async fn load_city(&self, identity: Identity) -> Result<Option<String>, StorageError>;

    async fn save_city(&self, identity: Identity, city: &str) -> Result<(), StorageError>;
}

pub struct CsvCityStore {
    file: Arc<CityFile>,
    cache: TypedCache<Identity, String>,
}

/// The file itself. Only touched from blocking tasks.
struct CityFile {
    path: PathBuf,
    /// Serialises read-modify-write of the file.
    write_lock: Mutex<()>,
}

impl CsvCityStore {
    pub fn new(path: impl Into<PathBuf>, caches: &CacheRegistry) -> Self {
        Self {
            file: Arc::new(CityFile {
                path: path.into(),
                write_lock: Mutex::new(()),
            }),
            cache: caches.get_or_create("cities", CacheConfig::preferences()),
        }
    }
}

impl CityFile {
    fn load(&self, identity: Identity) -> Result<Option<String>, StorageError> {
        Ok(read_rows(&self.path)?.remove(&identity.0))
    }

    fn save(&self, identity: Identity, city: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut rows = read_rows(&self.path)?;
        rows.insert(identity.0, city.to_string());
        self.write_all(&rows)
    }

    fn write_all(&self, rows: &BTreeMap<u64, String>) -> Result<(), StorageError> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(|e| StorageError::csv(&self.path, e))?;
        writer
            .write_record(["user_id", "city"])
            .map_err(|e| StorageError::csv(&self.path, e))?;
        for (id, city) in rows {
            writer
                .write_record([id.to_string().as_str(), city.as_str()])
                .map_err(|e| StorageError::csv(&self.path, e))?;
        }
        writer.flush().map_err(|e| StorageError::io(&self.path, e))
    }
}

fn read_rows(path: &Path) -> Result<BTreeMap<u64, String>, StorageError> {
    let mut rows = BTreeMap::new();
    if !path.exists() {
        return Ok(rows);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StorageError::csv(path, e))?;

    for record in reader.records() {
        let record = record.map_err(|e| StorageError::csv(path, e))?;
        if record.len() != 2 {
            continue;
        }
        if let Ok(id) = record[0].trim().parse::<u64>() {
            rows.insert(id, record[1].to_string());
        }
    }
    Ok(rows)
}

#[async_trait]
impl CityStore for CsvCityStore {
    async fn load_city(&self, identity: Identity) -> Result<Option<String>, StorageError> {
        if let Some(city) = self.cache.get(&identity) {
            return Ok(Some(city));
        }

        let file = Arc::clone(&self.file);
        let city = blocking(move || file.load(identity)).await?;
        if let Some(city) = &city {
            self.cache.insert(identity, city.clone());
        }
        Ok(city)
    }

    async fn save_city(&self, identity: Identity, city: &str) -> Result<(), StorageError> {
        let city = city.trim().to_string();
        let file = Arc::clone(&self.file);
        let saved = city.clone();
        blocking(move || file.save(identity, &saved)).await?;

        debug!(%identity, city = %city, "Saved city preference");
        self.cache.insert(identity, city);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_means_no_city() {
        let dir = tempdir().unwrap();
        let store = CsvCityStore::new(dir.path().join("cities.csv"), &CacheRegistry::new());
        assert_eq!(store.load_city(Identity(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_last_write_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        let store = CsvCityStore::new(&path, &CacheRegistry::new());

        store.save_city(Identity(1), "  Москва ").await.unwrap();
        store.save_city(Identity(2), "Казань").await.unwrap();
        store.save_city(Identity(1), "Тверь").await.unwrap();

        // Fresh store with an empty cache reads from disk.
        let reopened = CsvCityStore::new(&path, &CacheRegistry::new());
        assert_eq!(reopened.load_city(Identity(1)).await.unwrap().as_deref(), Some("Тверь"));
        assert_eq!(reopened.load_city(Identity(2)).await.unwrap().as_deref(), Some("Казань"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("user_id,city"));
        assert_eq!(contents.lines().count(), 3);
    }

    #[tokio::test]
    async fn cities_with_commas_survive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        let store = CsvCityStore::new(&path, &CacheRegistry::new());

        store.save_city(Identity(5), "Paris, France").await.unwrap();
        let reopened = CsvCityStore::new(&path, &CacheRegistry::new());
        assert_eq!(reopened.load_city(Identity(5)).await.unwrap().as_deref(), Some("Paris, France"));
    }
}
