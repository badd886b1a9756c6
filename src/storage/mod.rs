//! Storage module exports.
//!
//! Small CSV files under `DATA_DIR`, fronted by in-memory caches.

mod activity;
mod catalog;
mod cities;

use thiserror::Error;

pub use activity::{ActivityLog, ActivityRecord, ActivitySummary, CsvActivityLog};
#[cfg(test)]
pub(crate) use activity::summarize;
pub use catalog::{MeteogramCatalog, MeteogramCity};
pub use cities::{CityStore, CsvCityStore};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Run file work on the blocking pool.
async fn blocking<T, F>(work: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

impl StorageError {
    fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}
