//! Usage log.
//!
//! `user_statistics.csv` is append-only with a `User ID,Username,Action,Timestamp`
//! header. Each (identity, action) pair is recorded once; a moka "seen" cache
//! saves re-scanning the file for pairs logged during this process.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use parking_lot::Mutex;
use tracing::debug;

use super::{StorageError, blocking};
use crate::cache::{CacheConfig, CacheRegistry, TypedCache};
use crate::models::Identity;

const HEADER: [&str; 4] = ["User ID", "Username", "Action", "Timestamp"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub user_id: String,
    pub username: String,
    pub action: String,
    pub timestamp: String,
}

/// Aggregate view used by the admin `stats` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    pub unique_users: usize,
    pub total_records: usize,
    /// Most frequent actions, at most five, most frequent first.
    pub top_actions: Vec<(String, usize)>,
    /// The last five rows in file order.
    pub recent: Vec<ActivityRecord>,
}

impl ActivitySummary {
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn log_activity(&self, identity: Identity, display_name: &str, action: &str) -> Result<(), StorageError>;

    async fn summary(&self) -> Result<ActivitySummary, StorageError>;
}

pub struct CsvActivityLog {
    file: Arc<ActivityFile>,
    seen: TypedCache<(Identity, String), ()>,
}

/// The file itself. Only touched from blocking tasks.
struct ActivityFile {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl CsvActivityLog {
    pub fn new(path: impl Into<PathBuf>, caches: &CacheRegistry) -> Self {
        Self {
            file: Arc::new(ActivityFile {
                path: path.into(),
                append_lock: Mutex::new(()),
            }),
            seen: caches.get_or_create("activity_seen", CacheConfig::activity_seen()),
        }
    }
}

impl ActivityFile {
    /// Append unless the pair is already in the file. Returns whether a row was written.
    fn record(&self, identity: Identity, display_name: &str, action: &str) -> Result<bool, StorageError> {
        let _guard = self.append_lock.lock();
        let user_id = identity.to_string();
        let already_logged = read_records(&self.path)?
            .iter()
            .any(|r| r.user_id == user_id && r.action == action);

        if already_logged {
            return Ok(false);
        }
        self.append(identity, display_name, action)?;
        Ok(true)
    }

    fn append(&self, identity: Identity, display_name: &str, action: &str) -> Result<(), StorageError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        let empty = file
            .metadata()
            .map_err(|e| StorageError::io(&self.path, e))?
            .len()
            == 0;

        let mut writer = csv::Writer::from_writer(file);
        if empty {
            writer
                .write_record(HEADER)
                .map_err(|e| StorageError::csv(&self.path, e))?;
        }
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        writer
            .write_record([identity.to_string().as_str(), display_name, action, timestamp.as_str()])
            .map_err(|e| StorageError::csv(&self.path, e))?;
        writer.flush().map_err(|e| StorageError::io(&self.path, e))
    }
}

fn read_records(path: &Path) -> Result<Vec<ActivityRecord>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StorageError::csv(path, e))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StorageError::csv(path, e))?;
        let field = |i: usize| row.get(i).unwrap_or_default().to_string();
        records.push(ActivityRecord {
            user_id: field(0),
            username: field(1),
            action: field(2),
            timestamp: field(3),
        });
    }
    Ok(records)
}

#[async_trait]
impl ActivityLog for CsvActivityLog {
    async fn log_activity(&self, identity: Identity, display_name: &str, action: &str) -> Result<(), StorageError> {
        let action = action.trim().to_string();
        let key = (identity, action.clone());
        if self.seen.contains(&key) {
            return Ok(());
        }

        let file = Arc::clone(&self.file);
        let display_name = display_name.to_string();
        let written = {
            let action = action.clone();
            blocking(move || file.record(identity, &display_name, &action)).await?
        };
        if written {
            debug!(%identity, action = %action, "Logged activity");
        }
        self.seen.insert(key, ());
        Ok(())
    }

    async fn summary(&self) -> Result<ActivitySummary, StorageError> {
        let file = Arc::clone(&self.file);
        let records = blocking(move || read_records(&file.path)).await?;
        Ok(summarize(records))
    }
}

pub(crate) fn summarize(records: Vec<ActivityRecord>) -> ActivitySummary {
    let unique_users = records
        .iter()
        .filter(|r| !r.user_id.is_empty())
        .map(|r| r.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    // Counted in first-seen order so ties keep that order after the stable sort.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records.iter().filter(|r| !r.action.is_empty()) {
        match counts.iter_mut().find(|(action, _)| *action == record.action) {
            Some((_, n)) => *n += 1,
            None => counts.push((record.action.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(5);

    let recent = records[records.len().saturating_sub(5)..].to_vec();

    ActivitySummary {
        unique_users,
        total_records: records.len(),
        top_actions: counts,
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn pairs_are_logged_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_statistics.csv");
        let log = CsvActivityLog::new(&path, &CacheRegistry::new());

        log.log_activity(Identity(1), "Анна", "help").await.unwrap();
        log.log_activity(Identity(1), "Анна", "help").await.unwrap();
        log.log_activity(Identity(1), "Анна", "radar").await.unwrap();
        log.log_activity(Identity(2), "Boris", "help").await.unwrap();

        // A new process (empty cache) still sees the existing rows.
        let reopened = CsvActivityLog::new(&path, &CacheRegistry::new());
        reopened.log_activity(Identity(2), "Boris", "help").await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("User ID,Username,Action,Timestamp"));
        assert_eq!(contents.lines().count(), 4);
    }

    #[tokio::test]
    async fn summary_counts_users_and_actions() {
        let dir = tempdir().unwrap();
        let log = CsvActivityLog::new(dir.path().join("stats.csv"), &CacheRegistry::new());
        assert!(log.summary().await.unwrap().is_empty());

        for id in 1..=3 {
            log.log_activity(Identity(id), "user", "help").await.unwrap();
        }
        log.log_activity(Identity(1), "user", "radar").await.unwrap();
        log.log_activity(Identity(2), "user", "radar").await.unwrap();
        log.log_activity(Identity(3), "user", "start").await.unwrap();

        let summary = log.summary().await.unwrap();
        assert_eq!(summary.unique_users, 3);
        assert_eq!(summary.total_records, 6);
        assert_eq!(summary.top_actions[0], ("help".to_string(), 3));
        assert_eq!(summary.top_actions[1], ("radar".to_string(), 2));
        assert_eq!(summary.recent.len(), 5);
        assert_eq!(summary.recent.last().unwrap().action, "start");
    }

    #[test]
    fn top_actions_capped_at_five() {
        let records = (0..8)
            .map(|i| ActivityRecord {
                user_id: "1".to_string(),
                username: "u".to_string(),
                action: format!("a{i}"),
                timestamp: String::new(),
            })
            .collect();
        let summary = summarize(records);
        assert_eq!(summary.top_actions.len(), 5);
        assert_eq!(summary.top_actions[0].0, "a0");
    }
}
