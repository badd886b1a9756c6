//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Time-to-live for cache entries.
    pub ttl: Option<Duration>,

    /// Time-to-idle for cache entries.
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(300)),
            tti: None,
        }
    }
}

impl CacheConfig {
    /// City preferences: read on every weather request, written rarely.
    pub fn preferences() -> Self {
        Self {
            max_capacity: 20_000,
            ttl: Some(Duration::from_secs(3600)),
            tti: Some(Duration::from_secs(900)),
        }
    }

    /// (identity, action) pairs already present in the activity log.
    /// The log is append-only, so entries never go stale.
    pub fn activity_seen() -> Self {
        Self {
            max_capacity: 50_000,
            ttl: None,
            tti: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_seen_never_expires() {
        let config = CacheConfig::activity_seen();
        assert!(config.ttl.is_none());
        assert!(config.tti.is_none());
    }

    #[test]
    fn preferences_expire_when_idle() {
        let config = CacheConfig::preferences();
        assert_eq!(config.tti, Some(Duration::from_secs(900)));
    }
}
