//! Cache module - small typed caches on top of Moka.
//!
//! The storage layer keeps hot lookups in memory in front of the CSV files:
//! - `CacheRegistry` - named caches shared across the process
//! - `CacheConfig` - capacity and expiry presets
//! - `TypedCache` - typed, cheaply cloneable handle
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cities = registry.get_or_create::<Identity, String>("cities", CacheConfig::preferences());
//! cities.insert(identity, "Москва".to_string());
//! let city = cities.get(&identity);
//! ```

mod config;
mod registry;
mod typed;

pub use config::CacheConfig;
pub use registry::CacheRegistry;
pub use typed::TypedCache;
