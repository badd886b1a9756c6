//! PogodaRadar - conversational weather bot for Telegram
//!
//! Current weather, forecasts, air quality, meteorological maps and station
//! reports, with a few multi-step dialogs on top.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - Moka-backed caches in front of the CSV files
//! - `storage` - City preferences, usage log, meteogram catalog
//! - `provider` - Weather API, scraped pages and map images over HTTP
//! - `catalog` - Static lookup tables (airports, stations, map types)
//! - `session` - Flood guard, pending dialogs, guessing games
//! - `dialogs` - Multi-step conversations
//! - `plugins` - Command table and handlers
//! - `events` - Per-message dispatch order
//! - `bot` - Telegram edge (with Throttle for API rate limiting), supervisor, health endpoint
//! - `utils` - Formatting and scraping helpers

mod bot;
mod cache;
mod catalog;
mod config;
mod dialogs;
mod events;
mod models;
mod plugins;
mod provider;
mod session;
mod storage;
mod utils;

#[cfg(test)]
mod testing;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bot::{AppState, Supervisor, TelegramTransport};
use cache::CacheRegistry;
use config::Config;
use provider::{HttpProvider, WeatherApi};
use session::SessionManager;
use storage::{CsvActivityLog, CsvCityStore, MeteogramCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pogodaradar=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting PogodaRadar bot...");

    let config = Arc::new(Config::from_env()?);
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    let cache = CacheRegistry::new();
    let data_dir = &config.data_dir;

    let meteograms = match MeteogramCatalog::load(&data_dir.join("city_data.csv")) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Meteogram catalog unreadable, continuing without it: {}", e);
            MeteogramCatalog::default()
        }
    };
    if meteograms.is_empty() {
        warn!("Meteogram catalog is empty, /meteograms will find nothing");
    } else {
        info!("Meteogram catalog: {} cities", meteograms.len());
    }

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let state = AppState {
        transport: Arc::new(TelegramTransport::new(bot.clone())),
        provider: Arc::new(HttpProvider::new(config.http_timeout)),
        weather: WeatherApi::new(&config.weather_api_url, &config.weather_api_key),
        cities: Arc::new(CsvCityStore::new(data_dir.join("cities.csv"), &cache)),
        activity: Arc::new(CsvActivityLog::new(data_dir.join("user_statistics.csv"), &cache)),
        meteograms: Arc::new(meteograms),
        session: Arc::new(SessionManager::new(config.flood, config.dialog_idle_timeout)),
        admin_id: config.admin_id,
    };
    info!("Statistics available to admin {}", state.admin_id);

    let supervisor = Supervisor::new(config.restart_backoff);

    if let Some(port) = config.health_port {
        let stats = supervisor.stats();
        tokio::spawn(async move {
            if let Err(e) = bot::health::serve(port, stats).await {
                error!("Health endpoint stopped: {:#}", e);
            }
        });
    }

    bot::run(config.clone(), bot, state, &supervisor).await;

    info!("PogodaRadar stopped after {} restarts", supervisor.stats().restarts());
    Ok(())
}
