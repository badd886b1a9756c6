//! Command handlers.
//!
//! Add new commands by:
//! 1. Adding a variant to `Command` and its aliases to `COMMANDS`
//! 2. Writing the handler in one of the modules below
//! 3. Wiring it up in `execute()`

pub mod callbacks;
pub mod extrainfo;
pub mod info;
pub mod maps;
pub mod stats;
pub mod weather;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::bot::dispatcher::AppState;
use crate::dialogs;
use crate::models::{Keyboard, Peer, TextMessage};

/// All text commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Help,
    Donate,
    Share,
    SetCity,
    WeatherNow,
    Forecast,
    AirQuality,
    Radar,
    Airports,
    Meteograms,
    Location,
    GuessTemp,
    Stations,
    Meteoweb,
    ExtraInfo,
    Support,
    PrecipitationMap,
    AnomalyMap,
    WaterTempMap,
    VerticalProfile,
    FireHazardMap,
    Alerts,
    WeatherWebsites,
    /// Administrator only.
    Stats,
}

/// Alias sets, matched exactly against normalised text. Sets are disjoint.
const COMMANDS: &[(Command, &[&str])] = &[
    (Command::Start, &["привет", "начать", "старт", "/start"]),
    (Command::Help, &["помощь", "help", "🚨помощь", "/help"]),
    (Command::Donate, &["поддержать", "donate", "🎁поддержать", "/donate"]),
    (Command::Share, &["поделиться ботом", "share", "📢поделиться ботом", "/share"]),
    (Command::SetCity, &["изменить город", "setcity", "✏️изменить город", "/setcity"]),
    (Command::WeatherNow, &["погода сейчас", "nowweather", "⛅погода сейчас", "/nowweather"]),
    (
        Command::Forecast,
        &["погода на 3 дня", "forecastweather", "📆погода на 3 дня", "/forecastweather"],
    ),
    (Command::AirQuality, &["качество воздуха", "aqi", "🌫️качество воздуха", "/aqi"]),
    (Command::Radar, &["радар", "radarmap", "🗺️радар", "/radarmap"]),
    (
        Command::Airports,
        &["погода в аэропортах", "weatherairports", "✈️погода в аэропортах", "/weatherairports"],
    ),
    (Command::Meteograms, &["метеограммы гмц", "meteograms", "📊метеограммы гмц", "/meteograms"]),
    (Command::Location, &["определить локацию", "location", "📍определить локацию", "/location"]),
    (
        Command::GuessTemp,
        &["угадать температуру", "guess_temp", "🎮угадать температуру", "/guess_temp"],
    ),
    (Command::Stations, &["метеостанции рф", "stations", "🚩метеостанции рф", "/stations"]),
    (Command::Meteoweb, &["карты meteoweb", "get_meteoweb", "🌍карты meteoweb", "/get_meteoweb"]),
    (
        Command::ExtraInfo,
        &["экстренная информация", "extrainfo", "❗экстренная информация", "/extrainfo"],
    ),
    (Command::Support, &["поддержка", "support", "/support"]),
    (Command::PrecipitationMap, &["/precipitationmap"]),
    (Command::AnomalyMap, &["/anomaltempmap"]),
    (Command::WaterTempMap, &["/tempwatermap"]),
    (Command::VerticalProfile, &["/verticaltemplayer"]),
    (Command::FireHazardMap, &["/firehazard_map"]),
    (Command::Alerts, &["/alerts"]),
    (Command::WeatherWebsites, &["/weatherwebsites"]),
    (Command::Stats, &["статистика", "stats", "/stats"]),
];

static ROUTES: Lazy<HashMap<&'static str, Command>> = Lazy::new(|| {
    let mut routes = HashMap::new();
    for (command, aliases) in COMMANDS {
        for alias in *aliases {
            // First set listing an alias wins.
            routes.entry(*alias).or_insert(*command);
        }
    }
    routes
});

impl Command {
    /// Name recorded in the usage log.
    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Help => "/help",
            Command::Donate => "/donate",
            Command::Share => "/share",
            Command::SetCity => "/setcity",
            Command::WeatherNow => "/nowweather",
            Command::Forecast => "/forecastweather",
            Command::AirQuality => "/aqi",
            Command::Radar => "/radarmap",
            Command::Airports => "/weatherairports",
            Command::Meteograms => "/meteograms",
            Command::Location => "/location",
            Command::GuessTemp => "/guess_temp",
            Command::Stations => "/stations",
            Command::Meteoweb => "/get_meteoweb",
            Command::ExtraInfo => "/extrainfo",
            Command::Support => "/support",
            Command::PrecipitationMap => "/precipitationmap",
            Command::AnomalyMap => "/anomaltempmap",
            Command::WaterTempMap => "/tempwatermap",
            Command::VerticalProfile => "/verticaltemplayer",
            Command::FireHazardMap => "/firehazard_map",
            Command::Alerts => "/alerts",
            Command::WeatherWebsites => "/weatherwebsites",
            Command::Stats => "/stats",
        }
    }
}

/// Trim, lowercase, and drop the `@botname` suffix of a leading slash command.
pub fn normalize(text: &str) -> String {
    let text = text.trim().to_lowercase();
    if !text.starts_with('/') {
        return text;
    }

    let (head, rest) = match text.find(char::is_whitespace) {
        Some(i) => text.split_at(i),
        None => (text.as_str(), ""),
    };
    match head.split_once('@') {
        Some((command, _bot)) => format!("{}{}", command, rest),
        None => text.clone(),
    }
}

/// Look up normalised text in the alias table.
pub fn route(normalized: &str) -> Option<Command> {
    ROUTES.get(normalized).copied()
}

/// Run a routed command.
pub async fn execute(state: &AppState, command: Command, msg: &TextMessage) -> anyhow::Result<()> {
    match command {
        Command::Start => info::start(state, msg).await,
        Command::Help => info::help(state, msg).await,
        Command::Donate => info::donate(state, msg).await,
        Command::Share => info::share(state, msg).await,
        Command::Support => info::support(state, msg).await,
        Command::WeatherWebsites => info::websites(state, msg).await,
        Command::SetCity => dialogs::set_city::start(state, msg).await,
        Command::WeatherNow => weather::now(state, msg).await,
        Command::Forecast => weather::forecast(state, msg).await,
        Command::AirQuality => weather::air_quality(state, msg).await,
        Command::Alerts => weather::alerts(state, msg).await,
        Command::Radar => maps::radar(state, msg).await,
        Command::PrecipitationMap => maps::precipitation(state, msg).await,
        Command::AnomalyMap => maps::anomaly(state, msg).await,
        Command::WaterTempMap => maps::water_temperature(state, msg).await,
        Command::VerticalProfile => maps::vertical_profile(state, msg).await,
        Command::FireHazardMap => maps::fire_hazard(state, msg).await,
        Command::Airports => dialogs::airport::start(state, msg).await,
        Command::Meteograms => dialogs::meteogram::menu(state, msg).await,
        Command::Location => dialogs::location::menu(state, msg).await,
        Command::GuessTemp => dialogs::guess::start(state, msg).await,
        Command::Stations => dialogs::station::start(state, msg).await,
        Command::Meteoweb => dialogs::meteoweb::start(state, msg).await,
        Command::ExtraInfo => extrainfo::extrainfo(state, msg).await,
        Command::Stats => stats::stats(state, msg).await,
    }
}

/// Persistent reply menu. Only shown in direct chats.
pub fn main_keyboard(peer: Peer) -> Option<Keyboard> {
    if !peer.is_private() {
        return None;
    }

    let rows: &[&[&str]] = &[
        &["🚨Помощь", "🗺️Радар"],
        &["⛅Погода сейчас", "📆Погода на 3 дня"],
        &["✈️Погода в аэропортах", "🌫️Качество воздуха"],
        &["🎁Поддержать", "📢Поделиться ботом"],
        &["📊Метеограммы ГМЦ"],
        &["📍Определить локацию"],
        &["✏️Изменить город"],
    ];
    Some(Keyboard::Menu(
        rows.iter()
            .map(|row| row.iter().map(|label| label.to_string()).collect())
            .collect(),
    ))
}
