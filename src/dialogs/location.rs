//! Geolocation dialog: reverse-geocode a shared location and remember the city.

use super::{DialogKind, Transition};
use crate::bot::dispatcher::AppState;
use crate::models::{CallbackEvent, InlineButton, Keyboard, OutgoingMessage, TextMessage};

pub const REQUEST_PAYLOAD: &str = "request_location";
pub const PROMPT: &str = "Пожалуйста, отправьте геопозицию.";
pub const NO_COORDINATES: &str = "⚠️ Не удалось получить координаты.";
pub const NOT_RESOLVED: &str = "Не удалось определить город по координатам.";
pub const NO_WEATHER: &str = "Не удалось получить погоду.";

/// The `location` command: offer the share button.
pub async fn menu(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let keyboard = Keyboard::Inline(vec![vec![InlineButton::callback(
        "Отправить местоположение",
        REQUEST_PAYLOAD,
    )]]);
    let reply = OutgoingMessage::text("Нажмите кнопку ниже, чтобы отправить своё местоположение:")
        .keyboard(Some(keyboard));
    state.reply(msg.peer, reply).await;
    Ok(())
}

pub async fn start(state: &AppState, event: &CallbackEvent) -> anyhow::Result<()> {
    state.say(event.peer, PROMPT).await;
    state
        .session
        .await_input(event.identity, DialogKind::Location, true);
    Ok(())
}

pub async fn step(state: &AppState, msg: &TextMessage) -> anyhow::Result<Transition> {
    let Some(point) = msg.location else {
        state.say(msg.peer, NO_COORDINATES).await;
        return Ok(Transition::Stay);
    };

    let query = format!("{},{}", point.latitude, point.longitude);
    let hits = state
        .weather
        .search(state.provider.as_ref(), &query)
        .await
        .unwrap_or_default();
    let Some(city) = hits.into_iter().next().map(|hit| hit.name) else {
        state.say(msg.peer, NOT_RESOLVED).await;
        return Ok(Transition::Finish);
    };

    state.cities.save_city(msg.identity, &city).await?;

    match state.weather.current(state.provider.as_ref(), &city).await {
        Some(weather) => {
            state
                .say(
                    msg.peer,
                    format!(
                        "📍 Местоположение определено: {}\n🌡️ Температура: {}°C",
                        weather.location.label(),
                        weather.current.temp_c
                    ),
                )
                .await;
        }
        None => state.say(msg.peer, NO_WEATHER).await,
    }
    Ok(Transition::Finish)
}
