//! Set-city dialog: one prompt, one answer, stored verbatim.

use tracing::warn;

use super::{DialogKind, Transition};
use crate::bot::dispatcher::AppState;
use crate::models::{OutgoingMessage, TextMessage};
use crate::plugins::main_keyboard;

pub const PROMPT: &str = "Введите название города:";
pub const EMPTY_NAME: &str = "⚠️ Название города не может быть пустым. Введите название города:";
const SAVE_FAILED: &str = "⚠️ Произошла ошибка при установке города.";

pub async fn start(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, PROMPT).await;
    state.session.await_input(msg.identity, DialogKind::SetCity, true);
    Ok(())
}

pub async fn step(state: &AppState, msg: &TextMessage) -> anyhow::Result<Transition> {
    let city = msg.text.trim();
    if city.is_empty() {
        state.say(msg.peer, EMPTY_NAME).await;
        return Ok(Transition::Advance {
            dialog: DialogKind::SetCity,
            once: true,
        });
    }

    match state.cities.save_city(msg.identity, city).await {
        Ok(()) => {
            let reply = OutgoingMessage::text(format!("✅ Город установлен: {}", city))
                .keyboard(main_keyboard(msg.peer));
            state.reply(msg.peer, reply).await;
        }
        Err(e) => {
            warn!(identity = %msg.identity, "Failed to save city: {}", e);
            state.say(msg.peer, SAVE_FAILED).await;
        }
    }
    Ok(Transition::Finish)
}
