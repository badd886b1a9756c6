//! Meteogram dialogs, started from the inline mode picker.

use std::time::Instant;

use super::{DialogKind, MeteogramMode, Transition};
use crate::bot::dispatcher::AppState;
use crate::models::{Attachment, CallbackEvent, InlineButton, Keyboard, OutgoingMessage, TextMessage};
use crate::storage::MeteogramCity;

pub const ONE_CITY_PAYLOAD: &str = "meteo_one_city";
pub const SEVERAL_CITIES_PAYLOAD: &str = "meteo_several_cities";

pub const ONE_CITY_PROMPT: &str = "Введите название города:";
pub const SEVERAL_CITIES_PROMPT: &str = "Введите названия городов через запятую (максимум 10):";
pub const CITY_NOT_FOUND: &str = "Город не найден. Попробуйте еще раз.";
pub const NONE_FOUND: &str = "Ни один из указанных городов не найден.";

const MAX_CITIES: usize = 10;

/// The `meteograms` command: offer the two modes.
pub async fn menu(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    let keyboard = Keyboard::Inline(vec![vec![
        InlineButton::callback("Один город", ONE_CITY_PAYLOAD),
        InlineButton::callback("Несколько городов", SEVERAL_CITIES_PAYLOAD),
    ]]);
    state
        .reply(msg.peer, OutgoingMessage::text("Выберите режим:").keyboard(Some(keyboard)))
        .await;
    Ok(())
}

/// Button press: prompt for city names.
pub async fn start(state: &AppState, event: &CallbackEvent, mode: MeteogramMode) -> anyhow::Result<()> {
    let prompt = match mode {
        MeteogramMode::One => ONE_CITY_PROMPT,
        MeteogramMode::Several => SEVERAL_CITIES_PROMPT,
    };
    state.say(event.peer, prompt).await;
    state
        .session
        .await_input(event.identity, DialogKind::Meteogram(mode), true);
    Ok(())
}

pub async fn step(state: &AppState, msg: &TextMessage, mode: MeteogramMode) -> anyhow::Result<Transition> {
    match mode {
        MeteogramMode::One => {
            let Some(city) = state.meteograms.find(&msg.text).cloned() else {
                state.say(msg.peer, CITY_NOT_FOUND).await;
                return Ok(Transition::Stay);
            };
            send_meteogram(state, msg, &city).await;
        }
        MeteogramMode::Several => {
            let cities: Vec<MeteogramCity> = msg
                .text
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .take(MAX_CITIES)
                .filter_map(|name| state.meteograms.find(name).cloned())
                .collect();

            if cities.is_empty() {
                state.say(msg.peer, NONE_FOUND).await;
                return Ok(Transition::Stay);
            }

            let started = Instant::now();
            let mut delivered = 0;
            for city in &cities {
                if send_meteogram(state, msg, city).await {
                    delivered += 1;
                }
            }

            state
                .say(
                    msg.peer,
                    format!(
                        "✅ Готово!\n📊 Успешно загружено: {} из {}\n⏱️ Общее время: {:.2} сек.",
                        delivered,
                        cities.len(),
                        started.elapsed().as_secs_f64()
                    ),
                )
                .await;
        }
    }
    Ok(Transition::Finish)
}

/// Download and relay one meteogram. Returns whether it was fetched.
async fn send_meteogram(state: &AppState, msg: &TextMessage, city: &MeteogramCity) -> bool {
    let started = Instant::now();
    let Some(bytes) = state.provider.fetch_bytes(&city.url).await else {
        state
            .say(
                msg.peer,
                format!("❌ Не удалось загрузить метеограмму для города {}", city.rus_name),
            )
            .await;
        return false;
    };

    let caption = format!(
        "📊 Прогноз на 5 дней для города: {}\n⏱️ Время загрузки: {:.2} сек.",
        city.rus_name,
        started.elapsed().as_secs_f64()
    );
    let file_name = format!("{}.png", city.eng_name.to_lowercase());
    state
        .reply(
            msg.peer,
            OutgoingMessage::text(caption).attach(Attachment::photo(file_name, bytes)),
        )
        .await;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::consume;
    use crate::models::{AttachmentKind, Identity, Peer};
    use crate::testing::{Harness, callback, text};

    const USER: Identity = Identity(4);
    const CHAT: Peer = Peer(4);

    #[tokio::test]
    async fn one_city_sends_photo() {
        let h = Harness::new();
        h.provider.bytes("https://maps.test/moscow.png", vec![1, 2, 3]);

        start(&h.state, &callback(USER, CHAT, ONE_CITY_PAYLOAD), MeteogramMode::One)
            .await
            .unwrap();
        assert_eq!(h.transport.last_text(), ONE_CITY_PROMPT);

        consume(&h.state, &text(USER, CHAT, "москва")).await;
        let reply = h.transport.last();
        assert!(reply.text.starts_with("📊 Прогноз на 5 дней для города: Москва"));
        assert_eq!(reply.attachments.len(), 1);
        assert_eq!(reply.attachments[0].kind, AttachmentKind::Photo);
        assert!(!h.state.session.continuations.is_pending(USER));
    }

    #[tokio::test]
    async fn several_cities_report_totals() {
        let h = Harness::new();
        h.provider.bytes("https://maps.test/moscow.png", vec![1]);

        start(&h.state, &callback(USER, CHAT, SEVERAL_CITIES_PAYLOAD), MeteogramMode::Several)
            .await
            .unwrap();
        consume(&h.state, &text(USER, CHAT, "Москва, Тверь, Атлантида")).await;

        let sent = h.transport.sent();
        let texts: Vec<&str> = sent.iter().map(|(_, m)| m.text.as_str()).collect();
        assert!(texts.contains(&"❌ Не удалось загрузить метеограмму для города Тверь"));
        assert!(texts.last().unwrap().starts_with("✅ Готово!\n📊 Успешно загружено: 1 из 2"));
    }

    #[tokio::test]
    async fn unknown_city_ends_dialog() {
        let h = Harness::new();
        start(&h.state, &callback(USER, CHAT, ONE_CITY_PAYLOAD), MeteogramMode::One)
            .await
            .unwrap();
        consume(&h.state, &text(USER, CHAT, "Атлантида")).await;

        assert_eq!(h.transport.last_text(), CITY_NOT_FOUND);
        assert!(!h.state.session.continuations.is_pending(USER));
    }
}
