//! Airport METAR/TAF lookup.
//!
//! One answer is accepted: a four-letter ICAO code or a known airport name.
//! An unknown name ends the dialog. An upstream failure on the first try
//! leaves it open for exactly one more answer.

use serde::Deserialize;

use super::{DialogKind, Transition};
use crate::bot::dispatcher::AppState;
use crate::catalog::icao_by_name;
use crate::models::{InlineButton, Keyboard, OutgoingMessage, TextMessage};

pub const PROMPT: &str = "Введите код ICAO (например, UUEE) или название аэропорта (например, Шереметьево). Для отмены введите \"отмена\"";
pub const NOT_FOUND: &str = "Не удалось найти аэропорт. Попробуйте ввести ICAO код (4 буквы) или название аэропорта из списка.";
pub const FETCH_FAILED: &str = "Ошибка получения данных о погоде. Проверьте правильность кода аэропорта.";

pub const DECODE_PAYLOAD: &str = "decode_airport";

pub const DECODE_HELP: &str = "🛠 Как расшифровать METAR и TAF самостоятельно:\n\n\
📄 METAR — это закодированное сообщение о текущей погоде на аэродроме.\n\
Основные элементы METAR:\n\
- ICAO-код аэропорта (например, UUEE — Шереметьево)\n\
- Время составления прогноза (например, 121200Z — 12-е число, 12:00 UTC)\n\
- Погодные условия: облачность, видимость, осадки (например, SCT030 — разбросанные облака на высоте 3000 футов)\n\
- Ветер: направление и скорость (например, 18010KT — ветер с юга, 10 узлов)\n\
\n\
📄 TAF — прогноз погоды для аэродрома на определенный период.\n\
Ключевые элементы TAF:\n\
- Время действия прогноза (например, 1212/1312 — с 12:00 12-го числа до 12:00 13-го числа)\n\
- Изменения погоды: TEMPO, BECMG, PROB (например, TEMPO 1418 — временные изменения с 14:00 до 18:00)\n\n\
📌 Для детального разбора каждого элемента вы можете воспользоваться ссылкой:\n\
https://www.iflightplanner.com/resources/metartaftranslator.aspx";

#[derive(Debug, Deserialize)]
struct MetarTaf {
    icao: String,
    name: String,
    metar: String,
    taf: String,
}

pub async fn start(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    state.say(msg.peer, PROMPT).await;
    state
        .session
        .await_input(msg.identity, DialogKind::AirportLookup { retried: false }, true);
    Ok(())
}

/// Four ASCII letters, upper-cased.
pub fn parse_icao(input: &str) -> Option<String> {
    let input = input.trim();
    (input.len() == 4 && input.chars().all(|c| c.is_ascii_alphabetic())).then(|| input.to_ascii_uppercase())
}

pub async fn step(state: &AppState, msg: &TextMessage, retried: bool) -> anyhow::Result<Transition> {
    let code = match parse_icao(&msg.text).or_else(|| icao_by_name(&msg.text).map(str::to_string)) {
        Some(code) => code,
        None => {
            state.say(msg.peer, NOT_FOUND).await;
            return Ok(Transition::Stay);
        }
    };

    let url = format!("https://metartaf.ru/{}.json", code);
    let report = state
        .provider
        .fetch_json(&url, &[])
        .await
        .and_then(|v| serde_json::from_value::<MetarTaf>(v).ok());

    let Some(report) = report else {
        state.say(msg.peer, FETCH_FAILED).await;
        if retried {
            return Ok(Transition::Finish);
        }
        return Ok(Transition::Advance {
            dialog: DialogKind::AirportLookup { retried: true },
            once: true,
        });
    };

    let text = format!(
        "🌐 Кодировка аэропорта: {}\n\
         ✈️ Погодные условия в аэропорту: {}\n\
         📍 METAR-сводка по аэропорту: {}\n\
         🌀 TAF-прогноз по аэропорту: {}",
        report.icao, report.name, report.metar, report.taf
    );
    let keyboard = Keyboard::Inline(vec![vec![InlineButton::callback(
        "Как расшифровать данные?",
        DECODE_PAYLOAD,
    )]]);
    state
        .reply(msg.peer, OutgoingMessage::text(text).keyboard(Some(keyboard)))
        .await;
    Ok(Transition::Finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::consume;
    use crate::models::{Identity, Peer};
    use crate::testing::{Harness, text};
    use serde_json::json;

    const USER: Identity = Identity(8);
    const CHAT: Peer = Peer(8);

    #[test]
    fn icao_codes_are_ascii_letters() {
        assert_eq!(parse_icao(" uuee ").as_deref(), Some("UUEE"));
        assert_eq!(parse_icao("UU1E"), None);
        assert_eq!(parse_icao("сочи"), None);
        assert_eq!(parse_icao("EGLLX"), None);
    }

    #[tokio::test]
    async fn name_resolves_and_reports() {
        let h = Harness::new();
        h.provider.json(
            "https://metartaf.ru/UUEE.json",
            json!({"icao": "UUEE", "name": "Шереметьево", "metar": "UUEE 121200Z 18010KT", "taf": "TAF UUEE"}),
        );
        start(&h.state, &text(USER, CHAT, "/weatherairports")).await.unwrap();
        consume(&h.state, &text(USER, CHAT, "шереметьево")).await;

        let reply = h.transport.last();
        assert!(reply.text.contains("METAR-сводка по аэропорту: UUEE 121200Z 18010KT"));
        assert!(matches!(reply.keyboard, Some(Keyboard::Inline(_))));
        assert!(!h.state.session.continuations.is_pending(USER));
    }

    #[tokio::test]
    async fn unknown_name_gets_exactly_one_attempt() {
        let h = Harness::new();
        start(&h.state, &text(USER, CHAT, "/weatherairports")).await.unwrap();
        consume(&h.state, &text(USER, CHAT, "Атлантида")).await;

        assert_eq!(h.transport.last_text(), NOT_FOUND);
        assert!(!h.state.session.continuations.is_pending(USER));
    }

    #[tokio::test]
    async fn upstream_failure_allows_one_retry() {
        let h = Harness::new();
        start(&h.state, &text(USER, CHAT, "/weatherairports")).await.unwrap();

        consume(&h.state, &text(USER, CHAT, "ZZZZ")).await;
        assert_eq!(h.transport.last_text(), FETCH_FAILED);
        assert!(h.state.session.continuations.is_pending(USER));

        consume(&h.state, &text(USER, CHAT, "ZZZY")).await;
        assert_eq!(h.transport.last_text(), FETCH_FAILED);
        assert!(!h.state.session.continuations.is_pending(USER));
    }
}
