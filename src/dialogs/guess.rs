//! Guess-the-temperature game.

use std::time::Instant;

use super::{DialogKind, Transition};
use crate::bot::dispatcher::AppState;
use crate::models::{OutgoingMessage, TextMessage};
use crate::plugins::main_keyboard;
use crate::session::{GuessOutcome, Hint};

pub const WELCOME: &str = "🌡️ Я загадал температуру от -30°C до 40°C. Угадай её за 5 попыток!\n❓ Введи свою догадку:";
pub const ALREADY_PLAYING: &str = "Вы уже участвуете в игре! Продолжайте угадывать.";
pub const NOT_A_NUMBER: &str = "⚠️ Пожалуйста, вводите целое число.";
pub const NOT_STARTED: &str = "Игра не начата. Введите /guess_temp, чтобы начать.";
pub const CANCELLED: &str = "❌ Игра отменена.";

fn hint_text(hint: Hint) -> &'static str {
    match hint {
        Hint::Freezing => "❄️ Очень холодно!",
        Hint::Cold => "🌬️ Холодно, но ближе!",
        Hint::Warm => "🌤️ Тепло, но ещё можно ближе!",
        Hint::Hot => "🔥 Горячо! Почти у цели!",
    }
}

pub async fn start(state: &AppState, msg: &TextMessage) -> anyhow::Result<()> {
    if state.session.games.start(msg.identity, Instant::now()).is_none() {
        state.say(msg.peer, ALREADY_PLAYING).await;
        return Ok(());
    }

    state
        .reply(
            msg.peer,
            OutgoingMessage::text(WELCOME).keyboard(main_keyboard(msg.peer)),
        )
        .await;
    state.session.await_input(msg.identity, DialogKind::GuessTemp, false);
    Ok(())
}

pub async fn step(state: &AppState, msg: &TextMessage) -> anyhow::Result<Transition> {
    let games = &state.session.games;
    if !games.is_playing(msg.identity) {
        state.say(msg.peer, NOT_STARTED).await;
        return Ok(Transition::Finish);
    }

    let Ok(guess) = msg.text.trim().parse::<i32>() else {
        state.say(msg.peer, NOT_A_NUMBER).await;
        return Ok(Transition::Stay);
    };

    let Some(outcome) = games.guess(msg.identity, guess, Instant::now()) else {
        state.say(msg.peer, NOT_STARTED).await;
        return Ok(Transition::Finish);
    };

    let (reply, transition) = match outcome {
        GuessOutcome::Won { target, attempts } => (
            OutgoingMessage::text(format!(
                "🎉 Поздравляю! Это {}°C. Ты угадал за {} попыток!",
                target, attempts
            ))
            .keyboard(main_keyboard(msg.peer)),
            Transition::Finish,
        ),
        GuessOutcome::Lost { target } => (
            OutgoingMessage::text(format!(
                "😔 Попытки закончились. Загаданная температура была {}°C.",
                target
            ))
            .keyboard(main_keyboard(msg.peer)),
            Transition::Finish,
        ),
        GuessOutcome::Miss {
            hint,
            attempts,
            max_attempts,
        } => (
            OutgoingMessage::text(format!(
                "{}\n❓ Попытка {}/{}: Введи новую догадку:",
                hint_text(hint),
                attempts,
                max_attempts
            )),
            Transition::Stay,
        ),
    };

    state.reply(msg.peer, reply).await;
    Ok(transition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::consume;
    use crate::models::{Identity, Peer};
    use crate::testing::{Harness, text};

    const USER: Identity = Identity(77);
    const CHAT: Peer = Peer(77);

    /// Start a game with a known target.
    fn rigged(h: &Harness, target: i32) {
        assert!(h.state.session.games.start_with(USER, target, Instant::now()));
        h.state.session.await_input(USER, DialogKind::GuessTemp, false);
    }

    #[tokio::test]
    async fn second_start_is_rejected() {
        let h = Harness::new();
        start(&h.state, &text(USER, CHAT, "/guess_temp")).await.unwrap();
        assert_eq!(h.transport.last_text(), WELCOME);

        start(&h.state, &text(USER, CHAT, "/guess_temp")).await.unwrap();
        assert_eq!(h.transport.last_text(), ALREADY_PLAYING);
    }

    #[tokio::test]
    async fn win_reveals_attempts() {
        let h = Harness::new();
        rigged(&h, 12);

        consume(&h.state, &text(USER, CHAT, "40")).await;
        assert_eq!(
            h.transport.last_text(),
            "❄️ Очень холодно!\n❓ Попытка 1/5: Введи новую догадку:"
        );

        consume(&h.state, &text(USER, CHAT, " 12 ")).await;
        assert_eq!(h.transport.last_text(), "🎉 Поздравляю! Это 12°C. Ты угадал за 2 попыток!");
        assert!(!h.state.session.games.is_playing(USER));
        assert!(!h.state.session.continuations.is_pending(USER));
    }

    #[tokio::test]
    async fn bad_number_keeps_attempt_count() {
        let h = Harness::new();
        rigged(&h, 0);
        consume(&h.state, &text(USER, CHAT, "3")).await;
        consume(&h.state, &text(USER, CHAT, "тепло")).await;

        assert_eq!(h.transport.last_text(), NOT_A_NUMBER);
        assert!(h.state.session.continuations.is_pending(USER));

        consume(&h.state, &text(USER, CHAT, "-8")).await;
        assert_eq!(
            h.transport.last_text(),
            "🌤️ Тепло, но ещё можно ближе!\n❓ Попытка 2/5: Введи новую догадку:"
        );
    }

    #[tokio::test]
    async fn five_misses_lose_and_allow_restart() {
        let h = Harness::new();
        rigged(&h, -30);
        for guess in ["40", "30", "20", "10", "0"] {
            consume(&h.state, &text(USER, CHAT, guess)).await;
        }

        assert_eq!(
            h.transport.last_text(),
            "😔 Попытки закончились. Загаданная температура была -30°C."
        );
        assert!(!h.state.session.games.is_playing(USER));
        assert!(!h.state.session.continuations.is_pending(USER));

        start(&h.state, &text(USER, CHAT, "/guess_temp")).await.unwrap();
        assert_eq!(h.transport.last_text(), WELCOME);
        assert!(h.state.session.games.is_playing(USER));
    }

    #[tokio::test]
    async fn cancel_ends_game() {
        let h = Harness::new();
        rigged(&h, 5);
        consume(&h.state, &text(USER, CHAT, "Cancel")).await;

        assert_eq!(h.transport.last_text(), CANCELLED);
        assert!(!h.state.session.games.is_playing(USER));
        assert!(!h.state.session.continuations.is_pending(USER));
    }
}
