//! Inbound event handling.
//!
//! Per text message: a pending dialog gets first refusal, then the flood
//! guard, then the command table. Unmatched text is dropped. Button presses
//! skip all three and go straight to the callback handler.

use tracing::{debug, error, warn};

use crate::bot::dispatcher::AppState;
use crate::dialogs::{self, Consumed, ERROR_NOTICE};
use crate::models::{Inbound, TextMessage};
use crate::plugins::{self, callbacks};
use crate::session::{FloodKey, FloodVerdict};

/// Handle one inbound event. Failures are logged, never propagated.
pub async fn handle(state: &AppState, inbound: Inbound) {
    debug!(identity = %inbound.identity(), peer = %inbound.peer(), "Inbound event");
    match inbound {
        Inbound::Text(msg) => handle_text(state, &msg).await,
        Inbound::Callback(event) => {
            if let Err(e) = callbacks::handle(state, &event).await {
                error!(payload = %event.payload, "Callback handler failed: {:#}", e);
                state.say(event.peer, ERROR_NOTICE).await;
            }
        }
    }
}

async fn handle_text(state: &AppState, msg: &TextMessage) {
    if dialogs::consume(state, msg).await == Consumed::Handled {
        return;
    }

    if let FloodVerdict::Blocked(remaining) = state.session.flood.check(FloodKey::scoped(msg.peer, msg.identity)) {
        let secs = remaining.as_secs();
        debug!(identity = %msg.identity, secs, "Message dropped by flood guard");
        if secs > 0 {
            state
                .say(
                    msg.peer,
                    format!("⚠️ Вы заблокированы на {} секунд из-за частых запросов.", secs),
                )
                .await;
        }
        return;
    }

    let Some(command) = plugins::route(&plugins::normalize(&msg.text)) else {
        return;
    };
    debug!(identity = %msg.identity, command = command.name(), "Routing command");

    if let Err(e) = state
        .activity
        .log_activity(msg.identity, &msg.display_name, command.name())
        .await
    {
        warn!(identity = %msg.identity, "Failed to log activity: {}", e);
    }

    if let Err(e) = plugins::execute(state, command, msg).await {
        error!(command = command.name(), "Command failed: {:#}", e);
        state.say(msg.peer, ERROR_NOTICE).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::set_city;
    use crate::models::{Identity, Peer};
    use crate::plugins::stats;
    use crate::testing::{Harness, callback, text};

    const USER: Identity = Identity(40);
    const CHAT: Peer = Peer(40);

    async fn send(h: &Harness, identity: Identity, body: &str) {
        handle(&h.state, Inbound::Text(text(identity, Peer(identity.0 as i64), body))).await;
    }

    #[tokio::test]
    async fn set_city_round_trip() {
        let h = Harness::new();
        send(&h, USER, "/setcity").await;
        assert_eq!(h.transport.last_text(), set_city::PROMPT);

        send(&h, USER, "Москва").await;
        assert_eq!(h.cities.city(USER).as_deref(), Some("Москва"));
        assert_eq!(h.transport.last_text(), "✅ Город установлен: Москва");
        assert!(!h.state.session.continuations.is_pending(USER));
        assert_eq!(h.activity.actions(), vec![(USER, "/setcity".to_string())]);
    }

    #[tokio::test]
    async fn unmatched_text_is_dropped() {
        let h = Harness::new();
        send(&h, USER, "UUEE").await;
        assert!(h.transport.sent().is_empty());
        assert!(h.activity.actions().is_empty());
    }

    #[tokio::test]
    async fn dialogs_do_not_cross_talk() {
        let h = Harness::new();
        let other = Identity(41);
        send(&h, USER, "/setcity").await;

        // Another user's text goes through normal routing.
        send(&h, other, "Казань").await;
        assert!(h.cities.city(other).is_none());
        assert!(h.state.session.continuations.is_pending(USER));

        send(&h, USER, "Казань").await;
        assert_eq!(h.cities.city(USER).as_deref(), Some("Казань"));
    }

    #[tokio::test]
    async fn stats_gated_on_admin() {
        let h = Harness::new();
        send(&h, USER, "статистика").await;
        assert_eq!(h.transport.last_text(), stats::ACCESS_DENIED);

        send(&h, Identity(1), "/stats").await;
        assert!(h.transport.last_text().starts_with("📊 Общая статистика:"));
    }

    #[tokio::test]
    async fn flood_notice_after_limit() {
        let h = Harness::new();
        for _ in 0..10 {
            send(&h, USER, "/help").await;
        }
        assert_eq!(h.transport.sent().len(), 10);

        send(&h, USER, "/help").await;
        assert_eq!(h.transport.last_text(), "⚠️ Вы заблокированы на 60 секунд из-за частых запросов.");
    }

    #[tokio::test]
    async fn pending_dialog_bypasses_flood_guard() {
        let h = Harness::new();
        for _ in 0..11 {
            send(&h, USER, "/help").await;
        }
        h.state.session.await_input(USER, dialogs::DialogKind::SetCity, true);

        send(&h, USER, "Тверь").await;
        assert_eq!(h.cities.city(USER).as_deref(), Some("Тверь"));
    }

    #[tokio::test]
    async fn callbacks_skip_flood_guard() {
        let h = Harness::new();
        for _ in 0..11 {
            send(&h, USER, "/help").await;
        }

        handle(&h.state, Inbound::Callback(callback(USER, CHAT, dialogs::location::REQUEST_PAYLOAD))).await;
        assert_eq!(h.transport.last_text(), dialogs::location::PROMPT);
    }

    #[tokio::test]
    async fn command_after_cancel_routes_normally() {
        let h = Harness::new();
        let by_command = [
            ("/setcity", dialogs::CANCELLED),
            ("/weatherairports", dialogs::CANCELLED),
            ("/stations", dialogs::CANCELLED),
            ("/guess_temp", dialogs::guess::CANCELLED),
            ("/get_meteoweb", dialogs::CANCELLED),
        ];

        // Separate identities keep each round under the flood limit.
        for (n, (command, cancelled)) in by_command.into_iter().enumerate() {
            let user = Identity(100 + n as u64);
            send(&h, user, command).await;
            assert!(h.state.session.continuations.is_pending(user), "{command} left no dialog");

            send(&h, user, "отмена").await;
            assert_eq!(h.transport.last_text(), cancelled);

            send(&h, user, "/help").await;
            assert_eq!(h.transport.last_text(), plugins::info::HELP);
            assert!(!h.state.session.continuations.is_pending(user));
            assert!(!h.state.session.games.is_playing(user));
        }

        for (n, payload) in [
            dialogs::meteogram::ONE_CITY_PAYLOAD,
            dialogs::meteogram::SEVERAL_CITIES_PAYLOAD,
            dialogs::location::REQUEST_PAYLOAD,
        ]
        .into_iter()
        .enumerate()
        {
            let user = Identity(200 + n as u64);
            let peer = Peer(user.0 as i64);
            handle(&h.state, Inbound::Callback(callback(user, peer, payload))).await;
            assert!(h.state.session.continuations.is_pending(user), "{payload} left no dialog");

            send(&h, user, "Cancel").await;
            assert_eq!(h.transport.last_text(), dialogs::CANCELLED);

            send(&h, user, "/help").await;
            assert_eq!(h.transport.last_text(), plugins::info::HELP);
            assert!(!h.state.session.continuations.is_pending(user));
        }
    }

    #[tokio::test]
    async fn group_bot_suffix_routes() {
        let h = Harness::new();
        handle(
            &h.state,
            Inbound::Text(text(USER, Peer(-500), "/support@PogodaRadarBot")),
        )
        .await;
        assert!(h.transport.last_text().starts_with("🛠️"));
    }
}
