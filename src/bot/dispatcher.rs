//! Message dispatcher setup.
//!
//! Builds the teloxide dispatcher and the shared application state. Updates
//! are converted into transport-neutral `Inbound` events here and handed to
//! `events::handle`.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::bot::transport::Transport;
use crate::events;
use crate::models::{CallbackEvent, GeoPoint, Identity, Inbound, OutgoingMessage, Peer, TextMessage};
use crate::provider::{DataProvider, WeatherApi};
use crate::session::SessionManager;
use crate::storage::{ActivityLog, CityStore, MeteogramCatalog};

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Outbound reply channel.
    pub transport: Arc<dyn Transport>,

    /// Weather JSON, scraped pages and map images.
    pub provider: Arc<dyn DataProvider>,
    pub weather: WeatherApi,

    /// City preferences.
    pub cities: Arc<dyn CityStore>,

    /// Usage log read by `stats`.
    pub activity: Arc<dyn ActivityLog>,

    pub meteograms: Arc<MeteogramCatalog>,

    /// Flood table, continuations and games.
    pub session: Arc<SessionManager>,

    /// The only identity allowed to read statistics.
    pub admin_id: Identity,
}

impl AppState {
    pub fn is_admin(&self, identity: Identity) -> bool {
        identity == self.admin_id
    }

    /// Send a reply. Delivery failures are logged and dropped.
    pub async fn reply(&self, peer: Peer, message: OutgoingMessage) {
        if let Err(e) = self.transport.send(peer, message).await {
            warn!(%peer, "Failed to deliver reply: {}", e);
        }
    }

    /// Send a plain text reply.
    pub async fn say(&self, peer: Peer, text: impl Into<String>) {
        self.reply(peer, OutgoingMessage::text(text)).await;
    }

    /// Stop the client-side spinner of a button press.
    pub async fn acknowledge(&self, event: &CallbackEvent) {
        if let Err(e) = self.transport.acknowledge_callback(event).await {
            warn!(peer = %event.peer, "Failed to acknowledge callback: {}", e);
        }
    }
}

/// Build the dispatcher.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    let message_handler = Update::filter_message().endpoint(on_message);
    let callback_handler = Update::filter_callback_query().endpoint(on_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

async fn on_message(msg: Message, state: AppState) -> anyhow::Result<()> {
    match text_message(&msg) {
        Some(text) => events::handle(&state, Inbound::Text(text)).await,
        None => debug!(chat = msg.chat.id.0, "Ignoring message without sender"),
    }
    Ok(())
}

async fn on_callback(q: CallbackQuery, state: AppState) -> anyhow::Result<()> {
    events::handle(&state, Inbound::Callback(callback_event(&q))).await;
    Ok(())
}

/// Convert a Telegram message. Messages from bots or without a sender are skipped.
fn text_message(msg: &Message) -> Option<TextMessage> {
    let user = msg.from.as_ref().filter(|u| !u.is_bot)?;

    Some(TextMessage {
        identity: Identity(user.id.0),
        peer: Peer(msg.chat.id.0),
        display_name: user
            .username
            .as_ref()
            .map(|u| format!("@{}", u))
            .unwrap_or_else(|| user.full_name()),
        text: msg.text().or_else(|| msg.caption()).unwrap_or_default().to_string(),
        location: msg.location().map(|l| GeoPoint {
            latitude: l.latitude,
            longitude: l.longitude,
        }),
    })
}

fn callback_event(q: &CallbackQuery) -> CallbackEvent {
    // Inaccessible (very old) messages still carry their chat.
    let peer = q
        .message
        .as_ref()
        .map(|m| m.chat().id.0)
        .unwrap_or(q.from.id.0 as i64);

    CallbackEvent {
        identity: Identity(q.from.id.0),
        peer: Peer(peer),
        event_id: q.id.clone(),
        payload: q.data.clone().unwrap_or_default(),
    }
}
