//! Inline button presses.
//!
//! Presses bypass flood control and pending dialogs. Each one is acknowledged
//! first, then answered with a new message.

use tracing::debug;

use crate::bot::dispatcher::AppState;
use crate::dialogs::{self, MeteogramMode, airport, location, meteogram};
use crate::models::CallbackEvent;

/// Dispatch a press by its payload.
pub async fn handle(state: &AppState, event: &CallbackEvent) -> anyhow::Result<()> {
    state.acknowledge(event).await;

    match event.payload.as_str() {
        airport::DECODE_PAYLOAD => {
            state.say(event.peer, airport::DECODE_HELP).await;
            Ok(())
        }
        meteogram::ONE_CITY_PAYLOAD => dialogs::meteogram::start(state, event, MeteogramMode::One).await,
        meteogram::SEVERAL_CITIES_PAYLOAD => {
            dialogs::meteogram::start(state, event, MeteogramMode::Several).await
        }
        location::REQUEST_PAYLOAD => dialogs::location::start(state, event).await,
        other => {
            debug!(payload = other, "Ignoring unknown callback payload");
            Ok(())
        }
    }
}
