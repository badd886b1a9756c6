//! Multi-step dialogs.
//!
//! A dialog is a `DialogKind` installed in the continuation registry. The
//! identity's next text message is fed to `consume`, which runs the step for
//! the installed kind and applies the returned `Transition`.

pub mod airport;
pub mod guess;
pub mod location;
pub mod meteogram;
pub mod meteoweb;
pub mod set_city;
pub mod station;

use std::time::Instant;

use tracing::{debug, warn};

use crate::bot::dispatcher::AppState;
use crate::models::{OutgoingMessage, TextMessage};
use crate::plugins::main_keyboard;
use crate::session::Pending;
use crate::utils::is_cancel;

pub const ERROR_NOTICE: &str = "⚠️ Произошла ошибка.";
pub const CANCELLED: &str = "❌ Отменено";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationStage {
    Region,
    Station { region_code: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteogramMode {
    One,
    Several,
}

/// What the identity's next message is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    SetCity,
    /// `retried` is set once an upstream failure has granted a second try.
    AirportLookup { retried: bool },
    StationLookup(StationStage),
    GuessTemp,
    Meteogram(MeteogramMode),
    Meteoweb,
    Location,
}

/// What happens to the continuation after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Dialog over: remove the continuation (and any game).
    Finish,
    /// Keep waiting with the same dialog, unless it was installed as one-shot.
    Stay,
    /// Replace with the next stage.
    Advance { dialog: DialogKind, once: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Handled,
    NotRegistered,
}

/// Feed a message to the identity's pending dialog, if there is one.
pub async fn consume(state: &AppState, msg: &TextMessage) -> Consumed {
    let Some(pending) = state.session.pending(msg.identity, Instant::now()) else {
        return Consumed::NotRegistered;
    };
    let Pending { dialog, once, ticket } = pending;
    debug!(identity = %msg.identity, ?dialog, "Running dialog step");

    let result = if is_cancel(&msg.text) {
        cancel(state, msg, &dialog).await
    } else {
        step(state, msg, &dialog).await
    };

    let session = &state.session;
    match result {
        Ok(Transition::Finish) => session.finish(msg.identity, ticket),
        Ok(Transition::Stay) if once => session.finish(msg.identity, ticket),
        Ok(Transition::Stay) => session.continuations.touch(msg.identity, ticket, Instant::now()),
        Ok(Transition::Advance { dialog, once }) => {
            session.advance(msg.identity, ticket, dialog, once, Instant::now())
        }
        Err(e) => {
            warn!(identity = %msg.identity, ?dialog, "Dialog step failed: {:#}", e);
            session.finish(msg.identity, ticket);
            state.say(msg.peer, ERROR_NOTICE).await;
        }
    }

    Consumed::Handled
}

async fn step(state: &AppState, msg: &TextMessage, dialog: &DialogKind) -> anyhow::Result<Transition> {
    match dialog {
        DialogKind::SetCity => set_city::step(state, msg).await,
        DialogKind::AirportLookup { retried } => airport::step(state, msg, *retried).await,
        DialogKind::StationLookup(stage) => station::step(state, msg, stage).await,
        DialogKind::GuessTemp => guess::step(state, msg).await,
        DialogKind::Meteogram(mode) => meteogram::step(state, msg, *mode).await,
        DialogKind::Meteoweb => meteoweb::step(state, msg).await,
        DialogKind::Location => location::step(state, msg).await,
    }
}

async fn cancel(state: &AppState, msg: &TextMessage, dialog: &DialogKind) -> anyhow::Result<Transition> {
    let reply = match dialog {
        DialogKind::GuessTemp => {
            state.session.games.end(msg.identity);
            OutgoingMessage::text(guess::CANCELLED).keyboard(main_keyboard(msg.peer))
        }
        DialogKind::StationLookup(_) if msg.peer.is_private() => {
            OutgoingMessage::text(CANCELLED).keyboard(main_keyboard(msg.peer))
        }
        _ => OutgoingMessage::text(CANCELLED),
    };
    state.reply(msg.peer, reply).await;
    Ok(Transition::Finish)
}
