//! Per-process conversational state.
//!
//! `SessionManager` owns the flood table, the continuation registry and the
//! game table. It is shared by reference with the dispatcher and every
//! handler; nothing else mutates these maps.

pub mod continuation;
pub mod flood;
pub mod game;

use std::time::{Duration, Instant};

use tracing::debug;

pub use continuation::{ContinuationRegistry, Lookup, Pending, Ticket};
pub use flood::{FloodGuard, FloodKey, FloodVerdict};
pub use game::{GameTable, GuessOutcome, Hint};

use crate::config::FloodLimits;
use crate::dialogs::DialogKind;
use crate::models::Identity;

pub struct SessionManager {
    pub flood: FloodGuard,
    pub continuations: ContinuationRegistry<DialogKind>,
    pub games: GameTable,
}

impl SessionManager {
    pub fn new(limits: FloodLimits, idle_timeout: Option<Duration>) -> Self {
        Self {
            flood: FloodGuard::new(limits),
            continuations: ContinuationRegistry::new(idle_timeout),
            games: GameTable::new(),
        }
    }

    /// Start waiting for the identity's next message.
    ///
    /// Anything other than the game replaces the game's continuation, so its
    /// state goes too.
    pub fn await_input(&self, identity: Identity, dialog: DialogKind, once: bool) -> Ticket {
        if !matches!(dialog, DialogKind::GuessTemp) {
            self.games.end(identity);
        }
        let replacing = self.continuations.is_pending(identity);
        debug!(%identity, ?dialog, once, replacing, "Awaiting input");
        self.continuations.install(identity, dialog, once)
    }

    /// The continuation to run for this identity, if any.
    pub fn pending(&self, identity: Identity, now: Instant) -> Option<Pending<DialogKind>> {
        match self.continuations.lookup_at(identity, now) {
            Lookup::Active(pending) => Some(pending),
            Lookup::Expired(dialog) => {
                debug!(%identity, ?dialog, "Dialog expired");
                self.games.end(identity);
                None
            }
            Lookup::Absent => None,
        }
    }

    /// Tear down a finished, cancelled or failed dialog.
    pub fn finish(&self, identity: Identity, ticket: Ticket) {
        if self.continuations.clear_if(identity, ticket) {
            self.games.end(identity);
        }
    }

    /// Chain to the next stage of a dialog.
    pub fn advance(&self, identity: Identity, ticket: Ticket, dialog: DialogKind, once: bool, now: Instant) {
        if self
            .continuations
            .replace_if(identity, ticket, dialog, once, now)
            .is_none()
        {
            debug!(%identity, "Dialog was replaced while running, dropping next stage");
        }
    }
}
