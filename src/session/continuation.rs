//! Continuation registry.
//!
//! At most one pending continuation per identity. Installing replaces any
//! earlier one (last writer wins). Every install gets a fresh ticket, and
//! post-invocation removal or replacement only applies while that ticket is
//! still current, so a newer prompt installed during an awaited step survives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::models::Identity;

/// Identifies one particular install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Snapshot of the continuation that is about to be invoked.
#[derive(Debug, Clone)]
pub struct Pending<D> {
    pub dialog: D,
    pub once: bool,
    pub ticket: Ticket,
}

/// Result of looking up an identity.
#[derive(Debug, Clone)]
pub enum Lookup<D> {
    Active(Pending<D>),
    /// Idle for longer than the timeout; already removed.
    Expired(D),
    Absent,
}

#[derive(Debug, Clone)]
struct Slot<D> {
    dialog: D,
    once: bool,
    ticket: Ticket,
    touched: Instant,
}

#[derive(Debug)]
pub struct ContinuationRegistry<D> {
    slots: DashMap<Identity, Slot<D>>,
    next_ticket: AtomicU64,
    idle_timeout: Option<Duration>,
}

impl<D: Clone> ContinuationRegistry<D> {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            slots: DashMap::new(),
            next_ticket: AtomicU64::new(1),
            idle_timeout,
        }
    }

    fn issue(&self) -> Ticket {
        Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed))
    }

    /// Install a continuation, discarding any uninvoked one.
    pub fn install(&self, identity: Identity, dialog: D, once: bool) -> Ticket {
        self.install_at(identity, dialog, once, Instant::now())
    }

    pub fn install_at(&self, identity: Identity, dialog: D, once: bool, now: Instant) -> Ticket {
        let ticket = self.issue();
        self.slots.insert(
            identity,
            Slot {
                dialog,
                once,
                ticket,
                touched: now,
            },
        );
        ticket
    }

    /// Current continuation for `identity`, dropping it if it went idle.
    pub fn lookup_at(&self, identity: Identity, now: Instant) -> Lookup<D> {
        let Some(slot) = self.slots.get(&identity).map(|s| s.value().clone()) else {
            return Lookup::Absent;
        };

        if let Some(timeout) = self.idle_timeout {
            if now.saturating_duration_since(slot.touched) > timeout {
                self.clear_if(identity, slot.ticket);
                return Lookup::Expired(slot.dialog);
            }
        }

        Lookup::Active(Pending {
            dialog: slot.dialog,
            once: slot.once,
            ticket: slot.ticket,
        })
    }

    pub fn is_pending(&self, identity: Identity) -> bool {
        self.slots.contains_key(&identity)
    }

    /// Remove only if `ticket` is still the installed one.
    pub fn clear_if(&self, identity: Identity, ticket: Ticket) -> bool {
        self.slots
            .remove_if(&identity, |_, slot| slot.ticket == ticket)
            .is_some()
    }

    /// Replace the continuation with the next stage, only if `ticket` is
    /// still the installed one.
    pub fn replace_if(&self, identity: Identity, ticket: Ticket, dialog: D, once: bool, now: Instant) -> Option<Ticket> {
        let mut slot = self.slots.get_mut(&identity)?;
        if slot.ticket != ticket {
            return None;
        }
        let next = self.issue();
        *slot = Slot {
            dialog,
            once,
            ticket: next,
            touched: now,
        };
        Some(next)
    }

    /// Refresh the idle clock of a continuation that stays in place.
    pub fn touch(&self, identity: Identity, ticket: Ticket, now: Instant) {
        if let Some(mut slot) = self.slots.get_mut(&identity) {
            if slot.ticket == ticket {
                slot.touched = now;
            }
        }
    }
}
