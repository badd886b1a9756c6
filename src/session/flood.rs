//! Flood guard.
//!
//! Tracks request cadence per key and blocks keys that send more than
//! `limit` requests without a quiet gap of `interval`.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::config::FloodLimits;
use crate::models::{Identity, Peer};

/// Rate-limit bucket key.
///
/// The dispatcher keys on (peer, identity); a few weather handlers re-check
/// with the identity alone, which is a separate bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloodKey {
    pub peer: Option<Peer>,
    pub identity: Identity,
}

impl FloodKey {
    pub fn scoped(peer: Peer, identity: Identity) -> Self {
        Self {
            peer: Some(peer),
            identity,
        }
    }

    pub fn identity(identity: Identity) -> Self {
        Self { peer: None, identity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodVerdict {
    Allowed,
    /// Blocked for the remaining duration.
    Blocked(Duration),
}

impl FloodVerdict {
    pub fn is_blocked(self) -> bool {
        matches!(self, FloodVerdict::Blocked(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct RateState {
    last_request: Instant,
    count: u32,
    /// Set while blocked.
    block_until: Option<Instant>,
}

impl RateState {
    fn fresh(now: Instant) -> Self {
        Self {
            last_request: now,
            count: 1,
            block_until: None,
        }
    }
}

/// In-memory flood tracker. Entries are never swept.
#[derive(Debug)]
pub struct FloodGuard {
    table: DashMap<FloodKey, RateState>,
    limits: FloodLimits,
}

impl FloodGuard {
    pub fn new(limits: FloodLimits) -> Self {
        Self {
            table: DashMap::new(),
            limits,
        }
    }

    /// Record a request now and decide whether it may proceed.
    pub fn check(&self, key: FloodKey) -> FloodVerdict {
        self.check_at(key, Instant::now())
    }

    /// Record a request at `now`.
    ///
    /// The whole read-modify-write happens under the entry's shard lock.
    pub fn check_at(&self, key: FloodKey, now: Instant) -> FloodVerdict {
        let mut state = match self.table.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(RateState::fresh(now));
                return FloodVerdict::Allowed;
            }
            Entry::Occupied(slot) => slot.into_ref(),
        };

        if let Some(until) = state.block_until {
            if now >= until {
                *state = RateState::fresh(now);
                return FloodVerdict::Allowed;
            }
            return FloodVerdict::Blocked(until - now);
        }

        if now.saturating_duration_since(state.last_request) > self.limits.interval {
            *state = RateState::fresh(now);
            return FloodVerdict::Allowed;
        }

        state.count += 1;
        state.last_request = now;

        if state.count > self.limits.limit {
            state.block_until = Some(now + self.limits.block);
            debug!(identity = %key.identity, "Flood limit exceeded, blocking");
            return FloodVerdict::Blocked(self.limits.block);
        }

        FloodVerdict::Allowed
    }
}
