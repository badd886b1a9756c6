//! Guess-the-temperature game state.
//!
//! One `GameState` per identity while a game is running. The dialog layer
//! keeps it in step with the identity's continuation.

use std::ops::RangeInclusive;
use std::time::Instant;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use tracing::debug;

use crate::models::Identity;

/// Range the hidden temperature is drawn from, in °C.
pub const TARGET_RANGE: RangeInclusive<i32> = -30..=40;

pub const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
pub struct GameState {
    pub target: i32,
    pub attempts: u32,
    pub max_attempts: u32,
    pub last_guess: Instant,
}

/// Proximity hint, by absolute distance from the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// More than 20 degrees off.
    Freezing,
    /// More than 10.
    Cold,
    /// More than 5.
    Warm,
    Hot,
}

impl Hint {
    pub fn for_distance(distance: u32) -> Self {
        match distance {
            d if d > 20 => Hint::Freezing,
            d if d > 10 => Hint::Cold,
            d if d > 5 => Hint::Warm,
            _ => Hint::Hot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Won { target: i32, attempts: u32 },
    Lost { target: i32 },
    Miss { hint: Hint, attempts: u32, max_attempts: u32 },
}

#[derive(Debug, Default)]
pub struct GameTable {
    games: DashMap<Identity, GameState>,
}

impl GameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a game with a random target. Returns `None` if one is running.
    pub fn start(&self, identity: Identity, now: Instant) -> Option<i32> {
        let target = rand::thread_rng().gen_range(TARGET_RANGE);
        self.start_with(identity, target, now).then_some(target)
    }

    /// Start a game with a known target. Returns `false` if one is running.
    pub fn start_with(&self, identity: Identity, target: i32, now: Instant) -> bool {
        match self.games.entry(identity) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(GameState {
                    target,
                    attempts: 0,
                    max_attempts: MAX_ATTEMPTS,
                    last_guess: now,
                });
                true
            }
        }
    }

    pub fn is_playing(&self, identity: Identity) -> bool {
        self.games.contains_key(&identity)
    }

    /// Count a numeric guess. Terminal outcomes remove the game.
    /// Returns `None` when no game is running.
    pub fn guess(&self, identity: Identity, guess: i32, now: Instant) -> Option<GuessOutcome> {
        let outcome = {
            let mut game = self.games.get_mut(&identity)?;
            debug!(%identity, since_last = ?now.saturating_duration_since(game.last_guess), "Guess received");
            game.attempts += 1;
            game.last_guess = now;

            if guess == game.target {
                GuessOutcome::Won {
                    target: game.target,
                    attempts: game.attempts,
                }
            } else if game.attempts >= game.max_attempts {
                GuessOutcome::Lost { target: game.target }
            } else {
                GuessOutcome::Miss {
                    hint: Hint::for_distance(game.target.abs_diff(guess)),
                    attempts: game.attempts,
                    max_attempts: game.max_attempts,
                }
            }
        };

        if !matches!(outcome, GuessOutcome::Miss { .. }) {
            self.games.remove(&identity);
        }
        Some(outcome)
    }

    /// Drop the game, if any.
    pub fn end(&self, identity: Identity) {
        self.games.remove(&identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: Identity = Identity(3);

    #[test]
    fn hint_buckets() {
        assert_eq!(Hint::for_distance(21), Hint::Freezing);
        assert_eq!(Hint::for_distance(20), Hint::Cold);
        assert_eq!(Hint::for_distance(11), Hint::Cold);
        assert_eq!(Hint::for_distance(10), Hint::Warm);
        assert_eq!(Hint::for_distance(6), Hint::Warm);
        assert_eq!(Hint::for_distance(5), Hint::Hot);
        assert_eq!(Hint::for_distance(1), Hint::Hot);
    }

    #[test]
    fn random_target_in_range() {
        let table = GameTable::new();
        let target = table.start(USER, Instant::now()).unwrap();
        assert!(TARGET_RANGE.contains(&target));
        assert!(table.start(USER, Instant::now()).is_none());
    }

    #[test]
    fn exact_guess_wins_and_clears() {
        let table = GameTable::new();
        let now = Instant::now();
        assert!(table.start_with(USER, 12, now));

        assert_eq!(
            table.guess(USER, -20, now),
            Some(GuessOutcome::Miss {
                hint: Hint::Freezing,
                attempts: 1,
                max_attempts: MAX_ATTEMPTS
            })
        );
        assert_eq!(
            table.guess(USER, 12, now),
            Some(GuessOutcome::Won { target: 12, attempts: 2 })
        );
        assert!(!table.is_playing(USER));
    }

    #[test]
    fn five_misses_lose_and_allow_restart() {
        let table = GameTable::new();
        let now = Instant::now();
        table.start_with(USER, 0, now);

        for _ in 0..4 {
            assert!(matches!(table.guess(USER, 3, now), Some(GuessOutcome::Miss { hint: Hint::Hot, .. })));
        }
        assert_eq!(table.guess(USER, 3, now), Some(GuessOutcome::Lost { target: 0 }));
        assert!(table.guess(USER, 3, now).is_none());
        assert!(table.start_with(USER, 5, now));
    }
}
