//! Turn state shared by every game: whose turn it is, the turn clock, and
//! the round status.
//!
//! ## Status lifecycle
//!
//! `Playing` → `RoundOver` (accumulated games, awaiting the next deal)
//! → `Playing` ... → `GameOver` once the match is decided or abandoned.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::player::PlayerId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    RoundOver,
    GameOver,
}

/// How a game times its turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockPolicy {
    /// Countdown restarted on every committed move; expiry invokes the
    /// engine's timeout rule.
    PerTurn(Duration),
    /// Shared countdown for display only; expiry changes nothing.
    Decorative(Duration),
    Untimed,
}

/// A countdown driven by host ticks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    policy: ClockPolicy,
    remaining: Duration,
}

impl TurnClock {
    #[must_use]
    pub fn new(policy: ClockPolicy) -> Self {
        let remaining = match policy {
            ClockPolicy::PerTurn(full) | ClockPolicy::Decorative(full) => full,
            ClockPolicy::Untimed => Duration::ZERO,
        };
        Self { policy, remaining }
    }

    #[must_use]
    pub fn policy(&self) -> ClockPolicy {
        self.policy
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Restart the countdown for a new turn. Decorative clocks keep running.
    pub fn reset_for_turn(&mut self) {
        if let ClockPolicy::PerTurn(full) = self.policy {
            self.remaining = full;
        }
    }

    /// Let time pass. Returns true when a per-turn countdown just expired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        match self.policy {
            ClockPolicy::Untimed => false,
            ClockPolicy::Decorative(_) => {
                self.remaining = self.remaining.saturating_sub(elapsed);
                false
            }
            ClockPolicy::PerTurn(_) => {
                if self.remaining.is_zero() {
                    return false;
                }
                self.remaining = self.remaining.saturating_sub(elapsed);
                self.remaining.is_zero()
            }
        }
    }
}

/// Turn state owned by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub active: PlayerId,
    pub status: GameStatus,
    pub clock: TurnClock,
    /// Round number within the match (starts at 1).
    pub round: u32,
}

impl TurnState {
    #[must_use]
    pub fn new(active: PlayerId, policy: ClockPolicy) -> Self {
        Self {
            active,
            status: GameStatus::Playing,
            clock: TurnClock::new(policy),
            round: 1,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
