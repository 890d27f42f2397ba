//! Notifications the session hands back to its host.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A round was dealt; `round` starts at 1.
    RoundStarted { round: u32 },
    TurnChanged { active: PlayerId },
    /// `winner` is `None` for a drawn round.
    RoundEnded { winner: Option<PlayerId>, points: u32 },
    /// Terminal. `coins_reward` is the payout for the human seat.
    MatchEnded {
        winner: Option<PlayerId>,
        coins_reward: u32,
    },
    /// The host should charge `amount` from the player's global wallet.
    CoinsSpent { player: PlayerId, amount: u32 },
}

/// Deferred work queued on the session scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Let the bot act for this side if it is still on turn.
    BotMove(PlayerId),
    RestartRound,
}
