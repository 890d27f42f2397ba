//! Move rejection taxonomy.
//!
//! Engines return `MoveError` from `apply`; the session turns every error
//! into a silent no-op for the host. The variants exist so tests and logs
//! can tell an illegal move from an out-of-turn one.

use thiserror::Error;

use super::player::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("{player} acted out of turn; {active} is to move")]
    OutOfTurn { player: PlayerId, active: PlayerId },

    #[error("illegal move: {0}")]
    Illegal(&'static str),

    #[error("the round is not in play")]
    NotPlaying,

    #[error("draw pile is exhausted")]
    PileExhausted,

    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u32, available: u32 },
}

impl MoveError {
    /// Guard used at the top of every `apply`.
    pub fn check_turn(player: PlayerId, active: PlayerId) -> Result<(), MoveError> {
        if player == active {
            Ok(())
        } else {
            Err(MoveError::OutOfTurn { player, active })
        }
    }
}
