//! Move history records.
//!
//! Each game defines its own move descriptor; the session stamps every
//! committed move with who made it and when, for replays and debugging.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A committed move with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord<M> {
    pub player: PlayerId,
    pub mv: M,
    /// Round the move was made in.
    pub round: u32,
    /// Sequence number within the match.
    pub sequence: u32,
}

impl<M> MoveRecord<M> {
    #[must_use]
    pub fn new(player: PlayerId, mv: M, round: u32, sequence: u32) -> Self {
        Self {
            player,
            mv,
            round,
            sequence,
        }
    }
}
