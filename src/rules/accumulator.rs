//! Cross-round score accumulation and the match-level win condition.

use serde::{Deserialize, Serialize};

use super::engine::{MatchRule, RoundResult};
use crate::core::{PlayerId, PlayerMap};

/// What a recorded round means for the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchDecision {
    /// Deal another round.
    Continue,
    Won(PlayerId),
    /// A single-round match ended without a winner.
    Drawn,
}

/// Per-side running totals. Totals never decrease.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    totals: PlayerMap<u32>,
    rounds_played: u32,
}

impl MatchScore {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            totals: PlayerMap::with_value(player_count, 0),
            rounds_played: 0,
        }
    }

    #[must_use]
    pub fn total(&self, player: PlayerId) -> u32 {
        self.totals[player]
    }

    #[must_use]
    pub fn totals(&self) -> &PlayerMap<u32> {
        &self.totals
    }

    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Credit a round and decide whether the match is over.
    pub fn record(&mut self, rule: MatchRule, result: RoundResult) -> MatchDecision {
        self.rounds_played += 1;
        if let Some(winner) = result.winner {
            self.totals[winner] = self.totals[winner].saturating_add(result.points);
        }

        match (rule, result.winner) {
            (MatchRule::SingleRound, Some(winner)) => MatchDecision::Won(winner),
            (MatchRule::SingleRound, None) => MatchDecision::Drawn,
            (MatchRule::Accumulate { target }, Some(winner)) if self.totals[winner] >= target => {
                MatchDecision::Won(winner)
            }
            (MatchRule::Accumulate { .. }, _) => MatchDecision::Continue,
        }
    }
}
