//! The turn-based engine trait implemented by every game.
//!
//! An engine is a pure rules object: it owns only configuration, and every
//! transition takes the current state by reference and returns the next one.
//! The session owns the mutable slot that holds the current state.

use std::fmt::Debug;

use crate::core::{ClockPolicy, GameRng, MoveError, PlayerId, Rewards};

/// Outcome of a finished round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResult {
    /// `None` for a drawn round (blocked domino board with equal pips).
    pub winner: Option<PlayerId>,
    /// Points credited to the winner's match total.
    pub points: u32,
}

impl RoundResult {
    #[must_use]
    pub fn won(winner: PlayerId, points: u32) -> Self {
        Self {
            winner: Some(winner),
            points,
        }
    }

    #[must_use]
    pub fn drawn() -> Self {
        Self {
            winner: None,
            points: 0,
        }
    }
}

/// How round results turn into a match result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Points accumulate across rounds until a side reaches `target`.
    Accumulate { target: u32 },
    /// The first round result decides the match.
    SingleRound,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: the moves the bot may pick from. Empty when `player`
///   is not the side to move or the round is over.
/// - `apply`: authoritative legality check. Must leave `state` untouched and
///   return `Err` for anything illegal or out of turn.
/// - `on_timeout`: the game's expiry rule; called only by the session clock.
/// - `round_result`: `None` while the round continues.
pub trait TurnBasedEngine {
    type State: Clone + Debug;
    type Move: Clone + Debug + PartialEq;

    /// Short game name for logs.
    fn name(&self) -> &'static str;

    fn player_count(&self) -> usize;

    /// Build the deck or board and deal a fresh round.
    fn deal(&self, rng: &mut GameRng) -> Self::State;

    fn active_player(&self, state: &Self::State) -> PlayerId;

    fn legal_moves(&self, state: &Self::State, player: PlayerId) -> Vec<Self::Move>;

    fn apply(
        &self,
        state: &Self::State,
        player: PlayerId,
        mv: &Self::Move,
        rng: &mut GameRng,
    ) -> Result<Self::State, MoveError>;

    fn on_timeout(&self, state: &Self::State) -> Self::State;

    fn round_result(&self, state: &Self::State) -> Option<RoundResult>;

    fn clock_policy(&self) -> ClockPolicy;

    fn match_rule(&self) -> MatchRule;

    fn rewards(&self) -> Rewards;

    /// Heuristic value of a move for the greedy bot. Higher is better.
    fn bot_score(&self, _state: &Self::State, _player: PlayerId, _mv: &Self::Move) -> f64 {
        0.0
    }

    /// Pick a move for a bot-driven side.
    ///
    /// Default: greedy on `bot_score` with uniform jitter in [0, 1) so equal
    /// scores are broken at random.
    fn choose_bot_move(
        &self,
        state: &Self::State,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Option<Self::Move> {
        let mut best: Option<(f64, Self::Move)> = None;
        for mv in self.legal_moves(state, player) {
            let score = self.bot_score(state, player, &mv) + rng.jitter();
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, mv));
            }
        }
        best.map(|(_, mv)| mv)
    }

    /// Moves that change the state without using up the turn, like shop
    /// purchases. They are never offered by `legal_moves`.
    fn is_side_action(&self, _mv: &Self::Move) -> bool {
        false
    }

    /// Whether going from `before` to `after` bought auto-play for `player`.
    fn auto_play_bought(&self, _before: &Self::State, _after: &Self::State, _player: PlayerId) -> bool {
        false
    }

    /// Whether `mv` is among the bot-visible legal moves.
    fn is_legal(&self, state: &Self::State, player: PlayerId, mv: &Self::Move) -> bool {
        self.legal_moves(state, player).contains(mv)
    }
}
