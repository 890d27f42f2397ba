//! Two-colour Ludo engine.
//!
//! A turn has two phases: roll, then move a token by the rolled amount. A
//! roll that leaves no token movable hands the turn over; a 6 earns another
//! roll. Capture happens only on the shared loop, by grid cell.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::shop::{ShopItem, Wallet};
use super::track::{advance, can_advance, cell_of, on_shared_loop, Cell, Color, FINISHED, TOKENS, YARD};
use crate::core::{ClockPolicy, GameRng, LudoRules, MoveError, PlayerId, PlayerMap, Rewards};
use crate::rules::{MatchRule, RoundResult, TurnBasedEngine};

const SIDES: usize = 2;

/// Paid dice bias for the human side's next roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceBias {
    #[default]
    None,
    /// 4 to 6.
    High,
    /// 1 to 3.
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LudoMove {
    Roll { bias: DiceBias },
    /// Advance token `0..4` of the active colour by the pending roll.
    Move { token: u8 },
    /// Shop purchase for the human side. Allowed at any time during play
    /// and never ends the turn.
    Buy(ShopItem),
}

impl LudoMove {
    pub const ROLL: LudoMove = LudoMove::Roll {
        bias: DiceBias::None,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LudoPhase {
    AwaitingRoll,
    AwaitingMove { roll: u8 },
}

/// A token sent back to the yard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub by: PlayerId,
    pub victim: PlayerId,
    pub token: u8,
    pub cell: Cell,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoState {
    /// Token positions per side; see `track` for the encoding.
    pub tokens: PlayerMap<[i8; TOKENS]>,
    pub active: PlayerId,
    pub phase: LudoPhase,
    pub last_roll: Option<u8>,
    pub last_capture: Option<Capture>,
    /// Match coins of the human side.
    pub wallet: Wallet,
}

impl LudoState {
    #[must_use]
    pub fn new(starting_coins: u32) -> Self {
        Self {
            tokens: PlayerMap::with_value(SIDES, [YARD; TOKENS]),
            active: PlayerId::HUMAN,
            phase: LudoPhase::AwaitingRoll,
            last_roll: None,
            last_capture: None,
            wallet: Wallet::new(starting_coins),
        }
    }

    #[must_use]
    pub fn position(&self, player: PlayerId, token: usize) -> i8 {
        self.tokens[player][token]
    }

    /// Tokens of `player` that can advance by `roll`.
    pub fn movable(&self, player: PlayerId, roll: u8) -> impl Iterator<Item = u8> + '_ {
        self.tokens[player]
            .iter()
            .enumerate()
            .filter(move |&(_, &pos)| can_advance(pos, roll))
            .map(|(i, _)| i as u8)
    }

    #[must_use]
    pub fn finished(&self, player: PlayerId) -> usize {
        self.tokens[player].iter().filter(|&&p| p == FINISHED).count()
    }

    fn pass_turn(&mut self) {
        self.active = self.active.next(SIDES);
        self.phase = LudoPhase::AwaitingRoll;
    }

    /// Send home the first opponent token sharing `cell` on the loop.
    fn capture_at(&mut self, mover: PlayerId, cell: Cell) -> Option<Capture> {
        let victim = mover.next(SIDES);
        let color = Color::of(victim);

        let token = self.tokens[victim]
            .iter()
            .position(|&pos| on_shared_loop(pos) && cell_of(color, pos) == Some(cell))?;
        self.tokens[victim][token] = YARD;
        Some(Capture {
            by: mover,
            victim,
            token: token as u8,
            cell,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct LudoGame {
    rules: LudoRules,
}

impl LudoGame {
    #[must_use]
    pub fn new(rules: LudoRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &LudoRules {
        &self.rules
    }

    fn roll(
        &self,
        state: &LudoState,
        player: PlayerId,
        bias: DiceBias,
        rng: &mut GameRng,
    ) -> Result<LudoState, MoveError> {
        if state.phase != LudoPhase::AwaitingRoll {
            return Err(MoveError::Illegal("a roll is already pending"));
        }

        let mut next = state.clone();
        let value = match bias {
            DiceBias::None => rng.roll_die(),
            DiceBias::High | DiceBias::Low => {
                if player != PlayerId::HUMAN {
                    return Err(MoveError::Illegal("only the human side can bias the dice"));
                }
                next.wallet.spend(self.rules.biased_roll_cost)?;
                let base = if bias == DiceBias::High { 4 } else { 1 };
                base + rng.gen_range(0..3) as u8
            }
        };

        next.last_roll = Some(value);
        next.last_capture = None;
        if state.movable(player, value).next().is_some() {
            next.phase = LudoPhase::AwaitingMove { roll: value };
        } else {
            debug!(%player, roll = value, "no movable token; turn passes");
            next.pass_turn();
        }
        Ok(next)
    }

    fn move_token(&self, state: &LudoState, player: PlayerId, token: u8) -> Result<LudoState, MoveError> {
        let LudoPhase::AwaitingMove { roll } = state.phase else {
            return Err(MoveError::Illegal("roll first"));
        };
        let index = usize::from(token);
        let from = *state.tokens[player]
            .get(index)
            .ok_or(MoveError::Illegal("no such token"))?;
        if !can_advance(from, roll) {
            return Err(MoveError::Illegal("token cannot move by that roll"));
        }

        let mut next = state.clone();
        let to = advance(from, roll);
        next.tokens[player][index] = to;

        if on_shared_loop(to) {
            if let Some(cell) = cell_of(Color::of(player), to) {
                next.last_capture = next.capture_at(player, cell);
            }
        }

        if roll == 6 || next.finished(player) == TOKENS {
            next.phase = LudoPhase::AwaitingRoll;
        } else {
            next.pass_turn();
        }
        Ok(next)
    }
}

impl TurnBasedEngine for LudoGame {
    type State = LudoState;
    type Move = LudoMove;

    fn name(&self) -> &'static str {
        "ludo"
    }

    fn player_count(&self) -> usize {
        SIDES
    }

    fn deal(&self, _rng: &mut GameRng) -> LudoState {
        LudoState::new(self.rules.starting_coins)
    }

    fn active_player(&self, state: &LudoState) -> PlayerId {
        state.active
    }

    fn legal_moves(&self, state: &LudoState, player: PlayerId) -> Vec<LudoMove> {
        if player != state.active || self.round_result(state).is_some() {
            return vec![];
        }
        match state.phase {
            LudoPhase::AwaitingRoll => vec![LudoMove::ROLL],
            LudoPhase::AwaitingMove { roll } => state
                .movable(player, roll)
                .map(|token| LudoMove::Move { token })
                .collect(),
        }
    }

    fn apply(
        &self,
        state: &LudoState,
        player: PlayerId,
        mv: &LudoMove,
        rng: &mut GameRng,
    ) -> Result<LudoState, MoveError> {
        if self.round_result(state).is_some() {
            return Err(MoveError::NotPlaying);
        }

        match *mv {
            LudoMove::Roll { bias } => {
                MoveError::check_turn(player, state.active)?;
                self.roll(state, player, bias, rng)
            }
            LudoMove::Move { token } => {
                MoveError::check_turn(player, state.active)?;
                self.move_token(state, player, token)
            }
            LudoMove::Buy(item) => {
                if player != PlayerId::HUMAN {
                    return Err(MoveError::Illegal("only the human side has a wallet"));
                }
                let mut next = state.clone();
                next.wallet.buy(item, self.rules.auto_play_cost)?;
                Ok(next)
            }
        }
    }

    fn on_timeout(&self, state: &LudoState) -> LudoState {
        let mut next = state.clone();
        next.pass_turn();
        next
    }

    fn round_result(&self, state: &LudoState) -> Option<RoundResult> {
        state
            .tokens
            .player_ids()
            .find(|&p| state.finished(p) == TOKENS)
            .map(|p| RoundResult::won(p, 0))
    }

    fn clock_policy(&self) -> ClockPolicy {
        ClockPolicy::PerTurn(Duration::from_secs(self.rules.turn_seconds))
    }

    fn match_rule(&self) -> MatchRule {
        MatchRule::SingleRound
    }

    fn rewards(&self) -> Rewards {
        self.rules.rewards
    }

    fn is_side_action(&self, mv: &LudoMove) -> bool {
        matches!(mv, LudoMove::Buy(_))
    }

    fn auto_play_bought(&self, before: &LudoState, after: &LudoState, player: PlayerId) -> bool {
        player == PlayerId::HUMAN && !before.wallet.auto_play && after.wallet.auto_play
    }

    /// Roll when a roll is due, otherwise a uniformly random movable token.
    fn choose_bot_move(&self, state: &LudoState, player: PlayerId, rng: &mut GameRng) -> Option<LudoMove> {
        let moves = self.legal_moves(state, player);
        rng.choose(&moves).copied()
    }
}
