//! Two-sided property trading engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::{step, tile, TileKind, BOARD_SIZE};
use crate::core::{BankRules, ClockPolicy, GameRng, MoveError, PlayerId, PlayerMap, Rewards};
use crate::rules::{MatchRule, RoundResult, TurnBasedEngine};

const SIDES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankMove {
    Roll,
    Buy,
    Decline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankPhase {
    AwaitingRoll,
    /// The active side landed on an unowned property it can afford.
    AwaitingBuyDecision { tile: usize },
}

/// What happened on the last landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Landing {
    Rest,
    Jail,
    Tax { amount: i64 },
    /// Positive for a gain, negative for a loss.
    Chance { amount: i64 },
    Offer { tile: usize, price: i64 },
    CannotAfford { tile: usize },
    OwnProperty { tile: usize },
    Rent { tile: usize, amount: i64, to: PlayerId },
    Bought { tile: usize },
    Declined { tile: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankState {
    pub money: PlayerMap<i64>,
    pub positions: PlayerMap<usize>,
    pub owners: [Option<PlayerId>; BOARD_SIZE],
    pub active: PlayerId,
    pub phase: BankPhase,
    pub last_roll: Option<u8>,
    pub passed_start: bool,
    pub landing: Option<Landing>,
}

impl BankState {
    #[must_use]
    pub fn new(starting_money: i64) -> Self {
        Self {
            money: PlayerMap::with_value(SIDES, starting_money),
            positions: PlayerMap::with_value(SIDES, 0),
            owners: [None; BOARD_SIZE],
            active: PlayerId::HUMAN,
            phase: BankPhase::AwaitingRoll,
            last_roll: None,
            passed_start: false,
            landing: None,
        }
    }

    /// Tile indices owned by `player`.
    pub fn holdings(&self, player: PlayerId) -> impl Iterator<Item = usize> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == Some(player))
            .map(|(i, _)| i)
    }

    fn bankrupt(&self) -> Option<PlayerId> {
        self.money.iter().find(|&(_, &m)| m < 0).map(|(p, _)| p)
    }

    /// Close the turn: hand over unless someone went bankrupt.
    fn finish_turn(&mut self) {
        self.phase = BankPhase::AwaitingRoll;
        if self.bankrupt().is_none() {
            self.active = self.active.next(SIDES);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BankGame {
    rules: BankRules,
}

impl BankGame {
    #[must_use]
    pub fn new(rules: BankRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &BankRules {
        &self.rules
    }

    /// Apply the effect of landing on `index`. Leaves the turn open only for
    /// a buy decision.
    fn resolve_landing(&self, state: &mut BankState, player: PlayerId, index: usize, rng: &mut GameRng) {
        let Some(board_tile) = tile(index) else {
            state.finish_turn();
            return;
        };

        let landing = match board_tile.kind {
            TileKind::Start => Landing::Rest,
            TileKind::Jail => Landing::Jail,
            TileKind::Tax => {
                state.money[player] -= self.rules.tax;
                Landing::Tax {
                    amount: self.rules.tax,
                }
            }
            TileKind::Chance => {
                let amount = if rng.gen_bool(0.5) {
                    self.rules.chance_gain
                } else {
                    -self.rules.chance_loss
                };
                state.money[player] += amount;
                Landing::Chance { amount }
            }
            TileKind::Property { price, rent, .. } => match state.owners[index] {
                None if state.money[player] >= price => {
                    state.phase = BankPhase::AwaitingBuyDecision { tile: index };
                    state.landing = Some(Landing::Offer { tile: index, price });
                    return;
                }
                None => Landing::CannotAfford { tile: index },
                Some(owner) if owner == player => Landing::OwnProperty { tile: index },
                Some(owner) => {
                    state.money[player] -= rent;
                    state.money[owner] += rent;
                    Landing::Rent {
                        tile: index,
                        amount: rent,
                        to: owner,
                    }
                }
            },
        };

        debug!(%player, tile = board_tile.name, ?landing, "landed");
        state.landing = Some(landing);
        state.finish_turn();
    }

    fn pending_offer(state: &BankState) -> Result<(usize, i64), MoveError> {
        let BankPhase::AwaitingBuyDecision { tile: index } = state.phase else {
            return Err(MoveError::Illegal("no property on offer"));
        };
        match tile(index).map(|t| t.kind) {
            Some(TileKind::Property { price, .. }) => Ok((index, price)),
            _ => Err(MoveError::Illegal("offered tile is not a property")),
        }
    }
}

impl TurnBasedEngine for BankGame {
    type State = BankState;
    type Move = BankMove;

    fn name(&self) -> &'static str {
        "bank"
    }

    fn player_count(&self) -> usize {
        SIDES
    }

    fn deal(&self, _rng: &mut GameRng) -> BankState {
        BankState::new(self.rules.starting_money)
    }

    fn active_player(&self, state: &BankState) -> PlayerId {
        state.active
    }

    fn legal_moves(&self, state: &BankState, player: PlayerId) -> Vec<BankMove> {
        if player != state.active || self.round_result(state).is_some() {
            return vec![];
        }
        match state.phase {
            BankPhase::AwaitingRoll => vec![BankMove::Roll],
            BankPhase::AwaitingBuyDecision { .. } => vec![BankMove::Buy, BankMove::Decline],
        }
    }

    fn apply(
        &self,
        state: &BankState,
        player: PlayerId,
        mv: &BankMove,
        rng: &mut GameRng,
    ) -> Result<BankState, MoveError> {
        if self.round_result(state).is_some() {
            return Err(MoveError::NotPlaying);
        }
        MoveError::check_turn(player, state.active)?;

        let mut next = state.clone();
        match mv {
            BankMove::Roll => {
                if state.phase != BankPhase::AwaitingRoll {
                    return Err(MoveError::Illegal("answer the buy offer first"));
                }
                let roll = rng.roll_die();
                let (position, passed) = step(state.positions[player], roll);
                next.positions[player] = position;
                next.last_roll = Some(roll);
                next.passed_start = passed;
                if passed {
                    next.money[player] += self.rules.pass_start_bonus;
                }
                self.resolve_landing(&mut next, player, position, rng);
            }
            BankMove::Buy => {
                let (index, price) = Self::pending_offer(state)?;
                next.money[player] -= price;
                next.owners[index] = Some(player);
                next.landing = Some(Landing::Bought { tile: index });
                next.finish_turn();
            }
            BankMove::Decline => {
                let (index, _) = Self::pending_offer(state)?;
                next.landing = Some(Landing::Declined { tile: index });
                next.finish_turn();
            }
        }
        Ok(next)
    }

    /// Untimed; a forced expiry just hands the turn over.
    fn on_timeout(&self, state: &BankState) -> BankState {
        let mut next = state.clone();
        next.finish_turn();
        next
    }

    fn round_result(&self, state: &BankState) -> Option<RoundResult> {
        state
            .bankrupt()
            .map(|loser| RoundResult::won(loser.next(SIDES), 0))
    }

    fn clock_policy(&self) -> ClockPolicy {
        ClockPolicy::Untimed
    }

    fn match_rule(&self) -> MatchRule {
        MatchRule::SingleRound
    }

    fn rewards(&self) -> Rewards {
        self.rules.rewards
    }

    /// Roll, and buy only when the reserve survives the purchase.
    fn choose_bot_move(&self, state: &BankState, player: PlayerId, _rng: &mut GameRng) -> Option<BankMove> {
        if player != state.active || self.round_result(state).is_some() {
            return None;
        }
        match Self::pending_offer(state) {
            Err(_) => Some(BankMove::Roll),
            Ok((_, price)) if state.money[player] - price >= self.rules.bot_reserve => Some(BankMove::Buy),
            Ok(_) => Some(BankMove::Decline),
        }
    }
}
