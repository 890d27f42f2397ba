//! Four-seat card-shedding engine.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::cards::{generate_deck, hand_value, Card, CardId};
use crate::core::{ClockPolicy, GameRng, MoveError, PlayerId, PlayerMap, Rewards, ShayebRules};
use crate::rules::{MatchRule, RoundResult, TurnBasedEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShayebMove {
    Play { card: CardId },
    /// Take the top card of the deck and end the turn.
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShayebState {
    /// Draw pile; the top card is the last element.
    pub deck: Vec<Card>,
    /// Discard pile; the top card is the last element and is never absent.
    pub discard: Vec<Card>,
    pub hands: PlayerMap<Vec<Card>>,
    pub active: PlayerId,
}

impl ShayebState {
    /// The card every play must match.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.discard.last()
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    /// Cards in `player`'s hand that match the top of the discard pile, in hand order.
    pub fn playable(&self, player: PlayerId) -> impl Iterator<Item = &Card> + '_ {
        let top = self.top().copied();
        self.hands[player]
            .iter()
            .filter(move |c| top.map_or(true, |t| c.matches(&t)))
    }

    fn seat_count(&self) -> usize {
        self.hands.player_count()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShayebGame {
    rules: ShayebRules,
}

/// Seats a table can hold. Five-card hands for eight seats leave 11 cards
/// to draw from.
pub const SEAT_RANGE: std::ops::RangeInclusive<usize> = 2..=8;

impl ShayebGame {
    /// Seat counts outside `SEAT_RANGE` are clamped into it.
    #[must_use]
    pub fn new(mut rules: ShayebRules) -> Self {
        rules.seats = rules.seats.clamp(*SEAT_RANGE.start(), *SEAT_RANGE.end());
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &ShayebRules {
        &self.rules
    }
}

impl TurnBasedEngine for ShayebGame {
    type State = ShayebState;
    type Move = ShayebMove;

    fn name(&self) -> &'static str {
        "shayeb"
    }

    fn player_count(&self) -> usize {
        self.rules.seats
    }

    /// Deal one card at a time round-robin, then turn up a starter.
    fn deal(&self, rng: &mut GameRng) -> ShayebState {
        let mut deck = generate_deck(rng);
        let seats = self.rules.seats;
        let mut hands: PlayerMap<Vec<Card>> =
            PlayerMap::new(seats, |_| Vec::with_capacity(self.rules.hand_size));

        for _ in 0..self.rules.hand_size {
            for seat in PlayerId::all(seats) {
                if let Some(card) = deck.pop() {
                    hands[seat].push(card);
                }
            }
        }
        let discard: Vec<Card> = deck.pop().into_iter().collect();

        ShayebState {
            deck,
            discard,
            hands,
            active: PlayerId::HUMAN,
        }
    }

    fn active_player(&self, state: &ShayebState) -> PlayerId {
        state.active
    }

    fn legal_moves(&self, state: &ShayebState, player: PlayerId) -> Vec<ShayebMove> {
        if player != state.active || self.round_result(state).is_some() {
            return vec![];
        }
        let mut moves: Vec<ShayebMove> = state
            .playable(player)
            .map(|c| ShayebMove::Play { card: c.id })
            .collect();
        if !state.deck.is_empty() {
            moves.push(ShayebMove::Draw);
        }
        moves
    }

    fn apply(
        &self,
        state: &ShayebState,
        player: PlayerId,
        mv: &ShayebMove,
        _rng: &mut GameRng,
    ) -> Result<ShayebState, MoveError> {
        if self.round_result(state).is_some() {
            return Err(MoveError::NotPlaying);
        }
        MoveError::check_turn(player, state.active)?;

        let mut next = state.clone();
        match *mv {
            ShayebMove::Play { card } => {
                let pos = state.hands[player]
                    .iter()
                    .position(|c| c.id == card)
                    .ok_or(MoveError::Illegal("card not in hand"))?;
                let chosen = state.hands[player][pos];
                if let Some(top) = state.top() {
                    if !chosen.matches(top) {
                        return Err(MoveError::Illegal("card matches neither suit nor rank"));
                    }
                }
                next.hands[player].remove(pos);
                next.discard.push(chosen);
                if !next.hands[player].is_empty() {
                    next.active = player.next(state.seat_count());
                }
            }
            ShayebMove::Draw => {
                let drawn = next.deck.pop().ok_or(MoveError::PileExhausted)?;
                next.hands[player].push(drawn);
                next.active = player.next(state.seat_count());
            }
        }
        Ok(next)
    }

    fn on_timeout(&self, state: &ShayebState) -> ShayebState {
        ShayebState {
            active: state.active.next(state.seat_count()),
            ..state.clone()
        }
    }

    fn round_result(&self, state: &ShayebState) -> Option<RoundResult> {
        let (winner, _) = state.hands.iter().find(|(_, hand)| hand.is_empty())?;
        let points = state
            .hands
            .iter()
            .filter(|(p, _)| *p != winner)
            .map(|(_, hand)| hand_value(hand))
            .sum();
        Some(RoundResult::won(winner, points))
    }

    fn clock_policy(&self) -> ClockPolicy {
        ClockPolicy::PerTurn(Duration::from_secs(self.rules.turn_seconds))
    }

    fn match_rule(&self) -> MatchRule {
        MatchRule::Accumulate {
            target: self.rules.match_target,
        }
    }

    fn rewards(&self) -> Rewards {
        self.rules.rewards
    }

    /// First matching card in hand order, otherwise draw.
    fn choose_bot_move(
        &self,
        state: &ShayebState,
        player: PlayerId,
        _rng: &mut GameRng,
    ) -> Option<ShayebMove> {
        if player != state.active || self.round_result(state).is_some() {
            return None;
        }
        if let Some(card) = state.playable(player).next() {
            return Some(ShayebMove::Play { card: card.id });
        }
        (!state.deck.is_empty()).then_some(ShayebMove::Draw)
    }
}
