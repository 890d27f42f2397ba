//! Two-sided domino rules engine.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::tiles::{generate_deck, hand_value, orient, valid_moves, BoardEnds, End, Tile, TileId};
use crate::core::{ClockPolicy, DominoRules, GameRng, MoveError, PlayerId, PlayerMap, Rewards};
use crate::rules::{MatchRule, RoundResult, TurnBasedEngine};

const SIDES: usize = 2;

/// A domino move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DominoMove {
    /// Play a tile. With no end given, the right end is preferred.
    Play { tile: TileId, end: Option<End> },
    /// Take one tile from the boneyard; only when nothing is playable.
    Draw,
    /// Give up the turn; only when nothing is playable and the boneyard is empty.
    Pass,
}

/// A tile on the chain, in its played orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    pub placed_at: End,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominoState {
    /// The chain, leftmost tile first.
    pub board: Vector<PlacedTile>,
    /// `None` while the board is empty.
    pub ends: Option<BoardEnds>,
    /// Undealt tiles; draws take from the back.
    pub boneyard: Vec<Tile>,
    pub hands: PlayerMap<Vec<Tile>>,
    pub active: PlayerId,
    /// Passes since the last play or draw; a full cycle means the board is blocked.
    pub consecutive_passes: u8,
}

impl DominoState {
    /// A round in progress from explicit hands, human to move.
    #[must_use]
    pub fn with_hands(hands: PlayerMap<Vec<Tile>>, boneyard: Vec<Tile>) -> Self {
        Self {
            board: Vector::new(),
            ends: None,
            boneyard,
            hands,
            active: PlayerId::HUMAN,
            consecutive_passes: 0,
        }
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Tile] {
        &self.hands[player]
    }

    /// Tiles in `player`'s hand that touch an open end.
    #[must_use]
    pub fn playable(&self, player: PlayerId) -> Vec<Tile> {
        valid_moves(&self.hands[player], self.ends)
    }

    fn is_blocked(&self) -> bool {
        usize::from(self.consecutive_passes) >= SIDES
    }

    fn someone_domino(&self) -> Option<PlayerId> {
        self.hands
            .iter()
            .find(|(_, hand)| hand.is_empty())
            .map(|(p, _)| p)
    }
}

/// Domino engine configured by `DominoRules`.
#[derive(Clone, Debug, Default)]
pub struct DominoGame {
    rules: DominoRules,
}

impl DominoGame {
    #[must_use]
    pub fn new(rules: DominoRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &DominoRules {
        &self.rules
    }

    /// Pick the end a tile attaches to, honoring an explicit request.
    fn resolve_end(ends: BoardEnds, tile: &Tile, requested: Option<End>) -> Result<End, MoveError> {
        let fits = |end: End| tile.touches(ends.value(end));
        match requested {
            Some(end) if fits(end) => Ok(end),
            Some(_) => Err(MoveError::Illegal("tile does not match the requested end")),
            None if fits(End::Right) => Ok(End::Right),
            None if fits(End::Left) => Ok(End::Left),
            None => Err(MoveError::Illegal("tile matches neither open end")),
        }
    }

    fn play(
        state: &DominoState,
        player: PlayerId,
        tile_id: TileId,
        end: Option<End>,
    ) -> Result<DominoState, MoveError> {
        let pos = state.hands[player]
            .iter()
            .position(|t| t.id == tile_id)
            .ok_or(MoveError::Illegal("tile not in hand"))?;
        let tile = state.hands[player][pos];

        let mut next = state.clone();
        match state.ends {
            None => {
                next.board.push_back(PlacedTile {
                    tile,
                    placed_at: End::Left,
                });
                next.ends = Some(BoardEnds {
                    left: tile.left,
                    right: tile.right,
                });
            }
            Some(ends) => {
                let side = Self::resolve_end(ends, &tile, end)?;
                let placed = orient(tile, ends.value(side), side);
                let mut new_ends = ends;
                match side {
                    End::Left => {
                        new_ends.left = placed.left;
                        next.board.push_front(PlacedTile {
                            tile: placed,
                            placed_at: End::Left,
                        });
                    }
                    End::Right => {
                        new_ends.right = placed.right;
                        next.board.push_back(PlacedTile {
                            tile: placed,
                            placed_at: End::Right,
                        });
                    }
                }
                next.ends = Some(new_ends);
            }
        }

        next.hands[player].remove(pos);
        next.consecutive_passes = 0;
        if !next.hands[player].is_empty() {
            next.active = player.next(SIDES);
        }
        Ok(next)
    }
}

impl TurnBasedEngine for DominoGame {
    type State = DominoState;
    type Move = DominoMove;

    fn name(&self) -> &'static str {
        "domino"
    }

    fn player_count(&self) -> usize {
        SIDES
    }

    fn deal(&self, rng: &mut GameRng) -> DominoState {
        let mut deck = generate_deck(rng);
        let hand_size = self.rules.hand_size.min(deck.len() / SIDES);
        let hands: Vec<Vec<Tile>> = (0..SIDES)
            .map(|_| deck.drain(..hand_size).collect())
            .collect();
        DominoState::with_hands(PlayerMap::from_vec(hands), deck)
    }

    fn active_player(&self, state: &DominoState) -> PlayerId {
        state.active
    }

    fn legal_moves(&self, state: &DominoState, player: PlayerId) -> Vec<DominoMove> {
        if player != state.active || self.round_result(state).is_some() {
            return vec![];
        }

        let playable = state.playable(player);
        if !playable.is_empty() {
            return playable
                .iter()
                .map(|t| DominoMove::Play {
                    tile: t.id,
                    end: None,
                })
                .collect();
        }

        if state.boneyard.is_empty() {
            vec![DominoMove::Pass]
        } else {
            vec![DominoMove::Draw]
        }
    }

    fn apply(
        &self,
        state: &DominoState,
        player: PlayerId,
        mv: &DominoMove,
        _rng: &mut GameRng,
    ) -> Result<DominoState, MoveError> {
        if self.round_result(state).is_some() {
            return Err(MoveError::NotPlaying);
        }
        MoveError::check_turn(player, state.active)?;

        match *mv {
            DominoMove::Play { tile, end } => Self::play(state, player, tile, end),
            DominoMove::Draw => {
                if !state.playable(player).is_empty() {
                    return Err(MoveError::Illegal("a tile is playable; draw not allowed"));
                }
                let mut next = state.clone();
                let drawn = next.boneyard.pop().ok_or(MoveError::PileExhausted)?;
                next.hands[player].push(drawn);
                next.consecutive_passes = 0;
                Ok(next)
            }
            DominoMove::Pass => {
                if !state.playable(player).is_empty() {
                    return Err(MoveError::Illegal("a tile is playable; pass not allowed"));
                }
                if !state.boneyard.is_empty() {
                    return Err(MoveError::Illegal("must draw while the boneyard has tiles"));
                }
                let mut next = state.clone();
                next.consecutive_passes += 1;
                next.active = player.next(SIDES);
                Ok(next)
            }
        }
    }

    fn on_timeout(&self, state: &DominoState) -> DominoState {
        let mut next = state.clone();
        next.active = state.active.next(SIDES);
        next
    }

    fn round_result(&self, state: &DominoState) -> Option<RoundResult> {
        if let Some(winner) = state.someone_domino() {
            let points = state
                .hands
                .iter()
                .filter(|(p, _)| *p != winner)
                .map(|(_, hand)| hand_value(hand))
                .sum();
            return Some(RoundResult::won(winner, points));
        }

        if state.is_blocked() {
            let human = hand_value(&state.hands[PlayerId::HUMAN]);
            let computer = hand_value(&state.hands[PlayerId::COMPUTER]);
            return Some(match human.cmp(&computer) {
                std::cmp::Ordering::Less => RoundResult::won(PlayerId::HUMAN, computer),
                std::cmp::Ordering::Greater => RoundResult::won(PlayerId::COMPUTER, human),
                std::cmp::Ordering::Equal => RoundResult::drawn(),
            });
        }

        None
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

    /// Heaviest tile first.
    fn bot_score(&self, state: &DominoState, player: PlayerId, mv: &DominoMove) -> f64 {
        match mv {
            DominoMove::Play { tile, .. } => state.hands[player]
                .iter()
                .find(|t| t.id == *tile)
                .map_or(0.0, |t| f64::from(t.pips())),
            DominoMove::Draw | DominoMove::Pass => 0.0,
        }
    }
}
