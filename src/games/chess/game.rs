//! Chess engine: white (human) against black.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::board::{Board, Color, PieceKind, Square};
use crate::core::{ChessRules, ClockPolicy, GameRng, MoveError, PlayerId, Rewards};
use crate::rules::{MatchRule, RoundResult, TurnBasedEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
}

impl ChessMove {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parse a pair of algebraic squares, e.g. `("e2", "e4")`.
    #[must_use]
    pub fn parse(from: &str, to: &str) -> Option<Self> {
        Some(Self::new(Square::parse(from)?, Square::parse(to)?))
    }
}

#[must_use]
pub fn color_of(player: PlayerId) -> Color {
    if player == PlayerId::HUMAN {
        Color::White
    } else {
        Color::Black
    }
}

#[must_use]
pub fn player_of(color: Color) -> PlayerId {
    match color {
        Color::White => PlayerId::HUMAN,
        Color::Black => PlayerId::COMPUTER,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessState {
    pub board: Board,
    pub turn: Color,
    /// Pieces lost by each colour, indexed by `Color::idx`.
    pub captured: [Vec<PieceKind>; 2],
    /// Whether the side to move is in check.
    pub check: bool,
    pub last_move: Option<ChessMove>,
}

impl Default for ChessState {
    fn default() -> Self {
        Self::from_board(Board::initial(), Color::White)
    }
}

impl ChessState {
    #[must_use]
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            captured: [Vec::new(), Vec::new()],
            check: board.in_check(turn),
            last_move: None,
        }
    }

    #[must_use]
    pub fn captured_of(&self, color: Color) -> &[PieceKind] {
        &self.captured[color.idx()]
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChessGame {
    rules: ChessRules,
}

impl ChessGame {
    #[must_use]
    pub fn new(rules: ChessRules) -> Self {
        Self { rules }
    }
}

impl TurnBasedEngine for ChessGame {
    type State = ChessState;
    type Move = ChessMove;

    fn name(&self) -> &'static str {
        "chess"
    }

    fn player_count(&self) -> usize {
        2
    }

    fn deal(&self, _rng: &mut GameRng) -> ChessState {
        ChessState::default()
    }

    fn active_player(&self, state: &ChessState) -> PlayerId {
        player_of(state.turn)
    }

    fn legal_moves(&self, state: &ChessState, player: PlayerId) -> Vec<ChessMove> {
        if color_of(player) != state.turn {
            return vec![];
        }
        state
            .board
            .safe_moves(state.turn)
            .into_iter()
            .map(|(from, to)| ChessMove::new(from, to))
            .collect()
    }

    fn apply(
        &self,
        state: &ChessState,
        player: PlayerId,
        mv: &ChessMove,
        _rng: &mut GameRng,
    ) -> Result<ChessState, MoveError> {
        MoveError::check_turn(player, player_of(state.turn))?;

        match state.board.get(mv.from) {
            Some(p) if p.color == state.turn => {}
            Some(_) => return Err(MoveError::Illegal("that piece belongs to the opponent")),
            None => return Err(MoveError::Illegal("no piece on the origin square")),
        }
        if !state.board.safe_targets(mv.from).contains(&mv.to) {
            return Err(MoveError::Illegal("move breaks piece rules or leaves the king in check"));
        }

        let mut next = state.clone();
        if let Some(taken) = next.board.play_unchecked(mv.from, mv.to) {
            next.captured[taken.color.idx()].push(taken.kind);
        }
        next.turn = state.turn.other();
        next.check = next.board.in_check(next.turn);
        next.last_move = Some(*mv);
        Ok(next)
    }

    /// The chess clock never forces a result.
    fn on_timeout(&self, state: &ChessState) -> ChessState {
        state.clone()
    }

    /// The side to move loses when it has no safe move, checked or not.
    fn round_result(&self, state: &ChessState) -> Option<RoundResult> {
        if state.board.has_safe_move(state.turn) {
            return None;
        }
        Some(RoundResult::won(player_of(state.turn.other()), 0))
    }

    fn clock_policy(&self) -> ClockPolicy {
        ClockPolicy::Decorative(Duration::from_secs(self.rules.clock_seconds))
    }

    fn match_rule(&self) -> MatchRule {
        MatchRule::SingleRound
    }

    fn rewards(&self) -> Rewards {
        self.rules.rewards
    }

    /// Material captured, times ten.
    fn bot_score(&self, state: &ChessState, _player: PlayerId, mv: &ChessMove) -> f64 {
        state
            .board
            .get(mv.to)
            .map_or(0.0, |p| f64::from(p.kind.value() * 10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::board::Piece;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn mv(from: &str, to: &str) -> ChessMove {
        ChessMove::parse(from, to).unwrap()
    }

    #[test]
    fn test_opening_moves() {
        let game = ChessGame::default();
        let mut rng = GameRng::new(1);
        let state = game.deal(&mut rng);
        assert_eq!(game.legal_moves(&state, PlayerId::HUMAN).len(), 20);
        assert!(game.legal_moves(&state, PlayerId::COMPUTER).is_empty());

        let next = game.apply(&state, PlayerId::HUMAN, &mv("e2", "e4"), &mut rng).unwrap();
        assert_eq!(next.turn, Color::Black);
        assert_eq!(next.board.get(sq("e4")).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(state.board.get(sq("e4")), None);

        assert!(game.apply(&next, PlayerId::HUMAN, &mv("d2", "d4"), &mut rng).is_err());
        assert!(game.apply(&next, PlayerId::COMPUTER, &mv("e7", "e4"), &mut rng).is_err());
    }

    #[test]
    fn test_fools_mate_ends_round_for_white() {
        let game = ChessGame::default();
        let mut rng = GameRng::new(1);
        let mut state = game.deal(&mut rng);
        for (player, m) in [
            (PlayerId::HUMAN, mv("f2", "f3")),
            (PlayerId::COMPUTER, mv("e7", "e5")),
            (PlayerId::HUMAN, mv("g2", "g4")),
            (PlayerId::COMPUTER, mv("d8", "h4")),
        ] {
            state = game.apply(&state, player, &m, &mut rng).unwrap();
        }
        assert!(state.check);
        assert!(game.legal_moves(&state, PlayerId::HUMAN).is_empty());
        assert_eq!(game.round_result(&state), Some(RoundResult::won(PlayerId::COMPUTER, 0)));
    }

    #[test]
    fn test_stalemate_is_scored_as_loss() {
        let mut board = Board::empty();
        board.set(sq("a8"), Some(Piece::new(Color::Black, PieceKind::King)));
        board.set(sq("b6"), Some(Piece::new(Color::White, PieceKind::Queen)));
        board.set(sq("h1"), Some(Piece::new(Color::White, PieceKind::King)));
        let state = ChessState::from_board(board, Color::Black);

        assert!(!state.check);
        assert_eq!(
            ChessGame::default().round_result(&state),
            Some(RoundResult::won(PlayerId::HUMAN, 0))
        );
    }

    #[test]
    fn test_capture_recorded_and_bot_prefers_material() {
        let game = ChessGame::default();
        let mut board = Board::empty();
        board.set(sq("e1"), Some(Piece::new(Color::White, PieceKind::King)));
        board.set(sq("h8"), Some(Piece::new(Color::Black, PieceKind::King)));
        board.set(sq("d4"), Some(Piece::new(Color::White, PieceKind::Knight)));
        board.set(sq("e6"), Some(Piece::new(Color::Black, PieceKind::Queen)));
        board.set(sq("b5"), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        let state = ChessState::from_board(board, Color::White);

        let mut rng = GameRng::new(11);
        let chosen = game.choose_bot_move(&state, PlayerId::HUMAN, &mut rng);
        assert_eq!(chosen, Some(mv("d4", "e6")));

        let next = game.apply(&state, PlayerId::HUMAN, &mv("d4", "e6"), &mut rng).unwrap();
        assert_eq!(next.captured_of(Color::Black), &[PieceKind::Queen]);
        assert!(next.captured_of(Color::White).is_empty());
    }

    #[test]
    fn test_decorative_clock_timeout_changes_nothing() {
        let game = ChessGame::default();
        let state = game.deal(&mut GameRng::new(1));
        assert_eq!(game.on_timeout(&state), state);
        assert_eq!(game.clock_policy(), ClockPolicy::Decorative(Duration::from_secs(600)));
    }
}
