//! 8x8 mailbox board, piece movement rules and check detection.
//!
//! Row 0 is black's back rank and row 7 is white's; white pawns start on
//! row 6 and move toward row 0. There is no castling and no en passant.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[must_use]
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Row direction pawns of this colour advance in.
    fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value used by the bot.
    #[must_use]
    pub fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Parse algebraic notation such as `"e2"`.
    #[must_use]
    pub fn parse(coord: &str) -> Option<Square> {
        let b = coord.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return None;
        }
        Some(Square::new(b'8' - b[1], b[0] - b'a'))
    }

    fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let r = self.row as i8 + dr;
        let c = self.col as i8 + dc;
        ((0..8).contains(&r) && (0..8).contains(&c)).then(|| Square::new(r as u8, c as u8))
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|r| (0..8u8).map(move |c| Square::new(r, c)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, (b'8' - self.row) as char)
    }
}

/// Destination list for one piece. A queen in the open has 27 targets.
pub type Targets = SmallVec<[Square; 28]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    #[must_use]
    pub fn initial() -> Self {
        use PieceKind::*;
        const BACK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::empty();
        for (col, kind) in BACK.iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col), Some(Piece::new(Color::Black, *kind)));
            board.set(Square::new(1, col), Some(Piece::new(Color::Black, Pawn)));
            board.set(Square::new(6, col), Some(Piece::new(Color::White, Pawn)));
            board.set(Square::new(7, col), Some(Piece::new(Color::White, *kind)));
        }
        board
    }

    #[must_use]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = piece;
    }

    /// Squares strictly between `from` and `to` along a line are empty.
    fn path_clear(&self, from: Square, to: Square) -> bool {
        let dr = (to.row as i8 - from.row as i8).signum();
        let dc = (to.col as i8 - from.col as i8).signum();
        let mut cur = from.offset(dr, dc);
        while let Some(sq) = cur {
            if sq == to {
                return true;
            }
            if self.get(sq).is_some() {
                return false;
            }
            cur = sq.offset(dr, dc);
        }
        false
    }

    /// Movement rule for the piece on `from`, ignoring whether the mover's
    /// own king is left attacked.
    #[must_use]
    pub fn attacks_or_moves(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.get(from) else {
            return false;
        };
        if from == to {
            return false;
        }
        let target = self.get(to);
        if target.map_or(false, |t| t.color == piece.color) {
            return false;
        }

        let dr = to.row as i8 - from.row as i8;
        let dc = to.col as i8 - from.col as i8;
        match piece.kind {
            PieceKind::Pawn => {
                let dir = piece.color.forward();
                if dc == 0 && dr == dir {
                    target.is_none()
                } else if dc == 0 && dr == 2 * dir {
                    from.row == piece.color.pawn_row()
                        && target.is_none()
                        && from.offset(dir, 0).map_or(false, |mid| self.get(mid).is_none())
                } else {
                    dc.abs() == 1 && dr == dir && target.is_some()
                }
            }
            PieceKind::Rook => (dr == 0 || dc == 0) && self.path_clear(from, to),
            PieceKind::Bishop => dr.abs() == dc.abs() && self.path_clear(from, to),
            PieceKind::Queen => {
                (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && self.path_clear(from, to)
            }
            PieceKind::Knight => {
                (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
            }
            PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
        }
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.get(sq) == Some(Piece::new(color, PieceKind::King)))
    }

    /// Whether `color`'s king is attacked. A missing king counts as attacked.
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            return true;
        };
        Square::all().any(|sq| {
            self.get(sq).map_or(false, |p| p.color != color) && self.attacks_or_moves(sq, king)
        })
    }

    /// Move without validation. Pawns reaching the far row become queens.
    /// Returns the captured piece.
    pub fn play_unchecked(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, moving);
        if let Some(p) = moving {
            if p.kind == PieceKind::Pawn && (to.row == 0 || to.row == 7) {
                self.set(to, Some(Piece::new(p.color, PieceKind::Queen)));
            }
        }
        captured
    }

    /// Destinations from `from` that do not leave the mover in check.
    #[must_use]
    pub fn safe_targets(&self, from: Square) -> Targets {
        let Some(piece) = self.get(from) else {
            return Targets::new();
        };
        Square::all()
            .filter(|&to| self.attacks_or_moves(from, to))
            .filter(|&to| {
                let mut scratch = *self;
                scratch.play_unchecked(from, to);
                !scratch.in_check(piece.color)
            })
            .collect()
    }

    /// Every safe move for `color`, scanning squares row by row.
    #[must_use]
    pub fn safe_moves(&self, color: Color) -> Vec<(Square, Square)> {
        Square::all()
            .filter(|&sq| self.get(sq).map_or(false, |p| p.color == color))
            .flat_map(|from| self.safe_targets(from).into_iter().map(move |to| (from, to)))
            .collect()
    }

    #[must_use]
    pub fn has_safe_move(&self, color: Color) -> bool {
        Square::all()
            .filter(|&sq| self.get(sq).map_or(false, |p| p.color == color))
            .any(|from| !self.safe_targets(from).is_empty())
    }
}
