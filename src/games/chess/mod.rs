//! Chess against a one-ply material bot.
//!
//! Standard pieces and movement, queen-only promotion, no castling or en
//! passant. A side left without a safe move loses.

mod board;
mod game;

pub use board::{Board, Color, Piece, PieceKind, Square, Targets};
pub use game::{color_of, player_of, ChessGame, ChessMove, ChessState};
