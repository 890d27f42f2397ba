//! Bank: a 20-tile property trading game for two.
//!
//! Roll, move, resolve the tile. Unowned properties can be bought, owned
//! ones charge rent, tax and chance tiles move money. Whoever goes below
//! zero loses.

mod board;
mod game;

pub use board::{step, tile, BoardTile, ColorGroup, TileKind, BOARD, BOARD_SIZE};
pub use game::{BankGame, BankMove, BankPhase, BankState, Landing};
