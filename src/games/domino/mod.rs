//! Domino: two sides, double-six set, first to 100 points.
//!
//! - 28 tiles shuffled, 7 per hand, the rest form the boneyard
//! - A tile is playable if it matches either open end of the chain
//! - Nothing playable: draw one tile, or pass once the boneyard is empty
//! - Emptying your hand wins the round and scores the opponent's pips
//! - 60 s per turn; expiry passes the turn without drawing

mod tiles;
mod game;

pub use game::{DominoGame, DominoMove, DominoState, PlacedTile};
pub use tiles::{
    full_set, generate_deck, hand_value, orient, valid_moves, BoardEnds, End, Pip, Tile, TileId,
    MAX_PIP, SET_SIZE,
};
