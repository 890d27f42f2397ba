//! Double-six domino set: generation, matching and orientation.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Pip value, 0..=6.
pub type Pip = u8;

pub const MAX_PIP: Pip = 6;

/// Number of tiles in a double-six set.
pub const SET_SIZE: usize = 28;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u8);

/// A domino tile. `left`/`right` describe its current orientation; the pip
/// multiset never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub left: Pip,
    pub right: Pip,
}

impl Tile {
    #[must_use]
    pub const fn new(id: u8, left: Pip, right: Pip) -> Self {
        Self {
            id: TileId(id),
            left,
            right,
        }
    }

    #[must_use]
    pub fn is_double(&self) -> bool {
        self.left == self.right
    }

    /// Sum of both pips.
    #[must_use]
    pub fn pips(&self) -> u32 {
        u32::from(self.left) + u32::from(self.right)
    }

    /// Whether either pip equals `value`.
    #[must_use]
    pub fn touches(&self, value: Pip) -> bool {
        self.left == value || self.right == value
    }

    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            id: self.id,
            left: self.right,
            right: self.left,
        }
    }

    /// Unordered pip pair, smaller first.
    #[must_use]
    pub fn canonical(&self) -> (Pip, Pip) {
        (self.left.min(self.right), self.left.max(self.right))
    }
}

/// Which end of the chain a tile attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    Left,
    Right,
}

/// Open pip values at both extremities of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEnds {
    pub left: Pip,
    pub right: Pip,
}

impl BoardEnds {
    #[must_use]
    pub fn value(&self, end: End) -> Pip {
        match end {
            End::Left => self.left,
            End::Right => self.right,
        }
    }
}

/// All 28 tiles in generation order, ids 0..28.
#[must_use]
pub fn full_set() -> Vec<Tile> {
    let mut set = Vec::with_capacity(SET_SIZE);
    let mut id = 0u8;
    for i in 0..=MAX_PIP {
        for j in i..=MAX_PIP {
            set.push(Tile::new(id, i, j));
            id += 1;
        }
    }
    set
}

/// A freshly shuffled set.
#[must_use]
pub fn generate_deck(rng: &mut GameRng) -> Vec<Tile> {
    let mut deck = full_set();
    rng.shuffle(&mut deck);
    deck
}

/// Total pips left in a hand; the round score owed by a loser.
#[must_use]
pub fn hand_value(hand: &[Tile]) -> u32 {
    hand.iter().map(Tile::pips).sum()
}

/// Tiles that may be played. An empty board (`None`) accepts every tile.
#[must_use]
pub fn valid_moves(hand: &[Tile], ends: Option<BoardEnds>) -> Vec<Tile> {
    match ends {
        None => hand.to_vec(),
        Some(ends) => hand
            .iter()
            .filter(|t| t.touches(ends.left) || t.touches(ends.right))
            .copied()
            .collect(),
    }
}

/// Orient `tile` so the pip equal to `target` faces the chain at `end`.
///
/// Attaching on the left, the tile's right pip must touch; on the right,
/// its left pip must.
#[must_use]
pub fn orient(tile: Tile, target: Pip, end: End) -> Tile {
    match end {
        End::Left if tile.right == target => tile,
        End::Right if tile.left == target => tile,
        _ => tile.flipped(),
    }
}
