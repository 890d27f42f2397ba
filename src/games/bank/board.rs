//! The 20-tile property board.

use serde::Serialize;

pub const BOARD_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ColorGroup {
    Red,
    Blue,
    Pink,
    Green,
    Purple,
    Orange,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TileKind {
    /// Start and rest tiles; nothing happens.
    Start,
    Property {
        price: i64,
        rent: i64,
        group: ColorGroup,
    },
    Tax,
    Chance,
    /// Jail and go-to-jail are visit-only.
    Jail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoardTile {
    pub id: usize,
    pub name: &'static str,
    pub kind: TileKind,
}

const fn plain(id: usize, name: &'static str, kind: TileKind) -> BoardTile {
    BoardTile { id, name, kind }
}

const fn property(id: usize, name: &'static str, price: i64, rent: i64, group: ColorGroup) -> BoardTile {
    BoardTile {
        id,
        name,
        kind: TileKind::Property { price, rent, group },
    }
}

pub const BOARD: [BoardTile; BOARD_SIZE] = [
    plain(0, "Start", TileKind::Start),
    property(1, "Cairo", 100, 20, ColorGroup::Red),
    property(2, "Alexandria", 120, 25, ColorGroup::Red),
    plain(3, "Chance", TileKind::Chance),
    property(4, "Giza", 150, 30, ColorGroup::Blue),
    plain(5, "Jail", TileKind::Jail),
    property(6, "Luxor", 180, 35, ColorGroup::Pink),
    property(7, "Aswan", 200, 40, ColorGroup::Pink),
    plain(8, "Tax", TileKind::Tax),
    property(9, "Sharm El-Sheikh", 220, 45, ColorGroup::Green),
    plain(10, "Rest", TileKind::Start),
    property(11, "Hurghada", 240, 50, ColorGroup::Green),
    property(12, "Mansoura", 260, 55, ColorGroup::Purple),
    plain(13, "Chance", TileKind::Chance),
    property(14, "Tanta", 280, 60, ColorGroup::Purple),
    plain(15, "Go To Jail", TileKind::Jail),
    property(16, "Port Said", 300, 65, ColorGroup::Orange),
    property(17, "Ismailia", 320, 70, ColorGroup::Orange),
    property(18, "Suez", 350, 80, ColorGroup::Yellow),
    property(19, "Capital", 400, 100, ColorGroup::Yellow),
];

#[must_use]
pub fn tile(index: usize) -> Option<&'static BoardTile> {
    BOARD.get(index)
}

/// Position after `steps`, and whether the start tile was crossed.
#[must_use]
pub fn step(position: usize, steps: u8) -> (usize, bool) {
    let raw = position + usize::from(steps);
    (raw % BOARD_SIZE, raw >= BOARD_SIZE)
}
