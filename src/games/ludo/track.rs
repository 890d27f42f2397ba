//! Board geometry: each colour's 57-cell path on the 15x15 grid.
//!
//! A token's progress is one integer: `YARD` (-1) before entering, `0..=56`
//! along its own path, `FINISHED` (99) once home. Cells `0..52` lie on the
//! shared loop, so two colours can meet there; cells `52..57` are the
//! private home stretch.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Not yet entered.
pub const YARD: i8 = -1;
/// Reached home.
pub const FINISHED: i8 = 99;
/// Landing exactly here finishes the token.
pub const HOME: i8 = 57;
/// First cell of the private home stretch.
pub const HOME_STRETCH: i8 = 52;
/// Tokens per colour.
pub const TOKENS: usize = 4;
/// Roll needed to leave the yard.
pub const ENTRY_ROLL: u8 = 6;

/// Grid cell as (row, column).
pub type Cell = (u8, u8);

#[rustfmt::skip]
pub const RED_PATH: [Cell; 57] = [
    (6, 1), (6, 2), (6, 3), (6, 4), (6, 5),
    (5, 6), (4, 6), (3, 6), (2, 6), (1, 6), (0, 6),
    (0, 7), (0, 8),
    (1, 8), (2, 8), (3, 8), (4, 8), (5, 8),
    (6, 9), (6, 10), (6, 11), (6, 12), (6, 13), (6, 14),
    (7, 14), (8, 14),
    (8, 13), (8, 12), (8, 11), (8, 10), (8, 9),
    (9, 8), (10, 8), (11, 8), (12, 8), (13, 8), (14, 8),
    (14, 7), (14, 6),
    (13, 6), (12, 6), (11, 6), (10, 6), (9, 6),
    (8, 5), (8, 4), (8, 3), (8, 2), (8, 1), (8, 0),
    (7, 0),
    (7, 1), (7, 2), (7, 3), (7, 4), (7, 5), (7, 6),
];

#[rustfmt::skip]
pub const YELLOW_PATH: [Cell; 57] = [
    (8, 13), (8, 12), (8, 11), (8, 10), (8, 9),
    (9, 8), (10, 8), (11, 8), (12, 8), (13, 8), (14, 8),
    (14, 7), (14, 6),
    (13, 6), (12, 6), (11, 6), (10, 6), (9, 6),
    (8, 5), (8, 4), (8, 3), (8, 2), (8, 1), (8, 0),
    (7, 0), (6, 0),
    (6, 1), (6, 2), (6, 3), (6, 4), (6, 5),
    (5, 6), (4, 6), (3, 6), (2, 6), (1, 6), (0, 6),
    (0, 7), (0, 8),
    (1, 8), (2, 8), (3, 8), (4, 8), (5, 8),
    (6, 9), (6, 10), (6, 11), (6, 12), (6, 13), (6, 14),
    (7, 14),
    (7, 13), (7, 12), (7, 11), (7, 10), (7, 9), (7, 8),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// The human side, moves first.
    Red,
    Yellow,
}

impl Color {
    #[must_use]
    pub fn of(player: PlayerId) -> Self {
        if player == PlayerId::HUMAN {
            Color::Red
        } else {
            Color::Yellow
        }
    }

    #[must_use]
    pub fn path(self) -> &'static [Cell; 57] {
        match self {
            Color::Red => &RED_PATH,
            Color::Yellow => &YELLOW_PATH,
        }
    }
}

/// Grid cell of a path position, `None` in the yard or once finished.
#[must_use]
pub fn cell_of(color: Color, position: i8) -> Option<Cell> {
    usize::try_from(position)
        .ok()
        .and_then(|i| color.path().get(i).copied())
}

/// Whether a token may advance by `roll`.
#[must_use]
pub fn can_advance(position: i8, roll: u8) -> bool {
    match position {
        FINISHED => false,
        YARD => roll == ENTRY_ROLL,
        pos => pos + roll as i8 <= HOME,
    }
}

/// Position after advancing; entering from the yard lands on 0 regardless
/// of the roll, landing on `HOME` finishes the token.
#[must_use]
pub fn advance(position: i8, roll: u8) -> i8 {
    let next = if position == YARD { 0 } else { position + roll as i8 };
    if next == HOME {
        FINISHED
    } else {
        next
    }
}

/// Whether a position sits on the loop shared by both colours.
#[must_use]
pub fn on_shared_loop(position: i8) -> bool {
    (0..HOME_STRETCH).contains(&position)
}
