//! Ludo for two colours: red (human) against yellow.
//!
//! Four tokens each; a 6 brings a token out of the yard, exact rolls
//! bring it home, landing on an opponent on the shared loop sends it back.
//! First to bring all four home wins. The human side carries a match-coin
//! wallet for biased rolls, auto-play and cosmetics.

mod track;
mod shop;
mod game;

pub use game::{Capture, DiceBias, LudoGame, LudoMove, LudoPhase, LudoState};
pub use shop::{BoardTheme, DiceSkin, ShopItem, Wallet};
pub use track::{
    advance, can_advance, cell_of, on_shared_loop, Cell, Color, ENTRY_ROLL, FINISHED, HOME,
    HOME_STRETCH, RED_PATH, TOKENS, YARD, YELLOW_PATH,
};
