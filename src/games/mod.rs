//! Game implementations.
//!
//! Each game is a leaf generator module (tiles, cards, track, board) plus a
//! `game` module with the `TurnBasedEngine` implementation.

pub mod domino;
pub mod shayeb;
pub mod ludo;
pub mod bank;
pub mod chess;

pub use domino::DominoGame;
pub use shayeb::ShayebGame;
pub use ludo::LudoGame;
pub use bank::BankGame;
pub use chess::ChessGame;
