//! Core types shared by every game: seats, RNG, configuration, errors,
//! turn state and move records.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use player::{Controller, PlayerId, PlayerMap, Seat};
pub use rng::{GameRng, GameRngState};
pub use config::{
    ArcadeConfig, BankRules, ChessRules, DominoRules, LudoRules, Pacing, Rewards, ShayebRules,
};
pub use error::MoveError;
pub use action::MoveRecord;
pub use state::{ClockPolicy, GameStatus, TurnClock, TurnState};
