//! # arcade-rules
//!
//! Rules engines and scripted bots for a casual game arcade: domino, a
//! card-shedding game, Ludo, a bank/property game and chess.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: Engines own configuration only. `apply` takes the
//!    current state by reference and returns the next one, so a rejected
//!    move cannot leave anything half-changed.
//!
//! 2. **One Shape, Five Games**: Every game implements `TurnBasedEngine`;
//!    turn rotation, timeouts, bots and match scoring are written once in
//!    `Session`.
//!
//! 3. **Silent Rejection**: Illegal and out-of-turn moves surface as
//!    `MoveError` from the engine and as a logged no-op from the session.
//!
//! 4. **Seeded Randomness**: Shuffles, dice and bot tie-breaks all draw from
//!    one `GameRng`, so a seed replays a whole match.
//!
//! ## Architecture
//!
//! - **Virtual Time**: The host reports elapsed time through
//!   `Session::tick`. Bot pacing, turn clocks and round restarts all run off
//!   the session scheduler, and a generation counter cancels stale work.
//!
//! - **Persistent History**: Committed moves live in an `im::Vector`, cheap
//!   to snapshot for a replay view.
//!
//! ## Modules
//!
//! - `core`: Players and seats, RNG, configuration, errors, turn state
//! - `rules`: `TurnBasedEngine` trait and match accumulation
//! - `schedule`: Virtual-clock task queue
//! - `session`: Host-facing match runner, events, online lobby stub
//! - `games`: The five engines

pub mod core;
pub mod rules;
pub mod schedule;
pub mod session;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    ArcadeConfig, ClockPolicy, Controller, GameRng, GameRngState, GameStatus, MoveError,
    MoveRecord, Pacing, PlayerId, PlayerMap, Rewards, Seat, TurnClock, TurnState,
};

pub use crate::rules::{MatchDecision, MatchRule, MatchScore, RoundResult, TurnBasedEngine};

pub use crate::schedule::Scheduler;

pub use crate::session::{Lobby, LobbyError, Session, SessionError, SessionEvent, Task};

pub use crate::games::{BankGame, ChessGame, DominoGame, LudoGame, ShayebGame};
