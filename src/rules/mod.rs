//! Rules engine trait and match accumulation.
//!
//! Games implement `TurnBasedEngine` to define:
//! - Dealing a round
//! - Legal moves and how a move transforms the state
//! - Timeout and terminal rules
//! - The bot heuristic
//!
//! The session calls into `TurnBasedEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;
pub mod accumulator;

pub use accumulator::{MatchDecision, MatchScore};
pub use engine::{MatchRule, RoundResult, TurnBasedEngine};
