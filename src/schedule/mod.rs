//! Deferred callbacks for bot pacing, timeouts and round restarts.
//!
//! Everything runs on one thread: the host advances a virtual clock and the
//! session drains whatever came due. A generation counter replaces the
//! "is this game still alive" flag, so callbacks queued before a teardown
//! never touch the next state.

pub mod scheduler;

pub use scheduler::{Mark, Scheduler};
