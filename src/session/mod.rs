//! Host-facing match orchestration.
//!
//! `Session` wraps one engine and drives it: it validates submissions,
//! schedules bot replies and round restarts on the virtual clock, applies
//! timeouts, and reports progress as `SessionEvent`s. `Lobby` is the
//! "online" stub that ends up seating computers.

pub mod events;
pub mod lobby;
pub mod runner;

pub use events::{SessionEvent, Task};
pub use lobby::{Lobby, LobbyError};
pub use runner::{Session, SessionError};
