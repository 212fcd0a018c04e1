//! # rust-uno
//!
//! A multiplayer session engine for an UNO-style shedding card game.
//!
//! ## Design Principles
//!
//! 1. **Validate, Then Mutate**: A rejected move leaves the session exactly
//!    as it was. The one exception is running out of cards part-way through
//!    a penalty, which is reported after the fact.
//!
//! 2. **Sessions Own Their State**: Each session holds its deck, piles,
//!    players and RNG behind its own lock. Nothing is shared between
//!    sessions.
//!
//! 3. **Transport-Agnostic**: Commands come in and addressed events go out.
//!    Sockets, framing and reconnection belong to the caller.
//!
//! ## Modules
//!
//! - `core`: Errors, configuration, connection ids, seeded RNG
//! - `cards`: Colours, effects, cards and the 108-card deck
//! - `zones`: Draw and discard piles with reshuffle
//! - `rules`: Face matching and turn rotation
//! - `session`: The per-game state machine and player views
//! - `registry`: Live sessions and connection seating
//! - `protocol`: Commands, events and the dispatcher

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod session;
pub mod registry;
pub mod protocol;

// Re-export commonly used types
pub use crate::core::{
    ConnectionId, GameError, GameRng, InvalidPlayPolicy, RegistryConfig, Result, SessionConfig,
};

pub use crate::cards::{build_standard_deck, Card, Colour, Effect, STANDARD_DECK_SIZE};

pub use crate::zones::Piles;

pub use crate::rules::{Direction, Face, Rotation};

pub use crate::session::{
    Departure, MoveOutcome, MoveStatus, OpponentView, Player, PlayerView, Session, SessionPhase,
};

pub use crate::registry::{Registry, SessionHandle};

pub use crate::protocol::{Command, Dispatcher, Event, Outgoing};
