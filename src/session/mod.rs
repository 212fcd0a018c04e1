//! The game-session engine.
//!
//! ## Key Types
//!
//! - `Session`: deck, piles, roster, rotation, face and pending draws
//! - `Player`: identity, hand, host and per-turn draw flag
//! - `MoveOutcome` / `MoveStatus`: what a move did, for broadcasting
//! - `PlayerView`: one player's snapshot of the table

pub mod engine;
pub mod outcome;
pub mod player;
pub mod view;

pub use engine::Session;
pub use outcome::{Departure, MoveOutcome, MoveStatus, SessionPhase};
pub use player::Player;
pub use view::{OpponentView, PlayerView};
