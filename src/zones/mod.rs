//! Shared card zones.
//!
//! A session has exactly two shared zones, the draw pile and the discard
//! pile. Hands belong to players and live in `session::Player`.

pub mod piles;

pub use piles::Piles;
