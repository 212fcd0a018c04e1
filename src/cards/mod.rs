//! Card system: colours, effect tags, cards and the standard deck.
//!
//! ## Key Types
//!
//! - `Colour`: one of the four suit colours
//! - `Effect`: skip, reverse, +2, +4, colour change
//! - `Card`: immutable colour/number/effects value
//!
//! Cards are created once when a session builds its deck and afterwards
//! only move between piles and hands.

pub mod card;
pub mod deck;

pub use card::{Card, Colour, Effect, Effects};
pub use deck::{build_standard_deck, shuffle, STANDARD_DECK_SIZE};
