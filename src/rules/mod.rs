//! Table rules that do not depend on session bookkeeping.
//!
//! - `Face`: what is showing and which cards may follow it
//! - `Rotation`: whose turn it is and which way play runs
//!
//! The session applies these; it never re-derives them.

pub mod face;
pub mod rotation;

pub use face::Face;
pub use rotation::{Direction, Rotation};
