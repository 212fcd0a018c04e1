//! Session registry: which sessions exist and who sits where.
//!
//! - `Registry`: session-id → session and connection → seat maps
//! - `SessionHandle`: a session behind its own lock
//! - `identity`: six-digit session ids and `name#NNNN` identities

pub mod identity;
pub mod lobby;

pub use identity::{disambiguate, new_session_id};
pub use lobby::{Joined, Left, Registry, Seat, SessionHandle};
