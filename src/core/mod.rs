//! Core building blocks: RNG, configuration, errors, connection handles.
//!
//! Nothing in here knows the card game's rules. Sessions, the registry and
//! the dispatcher all build on these types.

pub mod config;
pub mod connection;
pub mod error;
pub mod rng;

pub use config::{InvalidPlayPolicy, RegistryConfig, SessionConfig};
pub use connection::ConnectionId;
pub use error::{GameError, Result};
pub use rng::GameRng;
