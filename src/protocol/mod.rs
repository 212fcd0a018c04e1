//! Command/event protocol between connections and sessions.
//!
//! - `Command`: inbound requests, tagged by `category`
//! - `Event`, `Outgoing`: notices addressed to connections
//! - `Dispatcher`: applies commands and collects the events to send

pub mod command;
pub mod dispatcher;
pub mod event;

pub use command::Command;
pub use dispatcher::Dispatcher;
pub use event::{Event, Outgoing};
