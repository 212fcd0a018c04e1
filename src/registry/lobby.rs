//! Live sessions and the connections seated in them.
//!
//! ## Locking
//!
//! The registry's maps sit behind one `parking_lot::Mutex`; each session
//! sits behind its own. When both are needed the registry lock is taken
//! first, and no session operation ever reaches back into the registry,
//! so the order cannot invert.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use super::identity::{disambiguate, new_session_id};
use crate::core::{ConnectionId, GameError, GameRng, RegistryConfig, Result, SessionConfig};
use crate::session::{Departure, Session};

/// Shared, lockable session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Where a connection sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub session_id: String,
    pub identity: String,
}

/// Result of creating or joining a session.
#[derive(Clone, Debug)]
pub struct Joined {
    pub seat: Seat,
    pub session: SessionHandle,
}

/// Result of a connection leaving.
#[derive(Clone, Debug)]
pub struct Left {
    pub seat: Seat,
    pub departure: Departure,
    pub session: SessionHandle,
    /// The session emptied and was dropped from the registry.
    pub closed: bool,
}

#[derive(Debug)]
struct RegistryState {
    sessions: FxHashMap<String, SessionHandle>,
    seats: FxHashMap<ConnectionId, Seat>,
    identities: FxHashSet<String>,
    rng: GameRng,
}

impl RegistryState {
    fn ensure_unseated(&self, connection: ConnectionId) -> Result<()> {
        match self.seats.get(&connection) {
            Some(seat) => Err(GameError::AlreadySeated(seat.session_id.clone())),
            None => Ok(()),
        }
    }

    fn new_identity(&mut self, username: &str) -> String {
        let identities = &self.identities;
        disambiguate(username, &mut self.rng, |c| identities.contains(c))
    }

    fn seat(&mut self, connection: ConnectionId, seat: Seat) {
        self.identities.insert(seat.identity.clone());
        self.seats.insert(connection, seat);
    }
}

/// Maps session ids to sessions and connections to seats.
///
/// ```
/// use rust_uno::core::{ConnectionId, RegistryConfig};
/// use rust_uno::registry::Registry;
///
/// let registry = Registry::new(RegistryConfig::default().with_seed(1));
/// let host = registry.create_session(ConnectionId::new(1), "ann").unwrap();
/// let guest = registry
///     .join_session(ConnectionId::new(2), &host.seat.session_id, "bob")
///     .unwrap();
///
/// assert_eq!(host.seat.session_id, guest.seat.session_id);
/// assert_eq!(host.session.lock().players().len(), 2);
/// ```
#[derive(Debug)]
pub struct Registry {
    session_config: SessionConfig,
    state: Mutex<RegistryState>,
}

impl Registry {
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        let rng = GameRng::from_seed_or_entropy(config.seed.or(config.session.seed));
        Self {
            session_config: config.session,
            state: Mutex::new(RegistryState {
                sessions: FxHashMap::default(),
                seats: FxHashMap::default(),
                identities: FxHashSet::default(),
                rng,
            }),
        }
    }

    /// Open a new session with `connection` seated as host.
    pub fn create_session(&self, connection: ConnectionId, username: &str) -> Result<Joined> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.ensure_unseated(connection)?;

        let session_id = new_session_id(&mut state.rng, |c| state.sessions.contains_key(c));
        let identity = state.new_identity(username);
        let session_rng = state.rng.fork();

        let mut session = Session::with_rng(session_id.clone(), self.session_config.clone(), session_rng);
        session.add_player(identity.clone(), connection)?;
        let handle: SessionHandle = Arc::new(Mutex::new(session));

        let seat = Seat { session_id: session_id.clone(), identity };
        state.sessions.insert(session_id.clone(), handle.clone());
        state.seat(connection, seat.clone());

        info!(session = %session_id, host = %seat.identity, %connection, "session created");
        Ok(Joined { seat, session: handle })
    }

    /// Seat `connection` in an existing session.
    pub fn join_session(&self, connection: ConnectionId, session_id: &str, username: &str) -> Result<Joined> {
        let mut state = self.state.lock();
        state.ensure_unseated(connection)?;

        let handle = state
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))?;
        let identity = state.new_identity(username);

        handle.lock().add_player(identity.clone(), connection)?;

        let seat = Seat { session_id: session_id.to_string(), identity };
        state.seat(connection, seat.clone());

        info!(session = %session_id, player = %seat.identity, %connection, "joined session");
        Ok(Joined { seat, session: handle })
    }

    /// Resolve a connection to its seat and session.
    pub fn resolve(&self, connection: ConnectionId) -> Result<(Seat, SessionHandle)> {
        let state = self.state.lock();
        let seat = state.seats.get(&connection).cloned().ok_or(GameError::UnknownConnection)?;
        let handle = state
            .sessions
            .get(&seat.session_id)
            .cloned()
            .ok_or_else(|| GameError::SessionNotFound(seat.session_id.clone()))?;
        Ok((seat, handle))
    }

    /// Remove `connection` from its session, tearing the session down if
    /// nobody is left.
    pub fn leave(&self, connection: ConnectionId) -> Result<Left> {
        let mut state = self.state.lock();
        let seat = state.seats.remove(&connection).ok_or(GameError::UnknownConnection)?;
        state.identities.remove(&seat.identity);

        let handle = state
            .sessions
            .get(&seat.session_id)
            .cloned()
            .ok_or_else(|| GameError::SessionNotFound(seat.session_id.clone()))?;
        let departure = handle.lock().remove_player(&seat.identity)?;

        let closed = departure.session_empty();
        if closed {
            state.sessions.remove(&seat.session_id);
            info!(session = %seat.session_id, "session torn down");
        }

        Ok(Left { seat, departure, session: handle, closed })
    }

    /// Forget a connection whose player has already left the session's
    /// rotation (a winner). Tears the session down if it is empty.
    pub fn unseat(&self, connection: ConnectionId) -> Option<Seat> {
        let mut state = self.state.lock();
        let seat = state.seats.remove(&connection)?;
        state.identities.remove(&seat.identity);

        let empty = state
            .sessions
            .get(&seat.session_id)
            .is_some_and(|handle| handle.lock().players().is_empty());
        if empty {
            state.sessions.remove(&seat.session_id);
            info!(session = %seat.session_id, "session torn down");
        }

        debug!(%connection, identity = %seat.identity, "unseated");
        Some(seat)
    }

    #[must_use]
    pub fn session(&self, session_id: &str) -> Option<SessionHandle> {
        self.state.lock().sessions.get(session_id).cloned()
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.state.lock().sessions.len()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.state.lock().seats.len()
    }

    #[must_use]
    pub fn is_identity_active(&self, identity: &str) -> bool {
        self.state.lock().identities.contains(identity)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
