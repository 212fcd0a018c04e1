//! Routes commands to sessions and addresses the resulting events.
//!
//! `Dispatcher::handle` does all of its work under the registry and
//! session locks and returns a list of `Outgoing` events. The transport
//! sends them once `handle` has returned and every lock is released.

use std::sync::Arc;

use tracing::{debug, warn};

use super::command::Command;
use super::event::{Event, Outgoing};
use crate::cards::Colour;
use crate::core::{ConnectionId, GameError, Result};
use crate::registry::Registry;
use crate::session::{MoveStatus, Session};

/// Applies commands from connections to the registry's sessions.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Handle one command. Failures come back as a single `Rejected`
    /// addressed to `connection`.
    pub fn handle(&self, connection: ConnectionId, command: Command) -> Vec<Outgoing> {
        let name = command.name();
        let result = match command {
            Command::Create { username } => self.create(connection, &username),
            Command::Join { session_id, username } => self.join(connection, &session_id, &username),
            Command::Start => self.start(connection),
            Command::Play { card_index, uno_called, colour_change_to } => {
                self.play(connection, card_index, uno_called, colour_change_to)
            }
            Command::Draw => self.draw(connection),
            Command::EndTurn => self.end_turn(connection),
            Command::Leave => self.leave(connection),
        };

        match result {
            Ok(outgoing) => outgoing,
            Err(err) => {
                debug!(%connection, command = name, code = err.code(), error = %err, "command rejected");
                vec![Outgoing::new(connection, Event::rejected(&err))]
            }
        }
    }

    fn create(&self, connection: ConnectionId, username: &str) -> Result<Vec<Outgoing>> {
        let joined = self.registry.create_session(connection, username)?;
        Ok(vec![Outgoing::new(
            connection,
            Event::SessionCreated {
                session_id: joined.seat.session_id,
                identity: joined.seat.identity,
            },
        )])
    }

    fn join(&self, connection: ConnectionId, session_id: &str, username: &str) -> Result<Vec<Outgoing>> {
        let joined = self.registry.join_session(connection, session_id, username)?;
        let session = joined.session.lock();
        let identity = joined.seat.identity;
        let view = session.view_for(&identity)?;

        let mut out: Vec<Outgoing> = session
            .players()
            .iter()
            .filter(|p| p.identity() != identity)
            .map(|p| Outgoing::new(p.connection(), Event::PlayerJoined { identity: identity.clone() }))
            .collect();

        let in_progress = session.is_in_progress();
        out.push(Outgoing::new(
            connection,
            Event::Joined {
                session_id: joined.seat.session_id,
                identity,
                opponents: view.opponents.clone(),
            },
        ));
        if in_progress {
            out.push(Outgoing::new(connection, Event::StateSync { view }));
        }
        Ok(out)
    }

    fn start(&self, connection: ConnectionId) -> Result<Vec<Outgoing>> {
        let (seat, handle) = self.registry.resolve(connection)?;
        let mut session = handle.lock();
        session.start_by(&seat.identity)?;

        Ok(session
            .views()
            .into_iter()
            .map(|(conn, view)| Outgoing::new(conn, Event::GameStarted { view }))
            .collect())
    }

    fn play(
        &self,
        connection: ConnectionId,
        card_index: usize,
        uno_called: bool,
        colour_change_to: Option<Colour>,
    ) -> Result<Vec<Outgoing>> {
        let (seat, handle) = self.registry.resolve(connection)?;
        let mut out = Vec::new();

        let winner = {
            let mut session = handle.lock();
            let outcome = match session.apply_move(&seat.identity, card_index, uno_called, colour_change_to) {
                Ok(outcome) => outcome,
                Err(GameError::OutOfCards) => {
                    // The move was applied before the piles ran dry.
                    warn!(session = %seat.session_id, player = %seat.identity, "piles exhausted mid-move");
                    out.push(Outgoing::new(connection, Event::rejected(&GameError::OutOfCards)));
                    out.extend(state_sync(&session));
                    return Ok(out);
                }
                Err(err) => return Err(err),
            };

            for player in session.players() {
                out.push(Outgoing::new(
                    player.connection(),
                    Event::MoveApplied {
                        outcome: outcome.clone(),
                        hand: player.hand().to_vec(),
                        is_turn: session.is_active(player.identity()),
                    },
                ));
            }

            match &outcome.status {
                MoveStatus::UncalledUno => {
                    let hand = session
                        .player(&seat.identity)
                        .map(|p| p.hand().to_vec())
                        .unwrap_or_default();
                    out.extend(broadcast(&session, &Event::UncalledUno {
                        player: seat.identity.clone(),
                        hand,
                    }));
                    None
                }
                MoveStatus::Win { winner } => {
                    out.push(Outgoing::new(
                        connection,
                        Event::MoveApplied { outcome: outcome.clone(), hand: Vec::new(), is_turn: false },
                    ));
                    let event = Event::Win {
                        winner: winner.clone(),
                        new_host: outcome.new_host.clone(),
                    };
                    out.extend(broadcast(&session, &event));
                    out.push(Outgoing::new(connection, event));
                    Some(winner.clone())
                }
                MoveStatus::Played | MoveStatus::InvalidCard => None,
            }
        };

        // Session lock released above; the registry lock comes first.
        if let Some(winner) = winner {
            self.registry.unseat(connection);
            debug!(session = %seat.session_id, %winner, "winner unseated");
        }
        Ok(out)
    }

    fn draw(&self, connection: ConnectionId) -> Result<Vec<Outgoing>> {
        let (seat, handle) = self.registry.resolve(connection)?;
        let card = handle.lock().draw_for_turn(&seat.identity)?;
        Ok(vec![Outgoing::new(connection, Event::CardDrawn { card })])
    }

    fn end_turn(&self, connection: ConnectionId) -> Result<Vec<Outgoing>> {
        let (seat, handle) = self.registry.resolve(connection)?;
        let mut session = handle.lock();
        session.end_turn_after_draw(&seat.identity)?;

        let next = session.active_player().map(|p| p.identity().to_string());
        Ok(session
            .players()
            .iter()
            .map(|p| {
                Outgoing::new(
                    p.connection(),
                    Event::TurnEnded {
                        next_player: next.clone(),
                        is_turn: next.as_deref() == Some(p.identity()),
                    },
                )
            })
            .collect())
    }

    fn leave(&self, connection: ConnectionId) -> Result<Vec<Outgoing>> {
        let left = self.registry.leave(connection)?;
        let session = left.session.lock();
        let event = Event::PlayerLeft {
            identity: left.departure.identity,
            new_host: left.departure.new_host,
            active_player: session.active_player().map(|p| p.identity().to_string()),
        };
        Ok(broadcast(&session, &event))
    }
}

fn broadcast(session: &Session, event: &Event) -> Vec<Outgoing> {
    session
        .connections()
        .into_iter()
        .map(|conn| Outgoing::new(conn, event.clone()))
        .collect()
}

fn state_sync(session: &Session) -> Vec<Outgoing> {
    session
        .views()
        .into_iter()
        .map(|(conn, view)| Outgoing::new(conn, Event::StateSync { view }))
        .collect()
}
