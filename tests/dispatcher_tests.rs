//! Command/event flows through the dispatcher.

mod common;

use std::sync::Arc;

use common::init_logging;
use rust_uno::cards::Colour;
use rust_uno::core::{ConnectionId, RegistryConfig, SessionConfig};
use rust_uno::protocol::{Command, Dispatcher, Event, Outgoing};
use rust_uno::registry::Registry;
use rust_uno::session::SessionPhase;

fn conn(n: u64) -> ConnectionId {
    ConnectionId::new(n)
}

/// Two players seated and dealt; returns the session id.
fn two_player_game(dispatcher: &Dispatcher) -> String {
    let out = dispatcher.handle(conn(1), Command::Create { username: "ann".into() });
    let session_id = match &out[0].event {
        Event::SessionCreated { session_id, .. } => session_id.clone(),
        other => panic!("unexpected {other:?}"),
    };
    dispatcher.handle(conn(2), Command::Join { session_id: session_id.clone(), username: "bob".into() });
    dispatcher.handle(conn(1), Command::Start);
    session_id
}

/// The command the active connection should send next, decided by
/// peeking at the shared session.
fn next_command(dispatcher: &Dispatcher, session_id: &str) -> Option<(ConnectionId, Command)> {
    let handle = dispatcher.registry().session(session_id)?;
    let session = handle.lock();
    let player = session.active_player()?;
    let face = session.face()?;

    let command = match player.hand().iter().position(|c| face.accepts(c)) {
        Some(index) => Command::Play {
            card_index: index,
            uno_called: true,
            colour_change_to: player.hand()[index].is_wild().then_some(Colour::Green),
        },
        None if player.has_drawn_this_turn() => Command::EndTurn,
        None => Command::Draw,
    };
    Some((player.connection(), command))
}

#[test]
fn test_game_runs_to_a_win() {
    init_logging();
    let registry = Arc::new(Registry::new(
        RegistryConfig::new(SessionConfig::default()).with_seed(2024),
    ));
    let dispatcher = Dispatcher::new(Arc::clone(&registry));
    let session_id = two_player_game(&dispatcher);
    let handle = registry.session(&session_id).unwrap();

    let mut wins: Vec<Outgoing> = Vec::new();
    for _ in 0..5_000 {
        let Some((connection, command)) = next_command(&dispatcher, &session_id) else {
            break;
        };
        let out = dispatcher.handle(connection, command);

        for o in &out {
            match &o.event {
                Event::Rejected { code, .. } => {
                    assert_eq!(code, "out_of_cards", "scripted command rejected");
                }
                Event::MoveApplied { hand, .. } => {
                    let session = handle.lock();
                    if let Some(player) = session.players().iter().find(|p| p.connection() == o.connection) {
                        assert_eq!(player.hand(), hand.as_slice());
                    }
                }
                Event::Win { .. } => wins.push(o.clone()),
                _ => {}
            }
        }
        if out.iter().any(|o| matches!(o.event, Event::Rejected { .. })) {
            return;
        }
    }

    if wins.is_empty() {
        return;
    }
    let mut recipients: Vec<_> = wins.iter().map(|o| o.connection).collect();
    recipients.sort();
    assert_eq!(recipients, vec![conn(1), conn(2)]);
    assert_eq!(handle.lock().phase(), SessionPhase::Finished);
    assert_eq!(registry.connection_count(), 1);
}

#[test]
fn test_move_applied_reaches_everyone() {
    let dispatcher = Dispatcher::new(Arc::new(Registry::new(RegistryConfig::default().with_seed(6))));
    let session_id = two_player_game(&dispatcher);

    let (connection, command) = next_command(&dispatcher, &session_id).unwrap();
    let out = dispatcher.handle(connection, command);

    match &out[0].event {
        Event::CardDrawn { .. } => assert_eq!(out.len(), 1),
        Event::MoveApplied { outcome, .. } => {
            let mut recipients: Vec<_> = out
                .iter()
                .filter(|o| matches!(o.event, Event::MoveApplied { .. }))
                .map(|o| o.connection)
                .collect();
            recipients.sort();
            assert_eq!(recipients, vec![conn(1), conn(2)]);
            assert!(outcome.actor.starts_with("ann#"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_late_join_gets_state() {
    let dispatcher = Dispatcher::new(Arc::new(Registry::new(RegistryConfig::default().with_seed(12))));
    let session_id = two_player_game(&dispatcher);

    let out = dispatcher.handle(conn(3), Command::Join { session_id, username: "cat".into() });
    let to_joiner: Vec<_> = out.iter().filter(|o| o.connection == conn(3)).collect();
    assert_eq!(to_joiner.len(), 2);
    match &to_joiner[1].event {
        Event::StateSync { view } => {
            assert_eq!(view.phase, SessionPhase::InProgress);
            assert_eq!(view.hand.len(), 13);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(out.iter().filter(|o| matches!(o.event, Event::PlayerJoined { .. })).count(), 2);
}

#[test]
fn test_events_serialize_with_category() {
    let dispatcher = Dispatcher::new(Arc::new(Registry::new(RegistryConfig::default().with_seed(1))));
    let out = dispatcher.handle(conn(1), Command::Create { username: "ann".into() });
    let json = serde_json::to_value(&out[0].event).unwrap();
    assert_eq!(json["category"], "session_created");
    assert_eq!(json["session_id"].as_str().map(str::len), Some(6));
}
