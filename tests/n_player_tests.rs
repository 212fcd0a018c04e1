//! Player-count coverage.
//!
//! Rotation, effects and departures must behave for every table size the
//! session allows, not just heads-up.

mod common;

use common::{seated, started, take_turn, Turn};
use rust_uno::cards::{Effect, STANDARD_DECK_SIZE};
use rust_uno::core::{ConnectionId, GameError, SessionConfig};
use rust_uno::rules::Direction;
use rust_uno::session::{MoveStatus, SessionPhase};

#[test]
fn test_start_for_each_table_size() {
    for player_count in 2..=4 {
        let session = started(player_count, 42);
        assert_eq!(session.players().len(), player_count);
        assert_eq!(
            session.piles().draw_len(),
            STANDARD_DECK_SIZE - player_count * 13 - 1
        );
        assert!(session.players()[0].is_host());
        assert_eq!(session.players().iter().filter(|p| p.is_host()).count(), 1);
    }
}

#[test]
fn test_turn_visits_every_seat() {
    for player_count in 2..=4 {
        let mut session = started(player_count, 7);
        let mut seen = vec![false; player_count];

        for _ in 0..player_count {
            let seat = session
                .players()
                .iter()
                .position(|p| session.is_active(p.identity()))
                .unwrap();
            seen[seat] = true;

            let identity = session.players()[seat].identity().to_string();
            session.draw_for_turn(&identity).unwrap();
            session.end_turn_after_draw(&identity).unwrap();
        }
        assert!(seen.iter().all(|s| *s), "{player_count} players: {seen:?}");
    }
}

#[test]
fn test_max_players_is_configurable() {
    let config = SessionConfig::new().with_max_players(6);
    let mut session = seated(6, config);
    assert_eq!(
        session.add_player("p6", ConnectionId::new(6)),
        Err(GameError::SessionFull { max: 6 })
    );
    session.start().unwrap();
    assert_eq!(session.card_total(), STANDARD_DECK_SIZE);
}

#[test]
fn test_departures_down_to_one() {
    let mut session = started(4, 3);
    for identity in ["p2", "p0"] {
        session.remove_player(identity).unwrap();
        assert!(session.is_in_progress());
        assert_eq!(session.card_total(), STANDARD_DECK_SIZE);
        assert!(session.active_player().is_some());
    }
    assert_eq!(session.host().map(|p| p.identity()), Some("p1"));

    session.remove_player("p1").unwrap();
    assert_eq!(session.phase(), SessionPhase::Finished);
    assert!(session.active_player().is_none());
}

#[test]
fn test_direction_tracks_reverses() {
    let mut session = started(3, 31);
    let mut expected = Direction::Clockwise;

    for _ in 0..200 {
        if !session.is_in_progress() {
            break;
        }
        match take_turn(&mut session) {
            Ok(Turn::Played(outcome)) => {
                let reversed = outcome.card.has(Effect::Reverse);
                let counted = !matches!(outcome.status, MoveStatus::InvalidCard);
                if reversed && counted {
                    expected = expected.reversed();
                }
                assert_eq!(outcome.direction, expected);
            }
            Ok(Turn::Passed) => assert_eq!(session.direction(), expected),
            Err(_) => break,
        }
    }
}
