//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use rust_uno::cards::Colour;
use rust_uno::core::{ConnectionId, Result, SessionConfig};
use rust_uno::session::{MoveOutcome, Session};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Initialize test logging once per binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// A forming session with players `p0..pN` on connections `0..N`.
pub fn seated(player_count: usize, config: SessionConfig) -> Session {
    let mut session = Session::new("123456", config);
    for i in 0..player_count {
        session
            .add_player(format!("p{i}"), ConnectionId::new(i as u64))
            .unwrap();
    }
    session
}

/// A started session with a fixed seed.
pub fn started(player_count: usize, seed: u64) -> Session {
    let mut session = seated(player_count, SessionConfig::new().with_seed(seed));
    session.start().unwrap();
    session
}

/// What a scripted turn did.
#[derive(Debug)]
pub enum Turn {
    Played(MoveOutcome),
    Passed,
}

/// Take one turn for the active player: play the first legal card,
/// otherwise draw and play the drawn card if it fits, otherwise pass.
/// Always calls uno; wilds pick red.
pub fn take_turn(session: &mut Session) -> Result<Turn> {
    let (identity, playable) = {
        let player = session.active_player().expect("a player holds the turn");
        let face = session.face().expect("face is turned up");
        let playable = player.hand().iter().position(|card| face.accepts(card));
        (player.identity().to_string(), playable)
    };

    if let Some(index) = playable {
        return play(session, &identity, index).map(Turn::Played);
    }

    let drawn = session.draw_for_turn(&identity)?;
    if session.face().is_some_and(|face| face.accepts(&drawn)) {
        let index = session.player(&identity).map_or(0, |p| p.hand_size() - 1);
        return play(session, &identity, index).map(Turn::Played);
    }

    session.end_turn_after_draw(&identity)?;
    Ok(Turn::Passed)
}

fn play(session: &mut Session, identity: &str, index: usize) -> Result<MoveOutcome> {
    let wild = session
        .player(identity)
        .and_then(|p| p.hand().get(index))
        .is_some_and(|card| card.is_wild());
    let colour = wild.then_some(Colour::Red);
    session.apply_move(identity, index, true, colour)
}
