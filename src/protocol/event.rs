//! Outbound notices and their addressing.

use serde::Serialize;

use crate::cards::Card;
use crate::core::{ConnectionId, GameError};
use crate::session::{MoveOutcome, OpponentView, PlayerView};

/// A notice for one client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Event {
    /// Acknowledges `Command::Create`.
    SessionCreated { session_id: String, identity: String },
    /// Acknowledges `Command::Join` to the joiner.
    Joined {
        session_id: String,
        identity: String,
        opponents: Vec<OpponentView>,
    },
    /// Someone else sat down.
    PlayerJoined { identity: String },
    /// Someone left; `active_player` reflects any turn hand-off.
    PlayerLeft {
        identity: String,
        new_host: Option<String>,
        active_player: Option<String>,
    },
    /// Deal finished; carries the recipient's own view.
    GameStarted { view: PlayerView },
    /// A card was played. `hand` and `is_turn` are the recipient's.
    MoveApplied {
        #[serde(flatten)]
        outcome: MoveOutcome,
        hand: Vec<Card>,
        is_turn: bool,
    },
    /// Sent to the drawer only.
    CardDrawn { card: Card },
    /// The active player passed after drawing.
    TurnEnded { next_player: Option<String>, is_turn: bool },
    /// A player missed their call; their hand is revealed to the table.
    UncalledUno { player: String, hand: Vec<Card> },
    /// `new_host` is set when the winner was host.
    Win { winner: String, new_host: Option<String> },
    /// Full resend of the recipient's view.
    StateSync { view: PlayerView },
    /// The recipient's command failed. Never broadcast.
    Rejected { code: String, message: String },
}

impl Event {
    #[must_use]
    pub fn rejected(err: &GameError) -> Self {
        Event::Rejected {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// An event addressed to a connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outgoing {
    pub connection: ConnectionId,
    pub event: Event,
}

impl Outgoing {
    #[must_use]
    pub fn new(connection: ConnectionId, event: Event) -> Self {
        Self { connection, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_event() {
        let event = Event::rejected(&GameError::NotHost);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "category": "rejected",
                "code": "not_host",
                "message": "only the host can start the game"
            })
        );
    }

    #[test]
    fn test_win_event() {
        let event = Event::Win { winner: "ann#0001".into(), new_host: Some("bob#0002".into()) };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["category"], "win");
        assert_eq!(json["winner"], "ann#0001");
        assert_eq!(json["new_host"], "bob#0002");
    }
}
