//! Results of session operations, carrying what a caller needs to
//! broadcast: the new face, whose turn it is, and how the move ended.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::ConnectionId;
use crate::rules::{Direction, Face};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Accepting players, nothing dealt.
    #[default]
    Forming,
    /// Dealt, turn loop running.
    InProgress,
    /// Fewer than two players remain after a win or departure.
    Finished,
}

/// How a move ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveStatus {
    /// Card applied; nothing further.
    Played,
    /// Card failed the legality check under the forfeit policy. It stays
    /// on the discard pile and the turn has passed.
    InvalidCard,
    /// Mover dropped to one card without calling it and drew the penalty.
    UncalledUno,
    /// Mover emptied their hand and left the rotation.
    Win { winner: String },
}

/// Result of `Session::apply_move`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// Identity of the mover.
    pub actor: String,
    /// The card that went to the discard pile.
    pub card: Card,
    #[serde(flatten)]
    pub status: MoveStatus,
    /// Face after the move.
    pub face: Face,
    /// Whose turn it is now, if anyone is left.
    pub next_player: Option<String>,
    pub direction: Direction,
    /// Pending draw count after the move.
    pub pending_draw: usize,
    /// Cards the mover drew during the move (chain penalty or uncalled call).
    pub cards_drawn: usize,
    /// Set when the mover won as host and the role moved on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_host: Option<String>,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self.status, MoveStatus::Win { .. })
    }
}

/// Result of `Session::remove_player`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Departure {
    pub identity: String,
    pub connection: ConnectionId,
    /// Set when the host left and the role moved.
    pub new_host: Option<String>,
    /// Players still seated.
    pub remaining: usize,
}

impl Departure {
    /// The session has nobody left and should be torn down.
    #[must_use]
    pub fn session_empty(&self) -> bool {
        self.remaining == 0
    }
}
