//! Per-player snapshots.
//!
//! A view shows the recipient's own hand and only the sizes of everyone
//! else's, so it can be sent to that player as-is.

use serde::Serialize;

use super::outcome::SessionPhase;
use crate::cards::Card;
use crate::rules::{Direction, Face};

/// What one opponent looks like from across the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpponentView {
    pub identity: String,
    pub is_host: bool,
    pub hand_size: usize,
}

/// Everything a single player is allowed to see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub session_id: String,
    pub identity: String,
    pub phase: SessionPhase,
    pub is_host: bool,
    pub hand: Vec<Card>,
    /// `None` before the deal.
    pub face: Option<Face>,
    pub is_turn: bool,
    pub active_player: Option<String>,
    pub direction: Direction,
    pub pending_draw: usize,
    pub draw_pile: usize,
    /// Seating order, self excluded.
    pub opponents: Vec<OpponentView>,
}
