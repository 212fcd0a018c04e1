//! Error taxonomy shared by sessions, the registry and the dispatcher.
//!
//! Every variant is recoverable: it is reported to the connection that
//! caused it and the session carries on for everyone else.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("session is full ({max} players)")]
    SessionFull { max: usize },

    #[error("session {0} not found")]
    SessionNotFound(String),

    #[error("only the host can start the game")]
    NotHost,

    #[error("it is not {0}'s turn")]
    OutOfTurn(String),

    #[error("card cannot be played on the current face")]
    InvalidCard,

    #[error("draw pile and discard pile are both exhausted")]
    OutOfCards,

    #[error("session has no players")]
    EmptySession,

    #[error("need at least {required} players to start, have {present}")]
    NotEnoughPlayers { required: usize, present: usize },

    #[error("game already started")]
    AlreadyStarted,

    #[error("game has not started")]
    NotStarted,

    #[error("game has finished")]
    SessionFinished,

    #[error("card index {index} out of range for hand of {hand_size}")]
    CardIndexOutOfRange { index: usize, hand_size: usize },

    #[error("a colour must be chosen when playing a colour change")]
    MissingColourChoice,

    #[error("unknown colour {0:?}")]
    InvalidColour(String),

    #[error("already drew a card this turn")]
    AlreadyDrawn,

    #[error("must draw a card before ending the turn")]
    MustDrawFirst,

    #[error("connection is not seated in any session")]
    UnknownConnection,

    #[error("connection is already seated in session {0}")]
    AlreadySeated(String),

    #[error("player {0} is not in this session")]
    PlayerNotFound(String),
}

impl GameError {
    /// Stable machine-readable code for the wire.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GameError::SessionFull { .. } => "session_full",
            GameError::SessionNotFound(_) => "session_not_found",
            GameError::NotHost => "not_host",
            GameError::OutOfTurn(_) => "out_of_turn",
            GameError::InvalidCard => "invalid_card",
            GameError::OutOfCards => "out_of_cards",
            GameError::EmptySession => "empty_session",
            GameError::NotEnoughPlayers { .. } => "not_enough_players",
            GameError::AlreadyStarted => "already_started",
            GameError::NotStarted => "not_started",
            GameError::SessionFinished => "session_finished",
            GameError::CardIndexOutOfRange { .. } => "card_index_out_of_range",
            GameError::MissingColourChoice => "missing_colour_choice",
            GameError::InvalidColour(_) => "invalid_colour",
            GameError::AlreadyDrawn => "already_drawn",
            GameError::MustDrawFirst => "must_draw_first",
            GameError::UnknownConnection => "unknown_connection",
            GameError::AlreadySeated(_) => "already_seated",
            GameError::PlayerNotFound(_) => "player_not_found",
        }
    }
}
