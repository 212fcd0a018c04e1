//! Inbound commands, as decoded by the transport.

use serde::{Deserialize, Serialize};

use crate::cards::Colour;

/// One request from a client connection.
///
/// ```
/// use rust_uno::cards::Colour;
/// use rust_uno::protocol::Command;
///
/// let cmd: Command = serde_json::from_str(
///     r#"{"category": "play", "card_index": 2, "uno_called": true, "colour_change_to": "blue"}"#,
/// ).unwrap();
/// assert_eq!(
///     cmd,
///     Command::Play { card_index: 2, uno_called: true, colour_change_to: Some(Colour::Blue) }
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Command {
    /// Open a session and sit in it as host.
    Create { username: String },
    /// Sit in an existing session.
    Join { session_id: String, username: String },
    /// Host deals and starts.
    Start,
    /// Play a card from hand.
    Play {
        card_index: usize,
        #[serde(default)]
        uno_called: bool,
        #[serde(default)]
        colour_change_to: Option<Colour>,
    },
    /// Draw the one card allowed per turn.
    Draw,
    /// Pass after drawing.
    EndTurn,
    /// Leave the session (also sent on disconnect).
    Leave,
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Join { .. } => "join",
            Command::Start => "start",
            Command::Play { .. } => "play",
            Command::Draw => "draw",
            Command::EndTurn => "end_turn",
            Command::Leave => "leave",
        }
    }
}
