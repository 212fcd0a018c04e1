//! A seated participant: identity, hand and per-turn flags.

use serde::Serialize;

use crate::cards::Card;
use crate::core::ConnectionId;

/// One player at the table.
///
/// The hand is owned exclusively by the player; only the session moves
/// cards in and out of it.
#[derive(Clone, Debug, Serialize)]
pub struct Player {
    identity: String,
    #[serde(skip)]
    connection: ConnectionId,
    hand: Vec<Card>,
    is_host: bool,
    has_drawn_this_turn: bool,
}

impl Player {
    #[must_use]
    pub fn new(identity: impl Into<String>, connection: ConnectionId) -> Self {
        Self {
            identity: identity.into(),
            connection,
            hand: Vec::new(),
            is_host: false,
            has_drawn_this_turn: false,
        }
    }

    /// Disambiguated display name, unique within the registry.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn is_host(&self) -> bool {
        self.is_host
    }

    #[must_use]
    pub fn has_drawn_this_turn(&self) -> bool {
        self.has_drawn_this_turn
    }

    pub(crate) fn give(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn give_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Caller checks the index first.
    pub(crate) fn take(&mut self, index: usize) -> Card {
        self.hand.remove(index)
    }

    pub(crate) fn take_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    pub(crate) fn set_host(&mut self, is_host: bool) {
        self.is_host = is_host;
    }

    pub(crate) fn set_drawn(&mut self, drawn: bool) {
        self.has_drawn_this_turn = drawn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Colour;

    #[test]
    fn test_new_player() {
        let player = Player::new("ann#0001", ConnectionId::new(1));
        assert_eq!(player.identity(), "ann#0001");
        assert!(player.hand().is_empty());
        assert!(!player.is_host());
        assert!(!player.has_drawn_this_turn());
    }

    #[test]
    fn test_hand_moves() {
        let mut player = Player::new("ann#0001", ConnectionId::new(1));
        player.give(Card::numbered(Colour::Red, 1));
        player.give_all([Card::wild(), Card::numbered(Colour::Blue, 2)]);
        assert_eq!(player.hand_size(), 3);

        assert_eq!(player.take(1), Card::wild());
        assert_eq!(player.take_hand().len(), 2);
        assert_eq!(player.hand_size(), 0);
    }

    #[test]
    fn test_serialization_hides_connection() {
        let player = Player::new("ann#0001", ConnectionId::new(9));
        let json = serde_json::to_value(&player).unwrap();
        assert!(json.get("connection").is_none());
        assert_eq!(json["identity"], "ann#0001");
    }
}
