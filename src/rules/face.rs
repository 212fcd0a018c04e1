//! The current face and the legality check.
//!
//! The face mirrors the top discard, except that its colour is overridden
//! after a colour change.

use serde::Serialize;

use crate::cards::{Card, Colour, Effect, Effects};

/// Colour / number / effects a play must match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Face {
    pub colour: Option<Colour>,
    pub number: Option<u8>,
    pub effects: Effects,
}

impl Face {
    /// Face showing exactly what is printed on `card`.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            colour: card.colour(),
            number: card.number(),
            effects: card.effects().iter().copied().collect(),
        }
    }

    /// Whether `card` may be played on this face.
    ///
    /// Legal iff the card is a colour change, or matches the colour, or
    /// both carry the same number, or they share an effect tag.
    ///
    /// ```
    /// use rust_uno::cards::{Card, Colour};
    /// use rust_uno::rules::Face;
    ///
    /// let face = Face::from_card(&Card::numbered(Colour::Red, 5));
    /// assert!(face.accepts(&Card::numbered(Colour::Blue, 5)));
    /// assert!(!face.accepts(&Card::numbered(Colour::Blue, 3)));
    /// ```
    #[must_use]
    pub fn accepts(&self, card: &Card) -> bool {
        if card.has(Effect::ColourChange) {
            return true;
        }

        let colour_match = card.colour().is_some() && card.colour() == self.colour;
        let number_match = card.number().is_some() && card.number() == self.number;
        let effect_match = card.effects().iter().any(|e| self.effects.contains(e));

        colour_match || number_match || effect_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(colour: Option<Colour>, number: Option<u8>, effects: &[Effect]) -> Face {
        Face {
            colour,
            number,
            effects: effects.iter().copied().collect(),
        }
    }

    #[test]
    fn test_colour_and_number_match() {
        let red5 = face(Some(Colour::Red), Some(5), &[]);

        assert!(red5.accepts(&Card::numbered(Colour::Red, 1)));
        assert!(red5.accepts(&Card::numbered(Colour::Blue, 5)));
        assert!(!red5.accepts(&Card::numbered(Colour::Blue, 3)));
        assert!(red5.accepts(&Card::action(Colour::Red, Effect::Skip)));
        assert!(!red5.accepts(&Card::action(Colour::Green, Effect::Skip)));
    }

    #[test]
    fn test_zero_matches_zero() {
        let green0 = face(Some(Colour::Green), Some(0), &[]);
        assert!(green0.accepts(&Card::numbered(Colour::Yellow, 0)));
    }

    #[test]
    fn test_effect_match() {
        let blue_skip = face(Some(Colour::Blue), None, &[Effect::Skip]);

        assert!(blue_skip.accepts(&Card::action(Colour::Red, Effect::Skip)));
        assert!(!blue_skip.accepts(&Card::action(Colour::Red, Effect::Reverse)));
        // Absent numbers never match each other
        assert!(!blue_skip.accepts(&Card::action(Colour::Red, Effect::PlusTwo)));
    }

    #[test]
    fn test_wild_always_legal() {
        let red5 = face(Some(Colour::Red), Some(5), &[]);
        assert!(red5.accepts(&Card::wild()));
        assert!(red5.accepts(&Card::wild_draw_four()));
    }

    #[test]
    fn test_colourless_face() {
        // Face turned up from a wild before anyone picked a colour
        let wild = Face::from_card(&Card::wild_draw_four());

        assert!(!wild.accepts(&Card::numbered(Colour::Red, 1)));
        assert!(wild.accepts(&Card::wild()));
    }
}
