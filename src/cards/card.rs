//! Card values: colour, number and effect tags.
//!
//! A `Card` is immutable once built. The constructors are the only way to
//! make one, so every card satisfies the table invariant:
//! - numbered cards have a colour and no effects
//! - action cards have a colour and exactly one of skip / reverse / +2
//! - wild cards have no colour and always carry `ColourChange`,
//!   optionally with `PlusFour`

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::GameError;

/// The four suit colours.
///
/// Decoding goes through `FromStr`, so names are case-insensitive and an
/// unknown name reports `GameError::InvalidColour`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Colour {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Colour {
    pub const ALL: [Colour; 4] = [Colour::Red, Colour::Blue, Colour::Green, Colour::Yellow];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Colour::Red => "red",
            Colour::Blue => "blue",
            Colour::Green => "green",
            Colour::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Colour {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidColour(s.to_string()))
    }
}

impl TryFrom<String> for Colour {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Effect tags a card can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Skip,
    Reverse,
    PlusTwo,
    PlusFour,
    ColourChange,
}

impl Effect {
    /// Effects that add to the pending draw count instead of resolving it.
    #[must_use]
    pub const fn is_stacking(self) -> bool {
        matches!(self, Effect::PlusTwo | Effect::PlusFour)
    }
}

/// Effect tags on one card. At most two, so they live inline.
pub type Effects = SmallVec<[Effect; 2]>;

/// One physical card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    colour: Option<Colour>,
    number: Option<u8>,
    effects: Effects,
}

impl Card {
    /// A plain numbered card (0-9).
    ///
    /// Panics if `number > 9`.
    #[must_use]
    pub fn numbered(colour: Colour, number: u8) -> Self {
        assert!(number <= 9, "card numbers run 0-9, got {number}");
        Self {
            colour: Some(colour),
            number: Some(number),
            effects: Effects::new(),
        }
    }

    /// A coloured action card (skip, reverse or +2).
    ///
    /// Panics on `PlusFour` or `ColourChange`; those only exist on wilds.
    #[must_use]
    pub fn action(colour: Colour, effect: Effect) -> Self {
        assert!(
            matches!(effect, Effect::Skip | Effect::Reverse | Effect::PlusTwo),
            "{effect:?} is not a coloured action"
        );
        Self {
            colour: Some(colour),
            number: None,
            effects: smallvec::smallvec![effect],
        }
    }

    /// A plain wild (colour change).
    #[must_use]
    pub fn wild() -> Self {
        Self {
            colour: None,
            number: None,
            effects: smallvec::smallvec![Effect::ColourChange],
        }
    }

    /// A wild draw four.
    #[must_use]
    pub fn wild_draw_four() -> Self {
        Self {
            colour: None,
            number: None,
            effects: smallvec::smallvec![Effect::ColourChange, Effect::PlusFour],
        }
    }

    #[must_use]
    pub fn colour(&self) -> Option<Colour> {
        self.colour
    }

    #[must_use]
    pub fn number(&self) -> Option<u8> {
        self.number
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    #[must_use]
    pub fn has(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.has(Effect::ColourChange)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.colour, self.number) {
            (Some(c), Some(n)) => write!(f, "{c} {n}"),
            (Some(c), None) => write!(f, "{c} {:?}", self.effects[0]),
            (None, _) if self.has(Effect::PlusFour) => f.write_str("wild +4"),
            (None, _) => f.write_str("wild"),
        }
    }
}
