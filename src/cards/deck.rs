//! The standard 108-card deck.
//!
//! Per colour: two of each number 0-9 and two each of skip, reverse and
//! +2 (26 cards). Plus four plain wilds and four wild draw fours.

use super::card::{Card, Colour, Effect};
use crate::core::GameRng;

/// Cards in a standard deck.
pub const STANDARD_DECK_SIZE: usize = 108;

/// Build a fresh, unshuffled standard deck.
///
/// Order is fixed but not meaningful; callers shuffle before dealing.
///
/// ```
/// use rust_uno::cards::{build_standard_deck, STANDARD_DECK_SIZE};
///
/// assert_eq!(build_standard_deck().len(), STANDARD_DECK_SIZE);
/// ```
#[must_use]
pub fn build_standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(STANDARD_DECK_SIZE);

    for colour in Colour::ALL {
        for number in 0..=9 {
            deck.push(Card::numbered(colour, number));
            deck.push(Card::numbered(colour, number));
        }
        for effect in [Effect::PlusTwo, Effect::Skip, Effect::Reverse] {
            deck.push(Card::action(colour, effect));
            deck.push(Card::action(colour, effect));
        }
    }

    deck.extend(std::iter::repeat_with(Card::wild).take(4));
    deck.extend(std::iter::repeat_with(Card::wild_draw_four).take(4));

    deck
}

/// Shuffle cards in place.
pub fn shuffle(cards: &mut [Card], rng: &mut GameRng) {
    rng.shuffle(cards);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn count_where(deck: &[Card], pred: impl Fn(&Card) -> bool) -> usize {
        deck.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_composition() {
        let deck = build_standard_deck();
        assert_eq!(deck.len(), 108);

        for colour in Colour::ALL {
            assert_eq!(count_where(&deck, |c| c.colour() == Some(colour)), 26);
            for number in 0..=9 {
                assert_eq!(
                    count_where(&deck, |c| c.colour() == Some(colour) && c.number() == Some(number)),
                    2
                );
            }
            for effect in [Effect::PlusTwo, Effect::Skip, Effect::Reverse] {
                assert_eq!(
                    count_where(&deck, |c| c.colour() == Some(colour) && c.has(effect)),
                    2
                );
            }
        }

        assert_eq!(count_where(&deck, |c| *c == Card::wild()), 4);
        assert_eq!(count_where(&deck, |c| *c == Card::wild_draw_four()), 4);
    }

    #[test]
    fn test_every_build_is_identical() {
        assert_eq!(build_standard_deck(), build_standard_deck());
    }

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut deck = build_standard_deck();
        let mut rng = GameRng::new(42);
        shuffle(&mut deck, &mut rng);

        assert_ne!(deck, build_standard_deck());

        let tally = |cards: &[Card]| {
            let mut map: FxHashMap<Card, usize> = FxHashMap::default();
            for card in cards {
                *map.entry(card.clone()).or_default() += 1;
            }
            map
        };
        assert_eq!(tally(&deck), tally(&build_standard_deck()));
    }
}
