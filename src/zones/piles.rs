//! Draw and discard piles.
//!
//! Both piles are ordered with the back of the `Vec` as the top: the next
//! card drawn is `draw.last()`, the visible face is `discard.last()`.
//!
//! ## Reshuffle
//!
//! When the draw pile runs dry, every discard except the visible top card
//! is shuffled into a fresh draw pile. If that leaves nothing to draw,
//! the draw fails with `GameError::OutOfCards`.

use tracing::debug;

use crate::cards::Card;
use crate::core::{GameError, GameRng, Result};

/// The shared piles of one session.
///
/// ```
/// use rust_uno::cards::{Card, Colour};
/// use rust_uno::core::GameRng;
/// use rust_uno::zones::Piles;
///
/// let mut rng = GameRng::new(1);
/// let mut piles = Piles::new(vec![Card::numbered(Colour::Red, 1), Card::numbered(Colour::Red, 2)]);
///
/// let card = piles.draw(&mut rng).unwrap();
/// piles.discard(card);
/// assert_eq!(piles.draw_len(), 1);
/// assert_eq!(piles.top_discard(), Some(&Card::numbered(Colour::Red, 2)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Piles {
    draw: Vec<Card>,
    discard: Vec<Card>,
}

impl Piles {
    /// Start with every card in the draw pile and an empty discard pile.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            draw: cards,
            discard: Vec::new(),
        }
    }

    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Cards across both piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    /// The visible face card.
    #[must_use]
    pub fn top_discard(&self) -> Option<&Card> {
        self.discard.last()
    }

    /// Draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    /// Discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    pub fn shuffle_draw(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw);
    }

    /// Take the top of the draw pile, reshuffling the discards if needed.
    pub fn draw(&mut self, rng: &mut GameRng) -> Result<Card> {
        if let Some(card) = self.draw.pop() {
            return Ok(card);
        }

        self.reshuffle(rng)?;
        self.draw.pop().ok_or(GameError::OutOfCards)
    }

    /// Draw `count` cards. Stops at the first failure; cards already drawn
    /// are returned alongside the error so the caller can keep them.
    pub fn draw_many(&mut self, count: usize, rng: &mut GameRng) -> (Vec<Card>, Option<GameError>) {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw(rng) {
                Ok(card) => drawn.push(card),
                Err(err) => return (drawn, Some(err)),
            }
        }
        (drawn, None)
    }

    /// Put a card on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    /// Move the top draw card onto the discard pile and return it.
    pub fn turn_up(&mut self, rng: &mut GameRng) -> Result<&Card> {
        let card = self.draw(rng)?;
        self.discard.push(card);
        self.discard.last().ok_or(GameError::OutOfCards)
    }

    /// Return cards (a departing hand) to the draw pile and shuffle it.
    pub fn return_to_draw(&mut self, cards: impl IntoIterator<Item = Card>, rng: &mut GameRng) {
        self.draw.extend(cards);
        rng.shuffle(&mut self.draw);
    }

    /// Pull a specific card out of the draw pile (test rigging).
    #[cfg(test)]
    pub(crate) fn take_matching(&mut self, card: &Card) -> Option<Card> {
        let index = self.draw.iter().position(|c| c == card)?;
        Some(self.draw.remove(index))
    }

    fn reshuffle(&mut self, rng: &mut GameRng) -> Result<()> {
        if self.discard.len() < 2 {
            return Err(GameError::OutOfCards);
        }

        let top = self.discard.len() - 1;
        let mut fresh: Vec<Card> = self.discard.drain(..top).collect();
        rng.shuffle(&mut fresh);
        fresh.append(&mut self.draw);
        self.draw = fresh;

        debug!(draw = self.draw.len(), "reshuffled discard pile into draw pile");
        Ok(())
    }
}
