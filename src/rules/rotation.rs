//! Turn rotation over a live seat list.
//!
//! The rotation is a seat index plus a direction. The seat list itself is
//! owned by the session; every query takes its current length, so joins
//! and departures never leave a stale cursor behind.

use serde::{Deserialize, Serialize};

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Increasing seat index.
    #[default]
    Clockwise,
    /// Decreasing seat index.
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Cursor into the seat list.
///
/// ```
/// use rust_uno::rules::Rotation;
///
/// let mut rotation = Rotation::new();
/// rotation.advance(3, 1);
/// assert_eq!(rotation.active(), 1);
///
/// rotation.reverse();
/// rotation.advance(3, 2);
/// assert_eq!(rotation.active(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    cursor: usize,
    direction: Direction,
}

impl Rotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat index of the active player.
    #[must_use]
    pub fn active(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Seat `steps` places after `from` in the current direction.
    #[must_use]
    pub fn seat_after(&self, from: usize, steps: usize, seats: usize) -> usize {
        if seats == 0 {
            return 0;
        }
        let steps = steps % seats;
        match self.direction {
            Direction::Clockwise => (from + steps) % seats,
            Direction::CounterClockwise => (from + seats - steps) % seats,
        }
    }

    /// Move the cursor `steps` places in the current direction.
    pub fn advance(&mut self, seats: usize, steps: usize) {
        self.cursor = self.seat_after(self.cursor, steps, seats);
    }

    /// Flip the direction of play. Seating order is untouched.
    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Point the cursor at a specific seat.
    pub fn set_active(&mut self, seat: usize) {
        self.cursor = seat;
    }

    /// Back to seat 0, clockwise.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fix the cursor after the seat at `removed` left.
    ///
    /// `seats` is the count after removal. If the active seat left, the
    /// turn passes to whoever followed it in the current direction.
    pub fn seat_removed(&mut self, removed: usize, seats: usize) {
        if seats == 0 {
            self.cursor = 0;
            return;
        }

        if removed < self.cursor {
            self.cursor -= 1;
        } else if removed == self.cursor {
            self.cursor = match self.direction {
                Direction::Clockwise => removed % seats,
                Direction::CounterClockwise => (removed + seats - 1) % seats,
            };
        }
    }
}
