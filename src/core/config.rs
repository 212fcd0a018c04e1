//! Session and registry configuration.
//!
//! Defaults reproduce the standard table rules: four seats, thirteen-card
//! hands, a seven-card penalty for a missed terminal call. Every field can
//! be overridden from a config file through serde or with the `with_*`
//! builders.

use serde::{Deserialize, Serialize};

/// What happens when a player submits a card that does not match the face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPlayPolicy {
    /// Validate before mutating: the card stays in hand, the turn does not
    /// pass, and the mover receives `GameError::InvalidCard`.
    #[default]
    Reject,
    /// Legacy table behaviour: the card is discarded and the turn passes
    /// before the check, and the move reports `MoveStatus::InvalidCard`.
    Forfeit,
}

/// Per-session rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seats at the table.
    pub max_players: usize,

    /// Players required before the host may start.
    pub min_players_to_start: usize,

    /// Cards dealt to each player at start.
    pub starting_hand_size: usize,

    /// Cards drawn by a player who reaches one card without calling it.
    pub uncalled_uno_penalty: usize,

    /// Handling of plays that fail the legality check.
    pub invalid_play: InvalidPlayPolicy,

    /// Deal a full hand to players who join after the start.
    pub deal_late_joiners: bool,

    /// Shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_players: 4,
            min_players_to_start: 2,
            starting_hand_size: 13,
            uncalled_uno_penalty: 7,
            invalid_play: InvalidPlayPolicy::Reject,
            deal_late_joiners: true,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_min_players_to_start(mut self, min: usize) -> Self {
        self.min_players_to_start = min;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_uncalled_uno_penalty(mut self, cards: usize) -> Self {
        self.uncalled_uno_penalty = cards;
        self
    }

    #[must_use]
    pub fn with_invalid_play(mut self, policy: InvalidPlayPolicy) -> Self {
        self.invalid_play = policy;
        self
    }

    #[must_use]
    pub fn with_deal_late_joiners(mut self, deal: bool) -> Self {
        self.deal_late_joiners = deal;
        self
    }

    /// Fix the shuffle seed (tests, replays).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Registry-wide configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Rules applied to every session the registry creates.
    pub session: SessionConfig,

    /// Seed for identifiers, discriminators and per-session shuffle streams.
    /// When set, it overrides `session.seed`.
    pub seed: Option<u64>,
}

impl RegistryConfig {
    #[must_use]
    pub fn new(session: SessionConfig) -> Self {
        Self { session, seed: None }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
