//! The per-game state machine.
//!
//! ## Lifecycle
//!
//! `Forming` → `InProgress` → `Finished`. Players may join while forming
//! or mid-game, and may leave at any time. A session with nobody left is
//! finished; the registry tears it down.
//!
//! ## Card conservation
//!
//! Cards are built once and only move between the draw pile, hands and
//! the discard pile, so hands plus both piles always hold 108 cards.

use tracing::{debug, info, warn};

use super::outcome::{Departure, MoveOutcome, MoveStatus, SessionPhase};
use super::player::Player;
use super::view::{OpponentView, PlayerView};
use crate::cards::{build_standard_deck, Card, Colour, Effect};
use crate::core::{ConnectionId, GameError, GameRng, InvalidPlayPolicy, Result, SessionConfig};
use crate::rules::{Direction, Face, Rotation};
use crate::zones::Piles;

/// One game instance from formation to finish.
///
/// All mutation goes through `&mut self`; callers that share a session
/// between connections wrap it in a lock (see `registry::SessionHandle`).
#[derive(Clone, Debug)]
pub struct Session {
    id: String,
    config: SessionConfig,
    rng: GameRng,
    piles: Piles,
    /// Seating order; rotation indexes into this.
    players: Vec<Player>,
    rotation: Rotation,
    /// `None` until the first card is turned up.
    face: Option<Face>,
    pending_draw: usize,
    phase: SessionPhase,
    /// Identities in the order they emptied their hands.
    standings: Vec<String>,
}

impl Session {
    /// Create an empty session with a fresh deck.
    #[must_use]
    pub fn new(id: impl Into<String>, config: SessionConfig) -> Self {
        let rng = GameRng::from_seed_or_entropy(config.seed);
        Self::with_rng(id, config, rng)
    }

    /// Create an empty session drawing randomness from `rng`.
    #[must_use]
    pub fn with_rng(id: impl Into<String>, config: SessionConfig, rng: GameRng) -> Self {
        Self {
            id: id.into(),
            config,
            rng,
            piles: Piles::new(build_standard_deck()),
            players: Vec::new(),
            rotation: Rotation::new(),
            face: None,
            pending_draw: 0,
            phase: SessionPhase::Forming,
            standings: Vec::new(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.phase == SessionPhase::InProgress
    }

    /// Players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, identity: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.identity() == identity)
    }

    #[must_use]
    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host())
    }

    /// The player whose turn it is. `None` unless in progress.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        if self.is_in_progress() {
            self.players.get(self.rotation.active())
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_active(&self, identity: &str) -> bool {
        self.active_player().is_some_and(|p| p.identity() == identity)
    }

    #[must_use]
    pub fn face(&self) -> Option<&Face> {
        self.face.as_ref()
    }

    #[must_use]
    pub fn pending_draw_count(&self) -> usize {
        self.pending_draw
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.rotation.direction()
    }

    #[must_use]
    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    #[must_use]
    pub fn standings(&self) -> &[String] {
        &self.standings
    }

    /// Cards across all hands and both piles.
    #[must_use]
    pub fn card_total(&self) -> usize {
        self.players.iter().map(Player::hand_size).sum::<usize>() + self.piles.total()
    }

    /// Connections of every seated player, in seating order.
    #[must_use]
    pub fn connections(&self) -> Vec<ConnectionId> {
        self.players.iter().map(Player::connection).collect()
    }

    // === Roster ===

    /// Seat a new player at the end of the rotation.
    ///
    /// The first player seated becomes host. Players joining mid-game are
    /// dealt a starting hand when `deal_late_joiners` is set.
    pub fn add_player(&mut self, identity: impl Into<String>, connection: ConnectionId) -> Result<()> {
        if self.phase == SessionPhase::Finished {
            return Err(GameError::SessionFinished);
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::SessionFull { max: self.config.max_players });
        }

        let mut player = Player::new(identity, connection);
        if self.host().is_none() {
            player.set_host(true);
        }

        if self.is_in_progress() && self.config.deal_late_joiners {
            let (cards, err) = self.piles.draw_many(self.config.starting_hand_size, &mut self.rng);
            player.give_all(cards);
            if let Some(err) = err {
                warn!(session = %self.id, player = player.identity(), error = %err, "late joiner dealt a short hand");
            }
        }

        info!(session = %self.id, player = player.identity(), seats = self.players.len() + 1, "player joined");
        self.players.push(player);
        Ok(())
    }

    /// Remove a player, returning their hand to the draw pile.
    ///
    /// If the host leaves, the first remaining player takes over. If the
    /// active player leaves, the turn passes on in the current direction.
    pub fn remove_player(&mut self, identity: &str) -> Result<Departure> {
        let seat = self.seat_of(identity)?;
        let was_active = self.is_in_progress() && seat == self.rotation.active();

        let mut player = self.players.remove(seat);
        let hand = player.take_hand();
        if !hand.is_empty() {
            self.piles.return_to_draw(hand, &mut self.rng);
        }
        self.rotation.seat_removed(seat, self.players.len());

        let new_host = if player.is_host() {
            self.players.first_mut().map(|next| {
                next.set_host(true);
                next.identity().to_string()
            })
        } else {
            None
        };

        if self.players.is_empty() || (self.is_in_progress() && self.players.len() < 2) {
            self.finish();
        } else if was_active {
            self.begin_turn();
        }

        info!(session = %self.id, player = identity, remaining = self.players.len(), "player left");
        Ok(Departure {
            identity: player.identity().to_string(),
            connection: player.connection(),
            new_host,
            remaining: self.players.len(),
        })
    }

    // === Game flow ===

    /// Start the game on behalf of `identity`, who must be host.
    pub fn start_by(&mut self, identity: &str) -> Result<()> {
        let seat = self.seat_of(identity)?;
        if !self.players[seat].is_host() {
            return Err(GameError::NotHost);
        }
        self.start()
    }

    /// Shuffle, deal, turn up the first face, hand the turn to seat 0.
    pub fn start(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Forming => {}
            SessionPhase::InProgress => return Err(GameError::AlreadyStarted),
            SessionPhase::Finished => return Err(GameError::SessionFinished),
        }

        let present = self.players.len();
        if present == 0 {
            return Err(GameError::EmptySession);
        }
        if present < self.config.min_players_to_start {
            return Err(GameError::NotEnoughPlayers {
                required: self.config.min_players_to_start,
                present,
            });
        }
        if present * self.config.starting_hand_size + 1 > self.piles.total() {
            return Err(GameError::OutOfCards);
        }

        self.piles.shuffle_draw(&mut self.rng);
        for player in &mut self.players {
            for _ in 0..self.config.starting_hand_size {
                player.give(self.piles.draw(&mut self.rng)?);
            }
            player.set_drawn(false);
        }

        let face = Face::from_card(self.piles.turn_up(&mut self.rng)?);
        self.face = Some(face);
        self.pending_draw = 0;
        self.rotation.reset();
        self.standings.clear();
        self.phase = SessionPhase::InProgress;

        info!(session = %self.id, players = present, "game started");
        Ok(())
    }

    /// Take the top card of the draw pile, reshuffling discards if needed.
    ///
    /// The card leaves the piles; the caller must put it in a hand.
    pub fn draw_card(&mut self) -> Result<Card> {
        self.piles.draw(&mut self.rng)
    }

    /// The active player draws their one card for the turn.
    pub fn draw_for_turn(&mut self, identity: &str) -> Result<Card> {
        self.ensure_in_progress()?;
        let seat = self.ensure_turn(identity)?;
        if self.players[seat].has_drawn_this_turn() {
            return Err(GameError::AlreadyDrawn);
        }

        let card = self.draw_card()?;
        let player = &mut self.players[seat];
        player.give(card.clone());
        player.set_drawn(true);

        debug!(session = %self.id, player = identity, "drew for turn");
        Ok(card)
    }

    /// Pass the turn after drawing instead of playing.
    pub fn end_turn_after_draw(&mut self, identity: &str) -> Result<()> {
        self.ensure_in_progress()?;
        let seat = self.ensure_turn(identity)?;
        if !self.players[seat].has_drawn_this_turn() {
            return Err(GameError::MustDrawFirst);
        }

        self.players[seat].set_drawn(false);
        self.rotation.advance(self.players.len(), 1);
        self.begin_turn();

        debug!(session = %self.id, player = identity, "ended turn after drawing");
        Ok(())
    }

    /// Play the card at `card_index` from the active player's hand.
    ///
    /// Request-shape problems (not started, out of turn, bad index,
    /// missing colour for a wild) are rejected before anything changes.
    /// An illegal card is handled per `SessionConfig::invalid_play`.
    ///
    /// Effects resolve on the played card: +2 and +4 add to the pending
    /// draw count; any other card makes its player draw the whole pending
    /// count. Skip passes over one seat, reverse flips the direction
    /// around the mover, colour change sets the face colour.
    pub fn apply_move(
        &mut self,
        identity: &str,
        card_index: usize,
        uno_called: bool,
        colour_change_to: Option<Colour>,
    ) -> Result<MoveOutcome> {
        self.ensure_in_progress()?;
        let seat = self.ensure_turn(identity)?;
        let seats = self.players.len();

        let hand = self.players[seat].hand();
        let card = hand.get(card_index).ok_or(GameError::CardIndexOutOfRange {
            index: card_index,
            hand_size: hand.len(),
        })?;
        let chosen = if card.is_wild() {
            Some(colour_change_to.ok_or(GameError::MissingColourChoice)?)
        } else {
            None
        };
        let legal = self.face.as_ref().ok_or(GameError::NotStarted)?.accepts(card);

        if !legal && self.config.invalid_play == InvalidPlayPolicy::Reject {
            debug!(session = %self.id, player = identity, %card, "rejected illegal card");
            return Err(GameError::InvalidCard);
        }

        self.rotation.advance(seats, 1);
        let card = self.players[seat].take(card_index);
        self.piles.discard(card.clone());
        self.players[seat].set_drawn(false);

        if !legal {
            self.begin_turn();
            debug!(session = %self.id, player = identity, %card, "illegal card forfeited");
            return Ok(self.outcome(identity, card, MoveStatus::InvalidCard, 0));
        }

        let mut face = Face::from_card(&card);
        let mut owed = 0;
        if card.effects().iter().any(|e| e.is_stacking()) {
            self.pending_draw += if card.has(Effect::PlusFour) { 4 } else { 2 };
        } else {
            owed = std::mem::take(&mut self.pending_draw);
        }

        if card.has(Effect::Reverse) {
            self.rotation.reverse();
        }
        let steps = if card.has(Effect::Skip) { 2 } else { 1 };
        let next = self.rotation.seat_after(seat, steps, seats);
        self.rotation.set_active(next);

        if let Some(colour) = chosen {
            face.colour = Some(colour);
        }
        self.face = Some(face);
        self.begin_turn();

        debug!(session = %self.id, player = identity, %card, pending = self.pending_draw, "card played");

        let mut cards_drawn = 0;
        if owed > 0 {
            cards_drawn += self.deal_to(seat, owed)?;
        }

        if !uno_called && self.players[seat].hand_size() == 1 {
            cards_drawn += self.deal_to(seat, self.config.uncalled_uno_penalty)?;
            info!(session = %self.id, player = identity, "uncalled uno penalised");
            return Ok(self.outcome(identity, card, MoveStatus::UncalledUno, cards_drawn));
        }

        if self.players[seat].hand_size() == 0 {
            self.standings.push(identity.to_string());
            let departure = self.remove_player(identity)?;
            info!(session = %self.id, winner = identity, "player won");
            let status = MoveStatus::Win { winner: identity.to_string() };
            let mut outcome = self.outcome(identity, card, status, cards_drawn);
            outcome.new_host = departure.new_host;
            return Ok(outcome);
        }

        Ok(self.outcome(identity, card, MoveStatus::Played, cards_drawn))
    }

    // === Views ===

    /// Snapshot of the session as `identity` may see it.
    pub fn view_for(&self, identity: &str) -> Result<PlayerView> {
        let seat = self.seat_of(identity)?;
        let me = &self.players[seat];
        let active = self.active_player().map(|p| p.identity().to_string());

        Ok(PlayerView {
            session_id: self.id.clone(),
            identity: me.identity().to_string(),
            phase: self.phase,
            is_host: me.is_host(),
            hand: me.hand().to_vec(),
            face: self.face.clone(),
            is_turn: active.as_deref() == Some(me.identity()),
            active_player: active,
            direction: self.rotation.direction(),
            pending_draw: self.pending_draw,
            draw_pile: self.piles.draw_len(),
            opponents: self
                .players
                .iter()
                .filter(|p| p.identity() != identity)
                .map(|p| OpponentView {
                    identity: p.identity().to_string(),
                    is_host: p.is_host(),
                    hand_size: p.hand_size(),
                })
                .collect(),
        })
    }

    /// One view per seated player, addressed by connection.
    #[must_use]
    pub fn views(&self) -> Vec<(ConnectionId, PlayerView)> {
        self.players
            .iter()
            .filter_map(|p| self.view_for(p.identity()).ok().map(|v| (p.connection(), v)))
            .collect()
    }

    // === Internals ===

    fn seat_of(&self, identity: &str) -> Result<usize> {
        self.players
            .iter()
            .position(|p| p.identity() == identity)
            .ok_or_else(|| GameError::PlayerNotFound(identity.to_string()))
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.phase {
            SessionPhase::InProgress => Ok(()),
            SessionPhase::Forming => Err(GameError::NotStarted),
            SessionPhase::Finished => Err(GameError::SessionFinished),
        }
    }

    fn ensure_turn(&self, identity: &str) -> Result<usize> {
        let seat = self.seat_of(identity)?;
        if seat != self.rotation.active() {
            return Err(GameError::OutOfTurn(identity.to_string()));
        }
        Ok(seat)
    }

    /// Clear the draw flag of whoever now holds the turn.
    fn begin_turn(&mut self) {
        if let Some(player) = self.players.get_mut(self.rotation.active()) {
            player.set_drawn(false);
        }
    }

    /// Draw `count` cards into the hand at `seat`. Cards drawn before a
    /// failure stay in the hand.
    fn deal_to(&mut self, seat: usize, count: usize) -> Result<usize> {
        let (cards, err) = self.piles.draw_many(count, &mut self.rng);
        let drawn = cards.len();
        self.players[seat].give_all(cards);
        match err {
            Some(err) => {
                warn!(session = %self.id, owed = count, drawn, "ran out of cards mid-penalty");
                Err(err)
            }
            None => Ok(drawn),
        }
    }

    fn finish(&mut self) {
        self.phase = SessionPhase::Finished;
        info!(session = %self.id, standings = ?self.standings, "game finished");
    }

    fn outcome(&self, actor: &str, card: Card, status: MoveStatus, cards_drawn: usize) -> MoveOutcome {
        MoveOutcome {
            actor: actor.to_string(),
            card,
            status,
            face: self.face.clone().unwrap_or_default(),
            next_player: self.active_player().map(|p| p.identity().to_string()),
            direction: self.rotation.direction(),
            pending_draw: self.pending_draw,
            cards_drawn,
            new_host: None,
        }
    }
}

#[cfg(test)]
impl Session {
    /// Move specific cards from the draw pile into the hand at `seat`.
    pub(crate) fn rig_hand(&mut self, seat: usize, cards: &[Card]) {
        for card in cards {
            let card = self.piles.take_matching(card).expect("card in draw pile");
            self.players[seat].give(card);
        }
    }

    pub(crate) fn rig_face(&mut self, card: &Card) {
        self.face = Some(Face::from_card(card));
    }

    pub(crate) fn rig_pending_draw(&mut self, count: usize) {
        self.pending_draw = count;
    }
}
