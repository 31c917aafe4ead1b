//! The single-game aggregate.
//!
//! `GameTable` owns everything one game consists of: the game row, its
//! players, its card instances, the zone index, and the RNG. All lifecycle
//! transitions and turn-gated card operations go through it. The table
//! never locks anything itself - the engine facade serializes access
//! per game.

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::cards::{build_deck, CardCatalog, CardInstance};
use crate::core::error::EngineError;
use crate::core::id::{CardId, GameId, IdAllocator, PlayerId, UserId};
use crate::core::rng::GameRng;
use crate::game::lifecycle::LifecycleState;
use crate::game::player::Player;
use crate::game::turn::{Direction, TurnOrder};
use crate::rules::PlayRules;
use crate::zones::{CardMove, Zone, ZoneManager, ZonePosition};

/// Options for creating a game.
#[derive(Clone, Debug)]
pub struct GameOptions {
    /// Copies of the catalog in the deck. The original server always
    /// built two.
    pub deck_multiplier: u32,

    /// Cards dealt to each player at start.
    pub hand_size: usize,

    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            deck_multiplier: 2,
            hand_size: 7,
            seed: None,
        }
    }
}

impl GameOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deck multiplier.
    #[must_use]
    pub fn deck_multiplier(mut self, multiplier: u32) -> Self {
        self.deck_multiplier = multiplier;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Fix the RNG seed (deterministic shuffles, for tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// What leaving a game did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaveEffect {
    /// The host left: the game and everything it owns goes away.
    /// The caller (engine facade) performs the actual deletion.
    GameDeleted,
    /// A non-host player left; the game continues.
    PlayerRemoved { player: PlayerId },
}

/// What playing a card did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Card accepted, turn advanced.
    Continued,
    /// Card accepted and it was the player's last: game finished.
    Won(PlayerId),
}

/// One game: players, cards, zones, turn state.
#[derive(Clone, Debug)]
pub struct GameTable {
    id: GameId,
    state: LifecycleState,
    host: PlayerId,
    current_turn: Option<PlayerId>,
    winner: Option<PlayerId>,
    players: FxHashMap<PlayerId, Player>,
    order: TurnOrder,
    cards: FxHashMap<CardId, CardInstance>,
    zones: ZoneManager,
    rng: GameRng,
    options: GameOptions,
}

impl GameTable {
    /// Create a game in the lobby state.
    ///
    /// The creating user becomes the host and the first seat. The full
    /// deck (catalog x multiplier) is built and shuffled into the draw
    /// pile. Fails with `InvalidArgument` on a zero multiplier.
    pub fn create(
        catalog: &CardCatalog,
        ids: &IdAllocator,
        host_user: UserId,
        display_name: impl Into<String>,
        options: GameOptions,
    ) -> Result<Self, EngineError> {
        let game = ids.next_game();
        let mut rng = match options.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let deck = build_deck(catalog, game, options.deck_multiplier, ids)?;
        let mut zones = ZoneManager::new();
        let mut cards = FxHashMap::default();
        for card in deck {
            zones.add(card.id, Zone::DrawPile);
            cards.insert(card.id, card);
        }
        zones.shuffle_zone(Zone::DrawPile, &mut rng);

        let host = ids.next_player();
        let mut order = TurnOrder::new();
        let seat = order.push(host);
        let mut players = FxHashMap::default();
        players.insert(
            host,
            Player::new(host, host_user, game, display_name, true, seat),
        );

        info!(
            game = game.raw(),
            host = host.raw(),
            seed = rng.seed(),
            cards = cards.len(),
            "game created"
        );

        Ok(Self {
            id: game,
            state: LifecycleState::Lobby,
            host,
            current_turn: None,
            winner: None,
            players,
            order,
            cards,
            zones,
            rng,
            options,
        })
    }

    // === Accessors ===

    /// This game's ID.
    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The host player.
    #[must_use]
    pub fn host(&self) -> PlayerId {
        self.host
    }

    /// Whose turn it is, once the game is active.
    #[must_use]
    pub fn current_turn(&self) -> Option<PlayerId> {
        self.current_turn
    }

    /// The winner, once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Direction of play.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.order.direction()
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(&player)
    }

    /// Get a player by the user behind them.
    #[must_use]
    pub fn player_by_user(&self, user: UserId) -> Option<&Player> {
        self.players.values().find(|p| p.user == user)
    }

    /// Players in seat order.
    pub fn players_in_order(&self) -> impl Iterator<Item = &Player> {
        self.order.seats().iter().map(move |p| &self.players[p])
    }

    /// Get a card instance by ID.
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&CardInstance> {
        self.cards.get(&card)
    }

    /// The zone index.
    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    /// A player's hand, bottom to top.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[CardId] {
        self.zones.cards_in(Zone::Hand(player))
    }

    // === Lifecycle operations ===

    /// Seat a user in this lobby.
    ///
    /// Fails with `InvalidState` outside the lobby and `AlreadyExists`
    /// if the user is already seated.
    pub fn join(
        &mut self,
        ids: &IdAllocator,
        user: UserId,
        display_name: impl Into<String>,
    ) -> Result<PlayerId, EngineError> {
        if !self.state.is_lobby() {
            return Err(EngineError::invalid_state(format!(
                "{} is {}, joining is only possible in the lobby",
                self.id, self.state
            )));
        }
        if let Some(existing) = self.player_by_user(user) {
            return Err(EngineError::already_exists(format!(
                "{user} is already seated in {} as {}",
                self.id, existing.id
            )));
        }

        let player = ids.next_player();
        let seat = self.order.push(player);
        self.players.insert(
            player,
            Player::new(player, user, self.id, display_name, false, seat),
        );

        info!(game = self.id.raw(), player = player.raw(), seat, "player joined");
        Ok(player)
    }

    /// Remove a user's player from the game.
    ///
    /// The host leaving tears the whole game down (the engine facade does
    /// the deletion; host transfer is not a thing the original server
    /// actually implemented). A non-host leaver's hand goes to the discard
    /// pile so no card is lost, their seat is compacted away, and the turn
    /// pointer moves on if it was theirs.
    pub fn leave(&mut self, user: UserId) -> Result<LeaveEffect, EngineError> {
        if self.state.is_finished() {
            return Err(EngineError::invalid_state(format!(
                "{} is finished",
                self.id
            )));
        }
        let player = self
            .player_by_user(user)
            .ok_or_else(|| {
                EngineError::not_found(format!("no player for {user} in {}", self.id))
            })?
            .id;

        if player == self.host {
            info!(game = self.id.raw(), player = player.raw(), "host left, deleting game");
            return Ok(LeaveEffect::GameDeleted);
        }

        // Hand back to the discard pile first: conservation holds even
        // while the player row is going away.
        let hand: Vec<CardId> = self.hand(player).to_vec();
        for card in hand {
            self.zones
                .move_card(card, Zone::Hand(player), Zone::DiscardPile, ZonePosition::Top)?;
        }

        if self.current_turn == Some(player) {
            let players = &self.players;
            self.current_turn = self.order.next_after(player, |p| {
                p == player || players.get(&p).map_or(true, |pl| pl.eliminated)
            });
        }

        self.order.remove(player);
        self.players.remove(&player);
        self.reindex_seats();

        info!(game = self.id.raw(), player = player.raw(), "player left");
        Ok(LeaveEffect::PlayerRemoved { player })
    }

    /// Start the game.
    ///
    /// Host only, lobby only, at least two players. Deals the opening
    /// hands round-robin as one atomic batch and hands the first turn to
    /// the host.
    pub fn start(&mut self, user: UserId) -> Result<(), EngineError> {
        let caller = self
            .player_by_user(user)
            .ok_or_else(|| {
                EngineError::not_found(format!("no player for {user} in {}", self.id))
            })?;
        if !caller.is_host {
            return Err(EngineError::not_authorized(format!(
                "{} is not the host of {}",
                caller.id, self.id
            )));
        }
        if !self.state.is_lobby() {
            return Err(EngineError::invalid_state(format!(
                "{} is already {}",
                self.id, self.state
            )));
        }
        if self.order.len() < 2 {
            return Err(EngineError::invalid_state(format!(
                "{} needs at least 2 players to start, has {}",
                self.id,
                self.order.len()
            )));
        }

        let per_hand = self.options.hand_size;
        let draw = self.zones.cards_in(Zone::DrawPile);
        let needed = per_hand * self.order.len();
        if draw.len() < needed {
            return Err(EngineError::invalid_state(format!(
                "{} cannot deal {needed} cards from a draw pile of {}",
                self.id,
                draw.len()
            )));
        }

        // Round-robin deal off the top of the draw pile.
        let mut moves = Vec::with_capacity(needed);
        let mut top = draw.len();
        for _ in 0..per_hand {
            for &seat in self.order.seats() {
                top -= 1;
                moves.push(CardMove::to_top(draw[top], Zone::DrawPile, Zone::Hand(seat)));
            }
        }
        self.zones.move_many(&moves)?;

        self.state = LifecycleState::Active;
        self.current_turn = Some(self.host);

        info!(
            game = self.id.raw(),
            players = self.order.len(),
            hand_size = per_hand,
            "game started"
        );
        Ok(())
    }

    // === Turn operations ===

    /// Draw one card from the draw pile into the caller's hand.
    ///
    /// Only the current-turn player may draw; an empty draw pile is
    /// refilled from the discard (minus its top) first. Drawing does not
    /// advance the turn.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<CardId, EngineError> {
        self.check_turn(player)?;

        let card = self.zones.draw_into_hand(player, &mut self.rng)?;
        debug!(game = self.id.raw(), player = player.raw(), card = card.raw(), "card drawn");
        Ok(card)
    }

    /// Play a card from the caller's hand onto the discard pile.
    ///
    /// Legality beyond turn/zone ownership is delegated to `rules`. An
    /// emptied hand wins: the game finishes, counters update, and the
    /// turn pointer clears. Otherwise the turn advances.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card: CardId,
        rules: &dyn PlayRules,
        catalog: &CardCatalog,
    ) -> Result<PlayOutcome, EngineError> {
        self.check_turn(player)?;

        let instance = *self
            .cards
            .get(&card)
            .ok_or_else(|| EngineError::invalid_argument(format!("unknown card {card}")))?;
        if self.zones.zone_of(card) != Some(Zone::Hand(player)) {
            return Err(EngineError::invalid_state(format!(
                "{card} is not in the hand of {player}"
            )));
        }
        let def = catalog.get(instance.def).ok_or_else(|| {
            EngineError::invalid_argument(format!("{card} references unknown {}", instance.def))
        })?;

        rules.validate_play(self, player, &instance, def)?;

        self.zones
            .move_card(card, Zone::Hand(player), Zone::DiscardPile, ZonePosition::Top)?;
        debug!(game = self.id.raw(), player = player.raw(), card = card.raw(), "card played");

        if self.zones.zone_size(Zone::Hand(player)) == 0 {
            self.state = LifecycleState::Finished;
            self.winner = Some(player);
            self.current_turn = None;
            for p in self.players.values_mut() {
                if p.id == player {
                    p.wins += 1;
                } else {
                    p.losses += 1;
                }
            }
            info!(game = self.id.raw(), winner = player.raw(), "game finished");
            return Ok(PlayOutcome::Won(player));
        }

        self.advance_turn();
        Ok(PlayOutcome::Continued)
    }

    // === Internals ===

    fn check_turn(&self, player: PlayerId) -> Result<(), EngineError> {
        if !self.state.is_active() {
            return Err(EngineError::invalid_state(format!(
                "{} is {}, not active",
                self.id, self.state
            )));
        }
        if !self.players.contains_key(&player) {
            return Err(EngineError::not_found(format!(
                "{player} is not in {}",
                self.id
            )));
        }
        if self.current_turn != Some(player) {
            warn!(
                game = self.id.raw(),
                player = player.raw(),
                "rejected out-of-turn action"
            );
            return Err(EngineError::not_authorized(format!(
                "{player} is acting out of turn in {}",
                self.id
            )));
        }
        Ok(())
    }

    fn advance_turn(&mut self) {
        if let Some(current) = self.current_turn {
            let players = &self.players;
            self.current_turn = self
                .order
                .next_after(current, |p| players.get(&p).map_or(true, |pl| pl.eliminated));
        }
    }

    fn reindex_seats(&mut self) {
        let seats: Vec<PlayerId> = self.order.seats().to_vec();
        for (index, player) in seats.into_iter().enumerate() {
            if let Some(row) = self.players.get_mut(&player) {
                row.turn_index = index;
            }
        }
    }
}
