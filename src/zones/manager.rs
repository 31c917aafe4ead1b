//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` tracks which zone each card instance occupies and at
//! what position, and performs movement between zones. It supports:
//! - Single moves with a from-zone precondition
//! - All-or-nothing batches (`move_many`) for the opening deal
//! - Reshuffle-on-empty (`recycle_discard`) when the draw pile runs dry
//!
//! Conservation invariant: every operation here moves cards, never creates
//! or destroys them, so the multiset of tracked instances is fixed between
//! deck build and game deletion.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::id::{CardId, PlayerId};
use crate::core::rng::GameRng;

/// A zone within one game.
///
/// The manager itself is per-game, so zones carry no game id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Face-down pile cards are drawn from.
    DrawPile,
    /// Face-up pile cards are played onto.
    DiscardPile,
    /// A specific player's hand.
    Hand(PlayerId),
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::DrawPile => write!(f, "draw pile"),
            Zone::DiscardPile => write!(f, "discard pile"),
            Zone::Hand(player) => write!(f, "hand of {player}"),
        }
    }
}

/// Position for inserting a card into a zone.
///
/// Index 0 is the bottom of a pile; the last index is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (default).
    Top,
    /// Add to bottom of zone.
    Bottom,
    /// Insert at a specific index (clamped to the zone size).
    Index(usize),
}

/// One step of a batch move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardMove {
    pub card: CardId,
    pub from: Zone,
    pub to: Zone,
    pub position: ZonePosition,
}

impl CardMove {
    /// A move placing the card on top of the destination.
    #[must_use]
    pub const fn to_top(card: CardId, from: Zone, to: Zone) -> Self {
        Self {
            card,
            from,
            to,
            position: ZonePosition::Top,
        }
    }
}

/// Manages card locations across one game's zones.
///
/// ## Usage
///
/// ```
/// use uno_engine::core::{CardId, GameRng};
/// use uno_engine::zones::{Zone, ZoneManager, ZonePosition};
///
/// let mut zones = ZoneManager::new();
/// zones.add(CardId::new(1), Zone::DrawPile);
/// zones.add(CardId::new(2), Zone::DrawPile);
///
/// let mut rng = GameRng::new(42);
/// zones.shuffle_zone(Zone::DrawPile, &mut rng);
/// assert_eq!(zones.zone_size(Zone::DrawPile), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: card id -> zone.
    locations: FxHashMap<CardId, Zone>,

    /// Per-zone ordering, bottom to top.
    order: FxHashMap<Zone, Vec<CardId>>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to a zone's top. Deck-build only.
    ///
    /// Panics if the card is already tracked - instances get fresh ids at
    /// build time, so a duplicate is a programmer error.
    pub fn add(&mut self, card: CardId, zone: Zone) {
        if self.locations.contains_key(&card) {
            panic!("{card} already exists in zone manager");
        }
        self.locations.insert(card, zone);
        self.order.entry(zone).or_default().push(card);
    }

    /// Move a card between zones.
    ///
    /// Precondition: the card is currently in `from` - otherwise
    /// `InvalidState` and nothing changes. Positions in both zones stay
    /// contiguous from 0.
    pub fn move_card(
        &mut self,
        card: CardId,
        from: Zone,
        to: Zone,
        position: ZonePosition,
    ) -> Result<(), EngineError> {
        match self.locations.get(&card) {
            Some(&zone) if zone == from => {}
            Some(&zone) => {
                return Err(EngineError::invalid_state(format!(
                    "{card} is in {zone}, not {from}"
                )));
            }
            None => {
                return Err(EngineError::invalid_argument(format!("unknown card {card}")));
            }
        }

        if let Some(order) = self.order.get_mut(&from) {
            order.retain(|&c| c != card);
        }

        self.locations.insert(card, to);

        let order = self.order.entry(to).or_default();
        match position {
            ZonePosition::Top => order.push(card),
            ZonePosition::Bottom => order.insert(0, card),
            ZonePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, card);
            }
        }

        Ok(())
    }

    /// Apply a batch of moves as a single atomic step.
    ///
    /// Either every move succeeds or none apply. Moves are validated in
    /// order against a scratch copy, so later moves may depend on earlier
    /// ones (the opening deal draws repeatedly from the draw pile).
    pub fn move_many(&mut self, moves: &[CardMove]) -> Result<(), EngineError> {
        let mut scratch = self.clone();
        for step in moves {
            scratch.move_card(step.card, step.from, step.to, step.position)?;
        }
        *self = scratch;
        Ok(())
    }

    /// Refill an empty draw pile from the discard pile.
    ///
    /// Moves every discard card except the current top into the draw pile
    /// and shuffles it; the discard keeps only its former top card.
    /// Returns the number of cards recycled.
    ///
    /// Fails with `ExhaustedResource` if the discard holds at most one
    /// card - there is nothing recoverable anywhere.
    pub fn recycle_discard(&mut self, rng: &mut GameRng) -> Result<usize, EngineError> {
        debug_assert_eq!(self.zone_size(Zone::DrawPile), 0);

        let discard = self.cards_in(Zone::DiscardPile);
        if discard.len() <= 1 {
            return Err(EngineError::exhausted(
                "draw pile is empty and the discard pile has no spare cards",
            ));
        }

        // Everything below the top card goes back to the draw pile.
        let top = discard[discard.len() - 1];
        let recycled: Vec<CardId> = discard[..discard.len() - 1].to_vec();
        let count = recycled.len();

        for &card in &recycled {
            self.locations.insert(card, Zone::DrawPile);
        }
        self.order.insert(Zone::DiscardPile, vec![top]);

        let draw = self.order.entry(Zone::DrawPile).or_default();
        *draw = recycled;
        rng.shuffle(draw);

        Ok(count)
    }

    /// Move the top draw-pile card into a player's hand, recycling the
    /// discard pile first if the draw pile is empty.
    ///
    /// Returns the drawn card.
    pub fn draw_into_hand(
        &mut self,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Result<CardId, EngineError> {
        if self.zone_size(Zone::DrawPile) == 0 {
            self.recycle_discard(rng)?;
        }

        let card = self
            .top_card(Zone::DrawPile)
            .ok_or_else(|| EngineError::exhausted("draw pile is empty"))?;
        self.move_card(card, Zone::DrawPile, Zone::Hand(player), ZonePosition::Top)?;
        Ok(card)
    }

    /// Shuffle a zone's ordering in place.
    pub fn shuffle_zone(&mut self, zone: Zone, rng: &mut GameRng) {
        if let Some(order) = self.order.get_mut(&zone) {
            rng.shuffle(order);
        }
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    /// Cards in a zone, bottom to top.
    #[must_use]
    pub fn cards_in(&self, zone: Zone) -> &[CardId] {
        self.order.get(&zone).map_or(&[], |v| v.as_slice())
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.order.get(&zone).map_or(0, Vec::len)
    }

    /// The top card of a zone.
    #[must_use]
    pub fn top_card(&self, zone: Zone) -> Option<CardId> {
        self.order.get(&zone)?.last().copied()
    }

    /// Total number of cards tracked, across all zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Check if the manager tracks a card.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }
}
