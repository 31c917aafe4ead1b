//! Card instances - physical cards in a game.
//!
//! A `CardInstance` is one printed card belonging to exactly one game.
//! Which zone it sits in is tracked solely by the `ZoneManager`, so
//! location can never disagree with the zone index.

use serde::{Deserialize, Serialize};

use crate::core::id::{CardId, DefId, GameId};

/// One physical card in one game.
///
/// Created at deck-build time, destroyed with the game. Never shared
/// across games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this instance.
    pub id: CardId,

    /// The definition this card was printed from.
    pub def: DefId,

    /// The game this card belongs to.
    pub game: GameId,
}

impl CardInstance {
    /// Create a card instance.
    #[must_use]
    pub const fn new(id: CardId, def: DefId, game: GameId) -> Self {
        Self { id, def, game }
    }
}
