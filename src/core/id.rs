//! Identifier newtypes and allocation.
//!
//! Every row the engine manages (game, player, card instance) gets its own
//! id type so a `GameId` can never be passed where a `PlayerId` belongs.
//! Catalog definitions use a separate, smaller `DefId` because the catalog
//! is process-wide and finite while instance ids grow for the lifetime of
//! the server.
//!
//! Game, player, and card-instance ids come from a single `IdAllocator`
//! owned by the engine, so ids are unique across games.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identifier for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// Create a new game ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Identifier for an authenticated user.
///
/// Supplied by the identity collaborator; the engine never allocates these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Create a new user ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User({})", self.0)
    }
}

/// Unique identifier for a player (one per (user, game) pair).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Unique identifier for a card instance.
///
/// This identifies one physical card in one game, not the abstract
/// "Red 7" - that is a [`DefId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl CardId {
    /// Create a new card instance ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Identifier for a card definition in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefId(pub u32);

impl DefId {
    /// Create a new definition ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Def({})", self.0)
    }
}

/// Monotonic allocator for engine-owned ids.
///
/// Shared across all games; thread-safe. Ids start at 1 so that 0 can be
/// spotted as "never allocated" in logs and test fixtures.
#[derive(Debug)]
pub struct IdAllocator {
    next_game: AtomicU64,
    next_player: AtomicU64,
    next_card: AtomicU64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_game: AtomicU64::new(1),
            next_player: AtomicU64::new(1),
            next_card: AtomicU64::new(1),
        }
    }
}

impl IdAllocator {
    /// Create a new allocator starting at 1 for every id space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next game ID.
    pub fn next_game(&self) -> GameId {
        GameId(self.next_game.fetch_add(1, Ordering::Relaxed))
    }

    /// Allocate the next player ID.
    pub fn next_player(&self) -> PlayerId {
        PlayerId(self.next_player.fetch_add(1, Ordering::Relaxed))
    }

    /// Allocate the next card instance ID.
    pub fn next_card(&self) -> CardId {
        CardId(self.next_card.fetch_add(1, Ordering::Relaxed))
    }
}
