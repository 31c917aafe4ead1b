//! # uno-engine
//!
//! Server-side state engine for a multiplayer Uno-style card game.
//!
//! The engine owns every live game: the card catalog, per-game decks and
//! zones, seated players, turn order, and the lifecycle state machine.
//! Transports (HTTP, sockets) sit on top of [`engine::GameEngine`] and
//! never touch game state directly.
//!
//! ## Design Principles
//!
//! 1. **Authoritative State**: Card locations live only in the per-game
//!    [`zones::ZoneManager`]; clients see filtered snapshots, never the
//!    draw pile or another player's hand.
//!
//! 2. **Atomic Commands**: Every command either fully applies (including
//!    its durable commit) or leaves the game untouched. Mutations run on
//!    a clone that replaces the live table only after the commit.
//!
//! 3. **One Lock Per Game**: Games are independent; commands on
//!    different games never contend.
//!
//! ## Modules
//!
//! - `core`: ID types, error kinds, seeded RNG
//! - `cards`: the card catalog, deck factory, card instances
//! - `zones`: zone membership and ordering, atomic multi-card moves
//! - `game`: players, lifecycle, turn order, the table aggregate,
//!   per-viewer snapshots
//! - `rules`: the play-legality seam
//! - `engine`: the facade, per-game locking, persistence and
//!   notification seams

pub mod cards;
pub mod core;
pub mod engine;
pub mod game;
pub mod rules;
pub mod zones;

pub use crate::core::{
    CardId, DefId, EngineError, ErrorKind, GameId, GameRng, IdAllocator, PlayerId, UserId,
};

pub use crate::cards::{build_deck, CardCatalog, CardColor, CardDefinition, CardInstance, CardKind};

pub use crate::zones::{CardMove, Zone, ZoneManager, ZonePosition};

pub use crate::game::{
    CardView, Direction, GameOptions, GameSnapshot, GameTable, HandView, LeaveEffect,
    LifecycleState, PlayOutcome, Player, PlayerView, TurnOrder,
};

pub use crate::rules::{AnyCard, PlayRules};

pub use crate::engine::{
    GameEngine, GameListing, JoinOutcome, LeaveOutcome, NoopNotifier, NoopStore, Notifier,
    SeatListing, Store,
};
