//! Zone system for card locations.
//!
//! A game has three zone families: the draw pile, the discard pile, and
//! one hand per seated player. Every card instance sits in exactly one
//! zone at an ordinal position; the `ZoneManager` is the only authority
//! on where a card is.
//!
//! ## Key Types
//!
//! - `Zone`: draw pile, discard pile, or a player's hand
//! - `ZoneManager`: card location tracking and atomic movement
//! - `ZonePosition`: position specifier for inserts
//! - `CardMove`: one step of an all-or-nothing batch

pub mod manager;

pub use manager::{CardMove, Zone, ZoneManager, ZonePosition};
