//! Play-legality rules.
//!
//! The table handles turn order, zone ownership, and lifecycle gating
//! itself; everything beyond that (color matching, action cards) lives
//! behind `PlayRules`. The engine core never interprets card content
//! directly.

use crate::cards::{CardDefinition, CardInstance};
use crate::core::error::EngineError;
use crate::core::id::PlayerId;
use crate::game::table::GameTable;

/// Decides whether a play is legal beyond turn and ownership checks,
/// which the table has already enforced by the time this runs.
pub trait PlayRules: Send + Sync {
    /// Accept or reject `player` playing `card` onto the discard pile.
    ///
    /// Rejections should carry `InvalidState` or `InvalidArgument` so the
    /// transport layer maps them sensibly.
    fn validate_play(
        &self,
        table: &GameTable,
        player: PlayerId,
        card: &CardInstance,
        definition: &CardDefinition,
    ) -> Result<(), EngineError>;
}

/// Permissive rules: any in-hand card may be played on your turn.
///
/// This mirrors what the original server shipped; match-the-top-card
/// rules slot in behind the same trait.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyCard;

impl PlayRules for AnyCard {
    fn validate_play(
        &self,
        _table: &GameTable,
        _player: PlayerId,
        _card: &CardInstance,
        _definition: &CardDefinition,
    ) -> Result<(), EngineError> {
        Ok(())
    }
}
