//! Player rows.
//!
//! A `Player` exists for exactly one (user, game) pair, created on join
//! and destroyed when the player leaves or the game is deleted.

use serde::{Deserialize, Serialize};

use crate::core::id::{GameId, PlayerId, UserId};

/// A seated player in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player row.
    pub id: PlayerId,

    /// The authenticated user behind this player.
    pub user: UserId,

    /// The game this player is seated at.
    pub game: GameId,

    /// Name shown to other players.
    pub display_name: String,

    /// Whether this player hosts the game.
    pub is_host: bool,

    /// Seat position in turn order, compacted from 0.
    pub turn_index: usize,

    /// Rounds won.
    pub wins: u32,

    /// Rounds lost.
    pub losses: u32,

    /// Skipped by turn advancement once set.
    pub eliminated: bool,
}

impl Player {
    /// Create a freshly seated player with zeroed counters.
    #[must_use]
    pub fn new(
        id: PlayerId,
        user: UserId,
        game: GameId,
        display_name: impl Into<String>,
        is_host: bool,
        turn_index: usize,
    ) -> Self {
        Self {
            id,
            user,
            game,
            display_name: display_name.into(),
            is_host,
            turn_index,
            wins: 0,
            losses: 0,
            eliminated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new(
            PlayerId::new(1),
            UserId::new(10),
            GameId::new(5),
            "alice",
            true,
            0,
        );

        assert_eq!(player.display_name, "alice");
        assert!(player.is_host);
        assert_eq!(player.turn_index, 0);
        assert_eq!(player.wins, 0);
        assert_eq!(player.losses, 0);
        assert!(!player.eliminated);
    }
}
