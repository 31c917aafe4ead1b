//! Game lifecycle states.
//!
//! `Lobby -> Active -> Finished`, with `Lobby` also terminal when a game
//! is abandoned before starting. The state gates which operations are
//! legal; transitions happen only inside `GameTable`.

use serde::{Deserialize, Serialize};

/// Coarse phase of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Accepting players; no cards dealt yet.
    Lobby,
    /// In play.
    Active,
    /// Over; terminal.
    Finished,
}

impl LifecycleState {
    /// Check if the game is still in its lobby.
    #[must_use]
    pub fn is_lobby(self) -> bool {
        matches!(self, LifecycleState::Lobby)
    }

    /// Check if the game is in play.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, LifecycleState::Active)
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, LifecycleState::Finished)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Lobby => write!(f, "lobby"),
            LifecycleState::Active => write!(f, "active"),
            LifecycleState::Finished => write!(f, "finished"),
        }
    }
}
