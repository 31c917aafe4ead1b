//! Turn order and direction of play.
//!
//! `TurnOrder` owns the seat sequence and the direction. Advancement
//! walks seats with wraparound, skipping eliminated players; reversal
//! exists for the rules module (reverse cards) even though the base
//! engine never flips direction itself.

use serde::{Deserialize, Serialize};

use crate::core::id::PlayerId;

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Seat sequence plus direction for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    /// Players in seat order; index = turn_index.
    seats: Vec<PlayerId>,
    direction: Direction,
}

impl Default for TurnOrder {
    fn default() -> Self {
        Self {
            seats: Vec::new(),
            direction: Direction::Clockwise,
        }
    }
}

impl TurnOrder {
    /// Create an empty turn order, clockwise.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player at the end of the order. Returns their seat index.
    pub fn push(&mut self, player: PlayerId) -> usize {
        self.seats.push(player);
        self.seats.len() - 1
    }

    /// Remove a player and compact the seats.
    ///
    /// Returns true if the player was seated.
    pub fn remove(&mut self, player: PlayerId) -> bool {
        let before = self.seats.len();
        self.seats.retain(|&p| p != player);
        self.seats.len() != before
    }

    /// Players in seat order.
    #[must_use]
    pub fn seats(&self) -> &[PlayerId] {
        &self.seats
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Check if nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// A player's seat index, if seated.
    #[must_use]
    pub fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|&p| p == player)
    }

    /// Current direction of play.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Flip the direction of play.
    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// The next player after `current`, respecting direction and skipping
    /// players for whom `is_eliminated` returns true.
    ///
    /// Returns `None` if `current` is not seated or every other seat is
    /// eliminated.
    pub fn next_after(
        &self,
        current: PlayerId,
        is_eliminated: impl Fn(PlayerId) -> bool,
    ) -> Option<PlayerId> {
        let start = self.seat_of(current)?;
        let n = self.seats.len();

        let mut seat = start;
        for _ in 0..n {
            seat = match self.direction {
                Direction::Clockwise => (seat + 1) % n,
                Direction::CounterClockwise => (seat + n - 1) % n,
            };
            let candidate = self.seats[seat];
            if !is_eliminated(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
