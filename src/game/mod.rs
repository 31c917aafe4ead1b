//! Per-game state: players, lifecycle, turn order, the table aggregate,
//! and the per-viewer snapshot projection.

pub mod lifecycle;
pub mod player;
pub mod snapshot;
pub mod table;
pub mod turn;

pub use lifecycle::LifecycleState;
pub use player::Player;
pub use snapshot::{CardView, GameSnapshot, HandView, PlayerView};
pub use table::{GameOptions, GameTable, LeaveEffect, PlayOutcome};
pub use turn::{Direction, TurnOrder};
