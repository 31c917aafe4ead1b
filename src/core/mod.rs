//! Core engine types: identifiers, errors, RNG.
//!
//! This module contains the fundamental building blocks shared by every
//! layer above it. Nothing here knows what a "draw pile" or a "lobby" is.

pub mod error;
pub mod id;
pub mod rng;

pub use error::{EngineError, ErrorKind};
pub use id::{CardId, DefId, GameId, IdAllocator, PlayerId, UserId};
pub use rng::GameRng;
