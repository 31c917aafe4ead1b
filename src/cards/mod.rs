//! Card system: catalog, instances, deck construction.
//!
//! ## Key Types
//!
//! - `CardDefinition`: the abstract card ("Red 7") with kind/color/content
//! - `CardCatalog`: process-wide definition registry, 108-card `standard()`
//! - `CardInstance`: one physical card bound to one game
//! - `build_deck`: `multiplier` instances of every definition for a game

pub mod catalog;
pub mod deck;
pub mod instance;

pub use catalog::{CardCatalog, CardColor, CardDefinition, CardKind};
pub use deck::build_deck;
pub use instance::CardInstance;
