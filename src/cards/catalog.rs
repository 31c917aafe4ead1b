//! Card catalog - the static card definitions.
//!
//! `CardDefinition` holds the immutable properties of a card: its kind
//! (number or special), color, and face content ("7", "skip", ...). The
//! catalog is built once at process startup and shared by every game;
//! per-game physical cards are `CardInstance`s referencing it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::id::DefId;

/// Broad card classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Digit cards "0" through "9".
    Number,
    /// Skip, reverse, draw-two, wild, wild-draw-four.
    Special,
}

/// Card color.
///
/// `Wild` marks the colorless cards; a concrete color is chosen at play
/// time by the rules module, not recorded in the definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl CardColor {
    /// The four concrete colors, in catalog order.
    pub const CONCRETE: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Yellow,
        CardColor::Green,
        CardColor::Blue,
    ];
}

/// Static card definition: the abstract "Red 7", not a physical card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this definition.
    pub id: DefId,

    /// Number or special.
    pub kind: CardKind,

    /// Card color (`Wild` for colorless specials).
    pub color: CardColor,

    /// Face content: "0".."9", "skip", "reverse", "draw_two", "wild",
    /// "wild_draw_four".
    pub content: String,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: DefId, kind: CardKind, color: CardColor, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            color,
            content: content.into(),
        }
    }
}

/// Immutable registry of card definitions.
///
/// ## Example
///
/// ```
/// use uno_engine::cards::CardCatalog;
///
/// let catalog = CardCatalog::standard();
/// assert_eq!(catalog.len(), 108);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    defs: FxHashMap<DefId, CardDefinition>,
    next_id: u32,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard 108-card Uno catalog.
    ///
    /// Per concrete color: one "0", two each of "1".."9", two skips, two
    /// reverses, two draw-twos (25 cards, 100 total). Plus four wilds and
    /// four wild-draw-fours.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        for color in CardColor::CONCRETE {
            catalog.register_auto(CardKind::Number, color, "0");
            for digit in 1..=9 {
                let content = digit.to_string();
                catalog.register_auto(CardKind::Number, color, content.clone());
                catalog.register_auto(CardKind::Number, color, content);
            }
            for special in ["skip", "reverse", "draw_two"] {
                catalog.register_auto(CardKind::Special, color, special);
                catalog.register_auto(CardKind::Special, color, special);
            }
        }

        for _ in 0..4 {
            catalog.register_auto(CardKind::Special, CardColor::Wild, "wild");
        }
        for _ in 0..4 {
            catalog.register_auto(CardKind::Special, CardColor::Wild, "wild_draw_four");
        }

        catalog
    }

    /// Register a definition.
    ///
    /// Panics if a definition with the same ID already exists - catalog
    /// construction is startup code and a duplicate is a programmer error.
    pub fn register(&mut self, def: CardDefinition) {
        if self.defs.contains_key(&def.id) {
            panic!("Definition {} already registered", def.id);
        }
        self.defs.insert(def.id, def);
    }

    /// Register a definition with an auto-assigned ID. Returns the ID.
    pub fn register_auto(
        &mut self,
        kind: CardKind,
        color: CardColor,
        content: impl Into<String>,
    ) -> DefId {
        let id = DefId::new(self.next_id);
        self.next_id += 1;
        self.register(CardDefinition::new(id, kind, color, content));
        id
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: DefId) -> Option<&CardDefinition> {
        self.defs.get(&id)
    }

    /// Check if a definition ID is registered.
    #[must_use]
    pub fn contains(&self, id: DefId) -> bool {
        self.defs.contains_key(&id)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.defs.values()
    }
}
