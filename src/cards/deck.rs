//! Deck construction.
//!
//! Builds the multiset of card instances one game starts with: the whole
//! catalog, `multiplier` copies of each definition.

use crate::cards::catalog::CardCatalog;
use crate::cards::instance::CardInstance;
use crate::core::error::EngineError;
use crate::core::id::{GameId, IdAllocator};

/// Build the card instances for a new game.
///
/// Creates `multiplier` instances of every catalog definition, all bound
/// to `game`. The returned order is arbitrary; the caller shuffles.
///
/// Fails with `InvalidArgument` if `multiplier` is zero.
pub fn build_deck(
    catalog: &CardCatalog,
    game: GameId,
    multiplier: u32,
    ids: &IdAllocator,
) -> Result<Vec<CardInstance>, EngineError> {
    if multiplier < 1 {
        return Err(EngineError::invalid_argument(format!(
            "deck multiplier must be at least 1, got {multiplier}"
        )));
    }

    let mut deck = Vec::with_capacity(catalog.len() * multiplier as usize);
    for def in catalog.iter() {
        for _ in 0..multiplier {
            deck.push(CardInstance::new(ids.next_card(), def.id, game));
        }
    }

    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog::{CardColor, CardKind};

    fn small_catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register_auto(CardKind::Number, CardColor::Red, "1");
        catalog.register_auto(CardKind::Number, CardColor::Blue, "2");
        catalog.register_auto(CardKind::Special, CardColor::Wild, "wild");
        catalog
    }

    #[test]
    fn test_build_deck_multiplier() {
        let catalog = small_catalog();
        let ids = IdAllocator::new();

        let deck = build_deck(&catalog, GameId::new(1), 3, &ids).unwrap();
        assert_eq!(deck.len(), 9);

        // Every card is bound to the game and ids are unique
        let mut seen = std::collections::HashSet::new();
        for card in &deck {
            assert_eq!(card.game, GameId::new(1));
            assert!(seen.insert(card.id));
        }
    }

    #[test]
    fn test_build_deck_standard_size() {
        let catalog = CardCatalog::standard();
        let ids = IdAllocator::new();

        let deck = build_deck(&catalog, GameId::new(1), 1, &ids).unwrap();
        assert_eq!(deck.len(), 108);

        let deck2 = build_deck(&catalog, GameId::new(2), 2, &ids).unwrap();
        assert_eq!(deck2.len(), 216);
    }

    #[test]
    fn test_build_deck_rejects_zero_multiplier() {
        let catalog = small_catalog();
        let ids = IdAllocator::new();

        let err = build_deck(&catalog, GameId::new(1), 0, &ids).unwrap_err();
        assert_eq!(err.kind(), crate::core::ErrorKind::InvalidArgument);
    }
}
