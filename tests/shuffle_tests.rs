//! Property tests for shuffling and deck construction: permutation,
//! determinism under a fixed seed, and exact deck composition.

use proptest::prelude::*;

use uno_engine::{
    build_deck, CardCatalog, GameId, GameOptions, GameRng, GameTable, IdAllocator, UserId, Zone,
};

proptest! {
    #[test]
    fn prop_shuffle_is_a_permutation(seed: u64, len in 0usize..200) {
        let mut items: Vec<usize> = (0..len).collect();
        let mut rng = GameRng::new(seed);
        rng.shuffle(&mut items);

        let mut sorted = items;
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn prop_shuffle_is_deterministic(seed: u64) {
        let mut a: Vec<u32> = (0..52).collect();
        let mut b = a.clone();
        GameRng::new(seed).shuffle(&mut a);
        GameRng::new(seed).shuffle(&mut b);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_deck_is_an_exact_multiset(multiplier in 1u32..4) {
        let catalog = CardCatalog::standard();
        let ids = IdAllocator::new();
        let deck = build_deck(&catalog, GameId::new(1), multiplier, &ids).unwrap();
        prop_assert_eq!(deck.len(), 108 * multiplier as usize);

        let mut counts = std::collections::HashMap::new();
        for card in &deck {
            *counts.entry(card.def).or_insert(0u32) += 1;
        }
        for def in catalog.iter() {
            prop_assert_eq!(counts.get(&def.id).copied(), Some(multiplier));
        }
    }

    #[test]
    fn prop_seeded_games_shuffle_identically(seed: u64) {
        let catalog = CardCatalog::standard();
        let options = GameOptions::new().deck_multiplier(1).seed(seed);

        let a = GameTable::create(&catalog, &IdAllocator::new(), UserId::new(1), "a", options.clone())
            .unwrap();
        let b = GameTable::create(&catalog, &IdAllocator::new(), UserId::new(1), "b", options)
            .unwrap();

        // Fresh allocators assign the same instance ids, so identical
        // seeds must yield identical draw pile order.
        prop_assert_eq!(
            a.zones().cards_in(Zone::DrawPile),
            b.zones().cards_in(Zone::DrawPile)
        );
    }
}

#[test]
fn test_different_seeds_give_different_orders() {
    let catalog = CardCatalog::standard();
    let options = |seed| GameOptions::new().deck_multiplier(1).seed(seed);

    let a = GameTable::create(&catalog, &IdAllocator::new(), UserId::new(1), "a", options(1))
        .unwrap();
    let b = GameTable::create(&catalog, &IdAllocator::new(), UserId::new(1), "b", options(2))
        .unwrap();

    assert_ne!(
        a.zones().cards_in(Zone::DrawPile),
        b.zones().cards_in(Zone::DrawPile)
    );
}
