//! Per-viewer game state projection.
//!
//! Pure functions from a `GameTable` to serializable view structs. The
//! projection enforces visibility: the viewer sees their own hand card by
//! card, every other hand only as a count, the draw pile only as a count,
//! and the discard pile in full (it is public information).

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardColor, CardKind};
use crate::core::error::EngineError;
use crate::core::id::{CardId, GameId, PlayerId};
use crate::game::lifecycle::LifecycleState;
use crate::game::table::GameTable;
use crate::game::turn::Direction;
use crate::zones::Zone;

/// One fully identified card, as shown to a viewer allowed to see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub card: CardId,
    pub kind: CardKind,
    pub color: CardColor,
    pub content: String,
}

/// A hand as one viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "visibility", rename_all = "snake_case")]
pub enum HandView {
    /// The viewer's own hand, bottom to top.
    Visible { cards: Vec<CardView> },
    /// Someone else's hand; only its size leaks.
    Concealed { count: usize },
}

/// One seated player, as seen by the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player: PlayerId,
    pub display_name: String,
    pub is_host: bool,
    pub turn_index: usize,
    pub wins: u32,
    pub losses: u32,
    pub eliminated: bool,
    pub hand: HandView,
}

/// The full state of one game, filtered for one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: GameId,
    pub state: LifecycleState,
    pub host: PlayerId,
    pub current_turn: Option<PlayerId>,
    pub direction: Direction,
    pub winner: Option<PlayerId>,
    /// Players in seat order.
    pub players: Vec<PlayerView>,
    /// Draw pile size; its contents never leave the server.
    pub draw_count: usize,
    /// Discard pile bottom to top; the last entry is the visible top.
    pub discard: Vec<CardView>,
}

/// Project the game for one seated viewer.
///
/// Fails with `NotFound` if the viewer is not a player of this game.
pub fn project(
    table: &GameTable,
    catalog: &CardCatalog,
    viewer: PlayerId,
) -> Result<GameSnapshot, EngineError> {
    if table.player(viewer).is_none() {
        return Err(EngineError::not_found(format!(
            "{viewer} is not in {}",
            table.id()
        )));
    }
    render(table, catalog, Some(viewer))
}

/// Project the game for a spectator: every hand concealed.
pub fn project_observer(
    table: &GameTable,
    catalog: &CardCatalog,
) -> Result<GameSnapshot, EngineError> {
    render(table, catalog, None)
}

/// Render one player's hand for that player, bottom to top.
pub fn own_hand(
    table: &GameTable,
    catalog: &CardCatalog,
    player: PlayerId,
) -> Result<Vec<CardView>, EngineError> {
    table
        .hand(player)
        .iter()
        .map(|&card| card_view(table, catalog, card))
        .collect()
}

fn render(
    table: &GameTable,
    catalog: &CardCatalog,
    viewer: Option<PlayerId>,
) -> Result<GameSnapshot, EngineError> {
    let mut players = Vec::with_capacity(table.player_count());
    for row in table.players_in_order() {
        let hand = if viewer == Some(row.id) {
            HandView::Visible {
                cards: own_hand(table, catalog, row.id)?,
            }
        } else {
            HandView::Concealed {
                count: table.hand(row.id).len(),
            }
        };
        players.push(PlayerView {
            player: row.id,
            display_name: row.display_name.clone(),
            is_host: row.is_host,
            turn_index: row.turn_index,
            wins: row.wins,
            losses: row.losses,
            eliminated: row.eliminated,
            hand,
        });
    }

    let discard = table
        .zones()
        .cards_in(Zone::DiscardPile)
        .iter()
        .map(|&card| card_view(table, catalog, card))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GameSnapshot {
        game: table.id(),
        state: table.state(),
        host: table.host(),
        current_turn: table.current_turn(),
        direction: table.direction(),
        winner: table.winner(),
        players,
        draw_count: table.zones().zone_size(Zone::DrawPile),
        discard,
    })
}

fn card_view(
    table: &GameTable,
    catalog: &CardCatalog,
    card: CardId,
) -> Result<CardView, EngineError> {
    let instance = table
        .card(card)
        .ok_or_else(|| EngineError::invalid_argument(format!("unknown card {card}")))?;
    let def = catalog.get(instance.def).ok_or_else(|| {
        EngineError::invalid_argument(format!("{card} references unknown {}", instance.def))
    })?;
    Ok(CardView {
        card,
        kind: def.kind,
        color: def.color,
        content: def.content.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::{IdAllocator, UserId};
    use crate::game::table::GameOptions;

    fn started_game() -> (GameTable, CardCatalog, PlayerId, PlayerId) {
        let catalog = CardCatalog::standard();
        let ids = IdAllocator::new();
        let mut table = GameTable::create(
            &catalog,
            &ids,
            UserId::new(1),
            "host",
            GameOptions::new().seed(7),
        )
        .unwrap();
        table.join(&ids, UserId::new(2), "guest").unwrap();
        table.start(UserId::new(1)).unwrap();

        let host = table.host();
        let guest = table.player_by_user(UserId::new(2)).unwrap().id;
        (table, catalog, host, guest)
    }

    #[test]
    fn test_viewer_sees_own_hand_only() {
        let (table, catalog, host, guest) = started_game();
        let snapshot = project(&table, &catalog, host).unwrap();

        assert_eq!(snapshot.players.len(), 2);
        for view in &snapshot.players {
            if view.player == host {
                match &view.hand {
                    HandView::Visible { cards } => assert_eq!(cards.len(), 7),
                    HandView::Concealed { .. } => panic!("own hand concealed"),
                }
            } else {
                assert_eq!(view.player, guest);
                assert_eq!(view.hand, HandView::Concealed { count: 7 });
            }
        }
    }

    #[test]
    fn test_observer_sees_no_hand() {
        let (table, catalog, _, _) = started_game();
        let snapshot = project_observer(&table, &catalog).unwrap();

        for view in &snapshot.players {
            assert!(matches!(view.hand, HandView::Concealed { count: 7 }));
        }
        assert_eq!(snapshot.draw_count, 216 - 14);
        assert!(snapshot.discard.is_empty());
    }

    #[test]
    fn test_unseated_viewer_rejected() {
        let (table, catalog, _, _) = started_game();
        let err = project(&table, &catalog, PlayerId::new(999)).unwrap_err();
        assert_eq!(err.kind(), crate::core::ErrorKind::NotFound);
    }

    #[test]
    fn test_discard_is_public() {
        let (mut table, catalog, host, _) = started_game();
        let card = *table.hand(host).last().unwrap();
        table
            .play_card(host, card, &crate::rules::AnyCard, &catalog)
            .unwrap();

        let snapshot = project(&table, &catalog, host).unwrap();
        assert_eq!(snapshot.discard.len(), 1);
        assert_eq!(snapshot.discard[0].card, card);
    }

    #[test]
    fn test_snapshot_serializes_without_hidden_cards() {
        let (table, catalog, host, guest) = started_game();
        let snapshot = project(&table, &catalog, guest).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        // The host's hand must not expose card identity, only a count.
        let players = json["players"].as_array().unwrap();
        let host_view = players
            .iter()
            .find(|p| p["player"] == host.raw())
            .unwrap();
        assert_eq!(host_view["hand"]["visibility"], "concealed");
        assert_eq!(host_view["hand"]["count"], 7);
        assert!(host_view["hand"].get("cards").is_none());

        assert_eq!(json["draw_count"], 216 - 14);
    }
}
