//! Engine facade: the game registry and the per-game concurrency model.
//!
//! `GameEngine` owns every live game behind a `DashMap` of independently
//! locked tables. Commands mutate a clone of the table, commit it to the
//! [`Store`], and only then swap it in, so a failed command (including a
//! failed commit) leaves the in-memory game untouched. Per-viewer
//! snapshots are taken inside the critical section and published to the
//! [`Notifier`] after the lock drops.
//!
//! Lock ordering: the registry shard lock is never held while waiting on
//! a table lock. `table` clones the `Arc` out of the map before locking,
//! and `ensure_live` re-checks the map afterwards so a concurrently
//! deleted game reads as `NotFound` instead of mutating an orphan.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cards::CardCatalog;
use crate::core::error::EngineError;
use crate::core::id::{CardId, GameId, IdAllocator, PlayerId, UserId};
use crate::game::lifecycle::LifecycleState;
use crate::game::snapshot::{self, CardView, GameSnapshot};
use crate::game::table::{GameOptions, GameTable, LeaveEffect, PlayOutcome};
use crate::rules::{AnyCard, PlayRules};

/// Receives per-viewer snapshots after every successful mutation.
///
/// Called outside the table lock; implementations may block without
/// stalling other commands on the same game longer than their own send.
pub trait Notifier: Send + Sync {
    /// One snapshot per seated player, filtered for that player.
    fn publish(&self, game: GameId, snapshots: &[(PlayerId, GameSnapshot)]);

    /// The game is gone; viewers should drop their state.
    fn game_deleted(&self, _game: GameId) {}
}

/// Notifier that drops everything on the floor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _game: GameId, _snapshots: &[(PlayerId, GameSnapshot)]) {}
}

/// Durable persistence seam.
///
/// `commit` runs inside the critical section, before the mutated table
/// replaces the live one; returning an error aborts the command.
pub trait Store: Send + Sync {
    fn commit(&self, table: &GameTable) -> Result<(), EngineError>;
    fn delete(&self, game: GameId) -> Result<(), EngineError>;
}

/// In-memory-only operation: every commit succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopStore;

impl Store for NoopStore {
    fn commit(&self, _table: &GameTable) -> Result<(), EngineError> {
        Ok(())
    }

    fn delete(&self, _game: GameId) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Result of joining a game.
#[derive(Clone, Debug)]
pub struct JoinOutcome {
    /// The freshly created player row.
    pub player: PlayerId,
    /// The joiner's view of the game.
    pub snapshot: GameSnapshot,
}

/// Result of leaving a game.
#[derive(Clone, Debug)]
pub enum LeaveOutcome {
    /// The host left; the game no longer exists.
    GameDeleted,
    /// A non-host player left; the game continues without them.
    PlayerRemoved { player: PlayerId },
}

/// One row of the public game list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameListing {
    pub game: GameId,
    pub state: LifecycleState,
    pub players: Vec<SeatListing>,
}

/// A player as shown in the game list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatListing {
    pub player: PlayerId,
    pub display_name: String,
}

/// The command surface over every live game.
pub struct GameEngine {
    catalog: Arc<CardCatalog>,
    ids: IdAllocator,
    games: DashMap<GameId, Arc<RwLock<GameTable>>>,
    rules: Box<dyn PlayRules>,
    notifier: Box<dyn Notifier>,
    store: Box<dyn Store>,
}

impl Default for GameEngine {
    /// An engine over the standard 108-card catalog with permissive
    /// rules and no persistence or notification.
    fn default() -> Self {
        Self::new(CardCatalog::standard())
    }
}

impl GameEngine {
    /// Create an engine over `catalog` with [`AnyCard`] rules,
    /// [`NoopNotifier`], and [`NoopStore`].
    #[must_use]
    pub fn new(catalog: CardCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            ids: IdAllocator::new(),
            games: DashMap::new(),
            rules: Box::new(AnyCard),
            notifier: Box::new(NoopNotifier),
            store: Box::new(NoopStore),
        }
    }

    /// Replace the play-legality rules.
    #[must_use]
    pub fn with_rules(mut self, rules: impl PlayRules + 'static) -> Self {
        self.rules = Box::new(rules);
        self
    }

    /// Replace the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Replace the store.
    #[must_use]
    pub fn with_store(mut self, store: impl Store + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// The catalog every game's deck is built from.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Number of live games.
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    // === Commands ===

    /// Create a game hosted by `user`. Returns the host's view.
    pub fn create_game(
        &self,
        user: UserId,
        display_name: impl Into<String>,
        options: GameOptions,
    ) -> Result<GameSnapshot, EngineError> {
        let table = GameTable::create(&self.catalog, &self.ids, user, display_name, options)?;
        self.store.commit(&table)?;

        let game = table.id();
        let host = table.host();
        let view = snapshot::project(&table, &self.catalog, host)?;
        self.games.insert(game, Arc::new(RwLock::new(table)));

        self.notifier.publish(game, &[(host, view.clone())]);
        Ok(view)
    }

    /// Seat `user` in a lobby.
    pub fn join_game(
        &self,
        game: GameId,
        user: UserId,
        display_name: impl Into<String>,
    ) -> Result<JoinOutcome, EngineError> {
        let name = display_name.into();
        let (player, snapshots) = self.mutate(game, |t| t.join(&self.ids, user, name))?;
        let snapshot = take_view(snapshots, player)?;
        Ok(JoinOutcome { player, snapshot })
    }

    /// Remove `user`'s player. A leaving host deletes the game outright.
    pub fn leave_game(&self, game: GameId, user: UserId) -> Result<LeaveOutcome, EngineError> {
        let arc = self.table(game)?;
        let mut guard = arc.write();
        self.ensure_live(game, &arc)?;

        let mut working = guard.clone();
        match working.leave(user)? {
            LeaveEffect::GameDeleted => {
                self.store.delete(game)?;
                self.games.remove(&game);
                drop(guard);
                info!(game = game.raw(), "game deleted");
                self.notifier.game_deleted(game);
                Ok(LeaveOutcome::GameDeleted)
            }
            LeaveEffect::PlayerRemoved { player } => {
                if let Err(err) = self.store.commit(&working) {
                    warn!(game = game.raw(), %err, "commit failed, rolling back");
                    return Err(err);
                }
                *guard = working;
                let snapshots = self.viewer_snapshots(&guard)?;
                drop(guard);
                self.notifier.publish(game, &snapshots);
                Ok(LeaveOutcome::PlayerRemoved { player })
            }
        }
    }

    /// Start the game. Host only. Returns the host's view after the deal.
    pub fn start_game(&self, game: GameId, user: UserId) -> Result<GameSnapshot, EngineError> {
        let (host, snapshots) = self.mutate(game, |t| {
            t.start(user)?;
            Ok(t.host())
        })?;
        take_view(snapshots, host)
    }

    /// Draw a card on `player`'s turn. Returns their updated hand.
    pub fn draw_card(
        &self,
        game: GameId,
        player: PlayerId,
    ) -> Result<Vec<CardView>, EngineError> {
        let (hand, _) = self.mutate(game, |t| {
            t.draw_card(player)?;
            snapshot::own_hand(t, &self.catalog, player)
        })?;
        Ok(hand)
    }

    /// Play a card from `player`'s hand. Returns the outcome and the
    /// player's view afterwards.
    pub fn play_card(
        &self,
        game: GameId,
        player: PlayerId,
        card: CardId,
    ) -> Result<(PlayOutcome, GameSnapshot), EngineError> {
        let (outcome, snapshots) = self.mutate(game, |t| {
            t.play_card(player, card, self.rules.as_ref(), &self.catalog)
        })?;
        let snapshot = take_view(snapshots, player)?;
        Ok((outcome, snapshot))
    }

    // === Queries ===

    /// A point-in-time view of one game, filtered for `viewer`; `None`
    /// projects for a spectator with every hand concealed.
    pub fn game_state(
        &self,
        game: GameId,
        viewer: Option<PlayerId>,
    ) -> Result<GameSnapshot, EngineError> {
        let arc = self.table(game)?;
        let guard = arc.read();
        self.ensure_live(game, &arc)?;
        match viewer {
            Some(player) => snapshot::project(&guard, &self.catalog, player),
            None => snapshot::project_observer(&guard, &self.catalog),
        }
    }

    /// Every live game with its seated players.
    #[must_use]
    pub fn list_games(&self) -> Vec<GameListing> {
        // Collect the arcs first so no table lock is taken while a
        // registry shard is held.
        let arcs: Vec<Arc<RwLock<GameTable>>> = self
            .games
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        arcs.iter()
            .map(|arc| {
                let table = arc.read();
                GameListing {
                    game: table.id(),
                    state: table.state(),
                    players: table
                        .players_in_order()
                        .map(|p| SeatListing {
                            player: p.id,
                            display_name: p.display_name.clone(),
                        })
                        .collect(),
                }
            })
            .collect()
    }

    // === Internals ===

    fn table(&self, game: GameId) -> Result<Arc<RwLock<GameTable>>, EngineError> {
        self.games
            .get(&game)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::not_found(format!("{game} does not exist")))
    }

    /// Re-check the registry after locking: a concurrent host-leave may
    /// have deleted the game between the map lookup and the lock.
    fn ensure_live(
        &self,
        game: GameId,
        arc: &Arc<RwLock<GameTable>>,
    ) -> Result<(), EngineError> {
        let live = self
            .games
            .get(&game)
            .map(|entry| Arc::ptr_eq(entry.value(), arc))
            .unwrap_or(false);
        if live {
            Ok(())
        } else {
            Err(EngineError::not_found(format!("{game} does not exist")))
        }
    }

    /// Clone the table, apply `op`, commit, swap, snapshot, publish.
    fn mutate<T>(
        &self,
        game: GameId,
        op: impl FnOnce(&mut GameTable) -> Result<T, EngineError>,
    ) -> Result<(T, Vec<(PlayerId, GameSnapshot)>), EngineError> {
        let arc = self.table(game)?;
        let mut guard = arc.write();
        self.ensure_live(game, &arc)?;

        let mut working = guard.clone();
        let out = op(&mut working)?;
        if let Err(err) = self.store.commit(&working) {
            warn!(game = game.raw(), %err, "commit failed, rolling back");
            return Err(err);
        }
        *guard = working;
        let snapshots = self.viewer_snapshots(&guard)?;
        drop(guard);

        self.notifier.publish(game, &snapshots);
        Ok((out, snapshots))
    }

    fn viewer_snapshots(
        &self,
        table: &GameTable,
    ) -> Result<Vec<(PlayerId, GameSnapshot)>, EngineError> {
        table
            .players_in_order()
            .map(|p| Ok((p.id, snapshot::project(table, &self.catalog, p.id)?)))
            .collect()
    }
}

fn take_view(
    snapshots: Vec<(PlayerId, GameSnapshot)>,
    viewer: PlayerId,
) -> Result<GameSnapshot, EngineError> {
    snapshots
        .into_iter()
        .find(|(player, _)| *player == viewer)
        .map(|(_, snapshot)| snapshot)
        .ok_or_else(|| EngineError::not_found(format!("no view for {viewer}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use parking_lot::Mutex;

    fn engine() -> GameEngine {
        GameEngine::default()
    }

    fn seeded() -> GameOptions {
        GameOptions::new().seed(11)
    }

    #[test]
    fn test_create_and_list() {
        let engine = engine();
        let view = engine
            .create_game(UserId::new(1), "alice", seeded())
            .unwrap();

        assert_eq!(engine.game_count(), 1);
        let listings = engine.list_games();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].game, view.game);
        assert_eq!(listings[0].players[0].display_name, "alice");
    }

    #[test]
    fn test_unknown_game_is_not_found() {
        let engine = engine();
        let err = engine
            .join_game(GameId::new(999), UserId::new(1), "alice")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_join_returns_joiner_view() {
        let engine = engine();
        let game = engine
            .create_game(UserId::new(1), "alice", seeded())
            .unwrap()
            .game;

        let outcome = engine.join_game(game, UserId::new(2), "bob").unwrap();
        assert_eq!(outcome.snapshot.players.len(), 2);
        let me = outcome
            .snapshot
            .players
            .iter()
            .find(|p| p.player == outcome.player)
            .unwrap();
        assert!(!me.is_host);
        assert_eq!(me.turn_index, 1);
    }

    #[test]
    fn test_host_leave_removes_game() {
        let engine = engine();
        let game = engine
            .create_game(UserId::new(1), "alice", seeded())
            .unwrap()
            .game;
        engine.join_game(game, UserId::new(2), "bob").unwrap();

        let outcome = engine.leave_game(game, UserId::new(1)).unwrap();
        assert!(matches!(outcome, LeaveOutcome::GameDeleted));
        assert_eq!(engine.game_count(), 0);

        let err = engine.game_state(game, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_full_turn_via_facade() {
        let engine = engine();
        let view = engine
            .create_game(UserId::new(1), "alice", seeded())
            .unwrap();
        let game = view.game;
        let host = view.host;
        engine.join_game(game, UserId::new(2), "bob").unwrap();
        engine.start_game(game, UserId::new(1)).unwrap();

        let hand = engine.draw_card(game, host).unwrap();
        assert_eq!(hand.len(), 8);

        let (outcome, after) = engine.play_card(game, host, hand[7].card).unwrap();
        assert_eq!(outcome, PlayOutcome::Continued);
        assert_eq!(after.discard.len(), 1);
        assert_ne!(after.current_turn, Some(host));
    }

    struct Recording {
        published: Mutex<Vec<(GameId, usize)>>,
    }

    impl Notifier for Recording {
        fn publish(&self, game: GameId, snapshots: &[(PlayerId, GameSnapshot)]) {
            self.published.lock().push((game, snapshots.len()));
        }
    }

    #[test]
    fn test_notifier_gets_one_snapshot_per_player() {
        let notifier = Arc::new(Recording {
            published: Mutex::new(Vec::new()),
        });

        struct Fwd(Arc<Recording>);
        impl Notifier for Fwd {
            fn publish(&self, game: GameId, snapshots: &[(PlayerId, GameSnapshot)]) {
                self.0.publish(game, snapshots);
            }
        }

        let engine = GameEngine::default().with_notifier(Fwd(Arc::clone(&notifier)));
        let game = engine
            .create_game(UserId::new(1), "alice", seeded())
            .unwrap()
            .game;
        engine.join_game(game, UserId::new(2), "bob").unwrap();

        let published = notifier.published.lock();
        // create publishes 1 view, join publishes 2
        assert_eq!(published.as_slice(), &[(game, 1), (game, 2)]);
    }

    struct FailingStore;

    impl Store for FailingStore {
        fn commit(&self, table: &GameTable) -> Result<(), EngineError> {
            if table.player_count() > 1 {
                return Err(EngineError::Persistence("disk full".into()));
            }
            Ok(())
        }

        fn delete(&self, _game: GameId) -> Result<(), EngineError> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_commit_rolls_back() {
        let engine = GameEngine::default().with_store(FailingStore);
        let game = engine
            .create_game(UserId::new(1), "alice", seeded())
            .unwrap()
            .game;

        let err = engine.join_game(game, UserId::new(2), "bob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);

        // The live table never saw the join
        let snapshot = engine.game_state(game, None).unwrap();
        assert_eq!(snapshot.players.len(), 1);
    }

    #[test]
    fn test_spectator_query() {
        let engine = engine();
        let game = engine
            .create_game(UserId::new(1), "alice", seeded())
            .unwrap()
            .game;
        engine.join_game(game, UserId::new(2), "bob").unwrap();
        engine.start_game(game, UserId::new(1)).unwrap();

        let snapshot = engine.game_state(game, None).unwrap();
        for player in &snapshot.players {
            assert!(matches!(
                player.hand,
                crate::game::HandView::Concealed { count: 7 }
            ));
        }
    }
}
