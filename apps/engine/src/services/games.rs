use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{info, warn};

use super::game_actor::GameHandle;
use crate::config::EngineConfig;
use crate::domain::{
    Action, Deal, EntitySnapshot, GameId, GameSettings, GameState, GameTransition, PlayerId,
    PlayerView,
};
use crate::error::EngineError;
use crate::errors::{DomainError, NotFoundKind};
use crate::protocol::{ClientCommand, ServerMsg};

/// All running games, keyed by id. Games never share state; each one is
/// serialized by its own task.
pub struct GameRegistry {
    config: EngineConfig,
    games: DashMap<GameId, GameHandle>,
    next_game_id: AtomicI64,
}

impl GameRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            games: DashMap::new(),
            next_game_id: AtomicI64::new(1),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate, deal and start a game. `seed` defaults to a random one.
    ///
    /// Must be called inside a tokio runtime.
    pub fn create_game(
        &self,
        players: &[PlayerId],
        settings: GameSettings,
        seed: Option<u64>,
    ) -> Result<GameId, EngineError> {
        let game_id = self.allocate_game_id();
        let seed = seed.unwrap_or_else(rand::random);
        let state = GameState::new(game_id, players, settings, seed)
            .inspect_err(|e| warn!(game_id, code = %e.code(), error = %e, "Game setup rejected"))?;
        Ok(self.start(state))
    }

    /// Start a game from a prepared first deal (replays, fixtures).
    pub fn create_game_with_deal(
        &self,
        players: &[PlayerId],
        settings: GameSettings,
        seed: u64,
        first: Deal,
    ) -> Result<GameId, EngineError> {
        let game_id = self.allocate_game_id();
        let state = GameState::from_deal(game_id, players, settings, seed, first)
            .inspect_err(|e| warn!(game_id, code = %e.code(), error = %e, "Game setup rejected"))?;
        Ok(self.start(state))
    }

    pub async fn submit(
        &self,
        game_id: GameId,
        caller: PlayerId,
        action: Action,
    ) -> Result<PlayerView, EngineError> {
        self.handle(game_id)?.submit(caller, action).await
    }

    /// Decode a client payload, apply it and build the reply.
    pub async fn handle_message(&self, caller: PlayerId, payload: &str) -> ServerMsg {
        let command: ClientCommand = match serde_json::from_str(payload) {
            Ok(command) => command,
            Err(e) => return ServerMsg::bad_request(format!("Invalid command: {e}")),
        };
        let game_id = command.game_id();
        let result = self.submit(game_id, caller, command.into_action()).await;
        ServerMsg::from_result(game_id, result)
    }

    pub async fn view(&self, game_id: GameId, caller: PlayerId) -> Result<PlayerView, EngineError> {
        self.handle(game_id)?.view(caller).await
    }

    pub async fn entity_snapshot(&self, game_id: GameId) -> Result<EntitySnapshot, EngineError> {
        self.handle(game_id)?.snapshot().await
    }

    pub async fn state(&self, game_id: GameId) -> Result<GameState, EngineError> {
        self.handle(game_id)?.state().await
    }

    pub fn subscribe(
        &self,
        game_id: GameId,
    ) -> Result<broadcast::Receiver<GameTransition>, EngineError> {
        Ok(self.handle(game_id)?.subscribe())
    }

    /// Drop a game. Its task stops once in-flight requests are answered.
    pub fn remove(&self, game_id: GameId) -> bool {
        let removed = self.games.remove(&game_id).is_some();
        if removed {
            info!(game_id, "Game removed");
        }
        removed
    }

    pub fn contains(&self, game_id: GameId) -> bool {
        self.games.contains_key(&game_id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn allocate_game_id(&self) -> GameId {
        self.next_game_id.fetch_add(1, Ordering::Relaxed)
    }

    fn start(&self, state: GameState) -> GameId {
        let game_id = state.game_id;
        let handle = GameHandle::spawn(state, &self.config);
        self.games.insert(game_id, handle);
        game_id
    }

    // Clone out so no map guard is held across an await.
    fn handle(&self, game_id: GameId) -> Result<GameHandle, EngineError> {
        self.games
            .get(&game_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
                    .into()
            })
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
