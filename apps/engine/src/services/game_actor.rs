//! One task per game. The task owns the only `GameState`; everything else
//! talks to it through a [`GameHandle`].

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::{
    derive_game_transitions, Action, EntitySnapshot, GameId, GameState, GameTransition, PlayerId,
    PlayerView,
};
use crate::error::EngineError;
use crate::errors::DomainError;

type Reply<T> = oneshot::Sender<T>;

enum GameRequest {
    Submit {
        caller: PlayerId,
        action: Action,
        reply: Reply<Result<PlayerView, DomainError>>,
    },
    View {
        caller: PlayerId,
        reply: Reply<Result<PlayerView, DomainError>>,
    },
    Snapshot {
        reply: Reply<EntitySnapshot>,
    },
    State {
        reply: Reply<GameState>,
    },
}

struct GameActor {
    state: GameState,
    inbox: mpsc::Receiver<GameRequest>,
    events: broadcast::Sender<GameTransition>,
}

impl GameActor {
    async fn run(mut self) {
        let game_id = self.state.game_id;
        while let Some(request) = self.inbox.recv().await {
            self.handle(request);
        }
        debug!(game_id, "Game task stopped");
    }

    fn handle(&mut self, request: GameRequest) {
        match request {
            GameRequest::Submit {
                caller,
                action,
                reply,
            } => {
                let result = self.submit(caller, &action);
                // The caller may have given up waiting; the command still counts.
                let _ = reply.send(result);
            }
            GameRequest::View { caller, reply } => {
                let _ = reply.send(PlayerView::for_player(&self.state, caller));
            }
            GameRequest::Snapshot { reply } => {
                let _ = reply.send(EntitySnapshot::capture(&self.state));
            }
            GameRequest::State { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    fn submit(&mut self, caller: PlayerId, action: &Action) -> Result<PlayerView, DomainError> {
        let game_id = self.state.game_id;
        let next = match self.state.apply(caller, action) {
            Ok(next) => next,
            Err(e) => {
                debug!(game_id, caller, ?action, code = %e.code(), "Command rejected");
                return Err(e);
            }
        };

        let transitions = derive_game_transitions(&self.state, &next);
        self.state = next;
        for transition in transitions {
            debug!(game_id, ?transition, "Publishing transition");
            // No subscribers is fine.
            let _ = self.events.send(transition);
        }
        PlayerView::for_player(&self.state, caller)
    }
}

/// Cloneable handle to a running game task.
#[derive(Clone)]
pub struct GameHandle {
    game_id: GameId,
    tx: mpsc::Sender<GameRequest>,
    events: broadcast::Sender<GameTransition>,
}

impl GameHandle {
    /// Spawn the task owning `state`. Must be called inside a tokio runtime.
    pub fn spawn(state: GameState, config: &EngineConfig) -> Self {
        let game_id = state.game_id;
        let (tx, inbox) = mpsc::channel(config.mailbox_capacity);
        let (events, _) = broadcast::channel(config.event_capacity);
        let actor = GameActor {
            state,
            inbox,
            events: events.clone(),
        };
        tokio::spawn(actor.run());
        info!(game_id, "Game task started");
        Self {
            game_id,
            tx,
            events,
        }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Apply `action` for `caller`; on success returns the caller's fresh view.
    pub async fn submit(
        &self,
        caller: PlayerId,
        action: Action,
    ) -> Result<PlayerView, EngineError> {
        self.request(|reply| GameRequest::Submit {
            caller,
            action,
            reply,
        })
        .await?
        .map_err(EngineError::from)
    }

    pub async fn view(&self, caller: PlayerId) -> Result<PlayerView, EngineError> {
        self.request(|reply| GameRequest::View { caller, reply })
            .await?
            .map_err(EngineError::from)
    }

    pub async fn snapshot(&self) -> Result<EntitySnapshot, EngineError> {
        self.request(|reply| GameRequest::Snapshot { reply }).await
    }

    /// Full copy of the authoritative state.
    pub async fn state(&self) -> Result<GameState, EngineError> {
        self.request(|reply| GameRequest::State { reply }).await
    }

    /// Transitions published after every accepted command from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<GameTransition> {
        self.events.subscribe()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> GameRequest,
    ) -> Result<T, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(make(reply)).await.map_err(|_| {
            EngineError::unavailable(format!("Game {} is no longer running", self.game_id))
        })?;
        rx.await.map_err(|_| {
            EngineError::unavailable(format!("Game {} dropped the request", self.game_id))
        })
    }
}
