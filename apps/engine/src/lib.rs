#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Authoritative rules engine for Durak.
//!
//! `domain` holds the pure rules (every command is a
//! `(state, command) -> Result<state>` transition); `services` runs one
//! single-writer task per game on top of it.

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod protocol;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use config::EngineConfig;
pub use domain::{
    legal_actions, Action, Card, DeckSize, GameSettings, GameState, GameStatus, GameTransition,
    PlayerView, Rank, Suit,
};
pub use error::{EngineError, Rejection};
pub use errors::{DomainError, ErrorCode};
pub use protocol::{ClientCommand, ServerMsg};
pub use services::{GameHandle, GameRegistry};
pub use telemetry::init_tracing;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
