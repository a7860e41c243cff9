//! Service-level tuning for the game actors.
//!
//! Rule settings live in [`crate::domain::GameSettings`]; this only covers
//! the plumbing around each game's task.

use std::env;

use crate::error::EngineError;

pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;
pub const DEFAULT_EVENT_CAPACITY: usize = 128;

const MAILBOX_VAR: &str = "DURAK_MAILBOX_CAPACITY";
const EVENT_VAR: &str = "DURAK_EVENT_CAPACITY";

/// Immutable once built; handed to the registry at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bound of each game's command queue.
    pub mailbox_capacity: usize,
    /// Buffer of each game's transition broadcast. Slow subscribers lag
    /// rather than block the game.
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load from `DURAK_MAILBOX_CAPACITY` / `DURAK_EVENT_CAPACITY`, falling
    /// back to defaults for unset variables.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env` but reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let mailbox_capacity = capacity(&lookup, MAILBOX_VAR, DEFAULT_MAILBOX_CAPACITY)?;
        let event_capacity = capacity(&lookup, EVENT_VAR, DEFAULT_EVENT_CAPACITY)?;
        Ok(Self {
            mailbox_capacity,
            event_capacity,
        })
    }
}

fn capacity(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
) -> Result<usize, EngineError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(EngineError::config(format!(
            "{name} must be greater than zero"
        ))),
        Ok(n) => Ok(n),
        Err(_) => Err(EngineError::config(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}
