//! Engine test support utilities
//!
//! Shared helpers for the engine's integration tests. Currently this is the
//! unified logging bootstrap so every test binary gets the same quiet,
//! env-controlled subscriber.

pub mod logging;
