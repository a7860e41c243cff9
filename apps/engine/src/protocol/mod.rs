//! Wire shapes exchanged with the transport layer.

pub mod commands;
pub mod messages;

pub use commands::ClientCommand;
pub use messages::{ServerMsg, PROTOCOL_VERSION};
