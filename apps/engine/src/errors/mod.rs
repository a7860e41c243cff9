//! Error handling for the Durak engine.

pub mod domain;
pub mod error_code;

pub use domain::{ConfigKind, DomainError, MoveKind, NotFoundKind};
pub use error_code::ErrorCode;
