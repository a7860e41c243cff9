use serde::Serialize;
use thiserror::Error;

use crate::errors::{DomainError, ErrorCode};

/// Error body handed to presentation layers for a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub code: &'static str,
    pub detail: String,
    pub resync: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Game task unavailable: {detail}")]
    Unavailable { detail: String },
}

impl EngineError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::Domain(e) => e.code(),
            EngineError::Config { .. } => ErrorCode::ConfigError,
            EngineError::Unavailable { .. } => ErrorCode::GameUnavailable,
        }
    }

    /// The domain error, if this is a rules rejection.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            EngineError::Domain(e) => Some(e),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Rejection {
        let code = self.code();
        let detail = match self {
            EngineError::Domain(e) => e.to_string(),
            EngineError::Config { detail } | EngineError::Unavailable { detail } => detail.clone(),
        };
        Rejection {
            code: code.as_str(),
            detail,
            resync: code.requires_resync(),
        }
    }
}
