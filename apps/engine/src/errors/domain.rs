//! Domain-level error type used across the rules engine and its services.
//!
//! Every rejection is a deterministic function of (state, command). The three
//! classes map to how a client should react: fix the setup, fix the move, or
//! resynchronize from a fresh snapshot.

use thiserror::Error;

use super::error_code::ErrorCode;

/// Invalid game setup (fatal to game creation).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigKind {
    TooFewPlayers,
    TooManyPlayers,
    DuplicatePlayer,
    HandSizeOutOfRange,
    MaxPointsOutOfRange,
    DeckTooSmall,
    InvalidDeal,
    Other(String),
}

/// Rule violations given the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoveKind {
    GameFinished,
    RoundNotActive,
    PlayerNotActive,
    NotYourTurn,
    WrongTarget,
    NotAnAttacker,
    NotDefender,
    CardNotInHand,
    RankNotOnTable,
    AttackLimitReached,
    CannotBeat,
    NoPendingAttack,
    PendingAttacks,
    NoActiveTurn,
    TurnNotActive,
    NoCardsOnTable,
    AlreadyPassed,
    ParseCard,
}

/// Referenced entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Turn,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid setup, e.g. too few players for the hand size
    #[error("configuration error {0:?}: {1}")]
    Configuration(ConfigKind, String),
    /// Command violates a rule given the current state
    #[error("illegal move {0:?}: {1}")]
    IllegalMove(MoveKind, String),
    /// Referenced game/player/turn does not exist
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
}

impl DomainError {
    pub fn configuration(kind: ConfigKind, detail: impl Into<String>) -> Self {
        Self::Configuration(kind, detail.into())
    }

    pub fn illegal(kind: MoveKind, detail: impl Into<String>) -> Self {
        Self::IllegalMove(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// Invariant breach inside the engine. Surfaced as a configuration error
    /// so callers never see a panic.
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Configuration(
            ConfigKind::Other("INVARIANT".into()),
            format!("Invariant violated: {}", detail.into()),
        )
    }

    /// The illegal-move kind, if this is an `IllegalMove`.
    pub fn move_kind(&self) -> Option<&MoveKind> {
        match self {
            DomainError::IllegalMove(kind, _) => Some(kind),
            _ => None,
        }
    }

    /// Stable wire code for presentation layers.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Configuration(kind, _) => match kind {
                ConfigKind::TooFewPlayers => ErrorCode::TooFewPlayers,
                ConfigKind::TooManyPlayers => ErrorCode::TooManyPlayers,
                ConfigKind::DuplicatePlayer => ErrorCode::DuplicatePlayer,
                ConfigKind::HandSizeOutOfRange => ErrorCode::HandSizeOutOfRange,
                ConfigKind::MaxPointsOutOfRange => ErrorCode::MaxPointsOutOfRange,
                ConfigKind::DeckTooSmall => ErrorCode::DeckTooSmall,
                ConfigKind::InvalidDeal => ErrorCode::InvalidDeal,
                ConfigKind::Other(_) => ErrorCode::ConfigurationError,
            },
            DomainError::IllegalMove(kind, _) => match kind {
                MoveKind::GameFinished => ErrorCode::GameFinished,
                MoveKind::RoundNotActive => ErrorCode::RoundNotActive,
                MoveKind::PlayerNotActive => ErrorCode::PlayerNotActive,
                MoveKind::NotYourTurn => ErrorCode::NotYourTurn,
                MoveKind::WrongTarget => ErrorCode::WrongTarget,
                MoveKind::NotAnAttacker => ErrorCode::NotAnAttacker,
                MoveKind::NotDefender => ErrorCode::NotDefender,
                MoveKind::CardNotInHand => ErrorCode::CardNotInHand,
                MoveKind::RankNotOnTable => ErrorCode::RankNotOnTable,
                MoveKind::AttackLimitReached => ErrorCode::AttackLimitReached,
                MoveKind::CannotBeat => ErrorCode::CannotBeat,
                MoveKind::NoPendingAttack => ErrorCode::NoPendingAttack,
                MoveKind::PendingAttacks => ErrorCode::PendingAttacks,
                MoveKind::NoActiveTurn => ErrorCode::NoActiveTurn,
                MoveKind::TurnNotActive => ErrorCode::TurnNotActive,
                MoveKind::NoCardsOnTable => ErrorCode::NoCardsOnTable,
                MoveKind::AlreadyPassed => ErrorCode::AlreadyPassed,
                MoveKind::ParseCard => ErrorCode::ParseCard,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Game => ErrorCode::GameNotFound,
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
                NotFoundKind::Turn => ErrorCode::TurnNotFound,
            },
        }
    }
}
