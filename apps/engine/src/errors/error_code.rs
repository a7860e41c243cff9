//! Error codes for the Durak engine.
//!
//! Every rejection the engine can produce has exactly one code here. The
//! strings are SCREAMING_SNAKE_CASE and are what a presentation layer keys
//! its messages on; never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes for the Durak engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Configuration
    /// Fewer than two players
    TooFewPlayers,
    /// More players than seats at the table
    TooManyPlayers,
    /// Same identity seated twice
    DuplicatePlayer,
    /// Starting hand size outside the accepted range
    HandSizeOutOfRange,
    /// Point threshold outside the accepted range
    MaxPointsOutOfRange,
    /// Hands would need more cards than the deck has
    DeckTooSmall,
    /// Supplied deal is not a permutation of the deck
    InvalidDeal,
    /// General configuration error
    ConfigurationError,

    // Illegal moves
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

    // Resource Not Found
    GameNotFound,
    PlayerNotFound,
    TurnNotFound,

    // Service
    ConfigError,
    GameUnavailable,
    BadRequest,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TooFewPlayers => "TOO_FEW_PLAYERS",
            Self::TooManyPlayers => "TOO_MANY_PLAYERS",
            Self::DuplicatePlayer => "DUPLICATE_PLAYER",
            Self::HandSizeOutOfRange => "HAND_SIZE_OUT_OF_RANGE",
            Self::MaxPointsOutOfRange => "MAX_POINTS_OUT_OF_RANGE",
            Self::DeckTooSmall => "DECK_TOO_SMALL",
            Self::InvalidDeal => "INVALID_DEAL",
            Self::ConfigurationError => "CONFIGURATION_ERROR",

            Self::GameFinished => "GAME_FINISHED",
            Self::RoundNotActive => "ROUND_NOT_ACTIVE",
            Self::PlayerNotActive => "PLAYER_NOT_ACTIVE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::WrongTarget => "WRONG_TARGET",
            Self::NotAnAttacker => "NOT_AN_ATTACKER",
            Self::NotDefender => "NOT_DEFENDER",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::RankNotOnTable => "RANK_NOT_ON_TABLE",
            Self::AttackLimitReached => "ATTACK_LIMIT_REACHED",
            Self::CannotBeat => "CANNOT_BEAT",
            Self::NoPendingAttack => "NO_PENDING_ATTACK",
            Self::PendingAttacks => "PENDING_ATTACKS",
            Self::NoActiveTurn => "NO_ACTIVE_TURN",
            Self::TurnNotActive => "TURN_NOT_ACTIVE",
            Self::NoCardsOnTable => "NO_CARDS_ON_TABLE",
            Self::AlreadyPassed => "ALREADY_PASSED",
            Self::ParseCard => "PARSE_CARD",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::TurnNotFound => "TURN_NOT_FOUND",

            Self::ConfigError => "CONFIG_ERROR",
            Self::GameUnavailable => "GAME_UNAVAILABLE",
            Self::BadRequest => "BAD_REQUEST",
        }
    }

    /// Whether the client should treat its local state as stale.
    pub const fn requires_resync(&self) -> bool {
        matches!(
            self,
            Self::GameNotFound
                | Self::PlayerNotFound
                | Self::TurnNotFound
                | Self::GameUnavailable
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
