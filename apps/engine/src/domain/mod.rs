//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod game;
pub mod game_transition;
pub mod legal;
pub mod player_view;
pub mod round_flow;
pub mod scoring;
pub mod seed_derivation;
pub mod settings;
pub mod snapshot;
pub mod state;
pub mod turns;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_leave;
#[cfg(test)]
mod tests_props_consistency;
#[cfg(test)]
mod tests_rounds;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use cards_logic::{beats, compare_for_lead};
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, DeckSize, Rank, Suit};
pub use dealing::{deal, Deal};
pub use game::Action;
pub use game_transition::{derive_game_transitions, GameTransition};
pub use legal::legal_actions;
pub use player_view::PlayerView;
pub use seed_derivation::derive_dealing_seed;
pub use settings::GameSettings;
pub use snapshot::{CardLocation, EntitySnapshot};
pub use state::{
    DrawStatus, EntityId, GameId, GameState, GameStatus, PlayerId, PlayerStatus, RoundStatus,
    Seat, TurnStatus,
};
