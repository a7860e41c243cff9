//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Each round's shuffle is derived from the game seed so a whole game can be
//! replayed from `(seed, commands)`.

/// Derive a seed for dealing cards in a round.
///
/// # Arguments
///
/// * `game_seed` - Base RNG seed chosen at game creation
/// * `round_no` - 1-based round number
///
/// # Returns
///
/// Derived seed that is unique per (game, round) combination.
pub fn derive_dealing_seed(game_seed: u64, round_no: u32) -> u64 {
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_003))
        .wrapping_add(2)
}
