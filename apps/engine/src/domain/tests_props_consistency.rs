//! Property-based tests for system-wide consistency invariants.
//! Random games are driven only through legal actions; every step is checked.

use proptest::prelude::*;

use crate::domain::test_state_helpers::{check_invariants, play_random, players, GAME_ID};
use crate::domain::{beats, test_gens, test_prelude, Action, GameState, GameStatus};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: beats is antisymmetric for every trump.
    #[test]
    fn prop_beats_never_mutual(
        (a, b) in test_gens::two_distinct_cards(),
        trump in test_gens::suit(),
    ) {
        prop_assert!(!(beats(a, b, trump) && beats(b, a, trump)));
    }

    /// Property: a card never beats itself.
    #[test]
    fn prop_beats_irreflexive(card in test_gens::card(), trump in test_gens::suit()) {
        prop_assert!(!beats(card, card, trump));
    }

    /// Property: every legal action is accepted and every reached state keeps
    /// card conservation, a single active turn, the attack limit and the
    /// finished-round condition.
    #[test]
    fn prop_random_games_keep_invariants(
        settings in test_gens::settings(),
        n in test_gens::player_count(),
        seed in any::<u64>(),
        choices in test_gens::choices(),
    ) {
        let state = GameState::new(GAME_ID, &players(n), settings, seed).unwrap();
        prop_assert!(check_invariants(&state).is_ok());
        let mut failure = None;
        play_random(state, &choices, 600, |_, after| {
            if failure.is_none() {
                if let Err(e) = check_invariants(after) {
                    failure = Some(e);
                }
            }
        });
        prop_assert!(failure.is_none(), "invariant broken: {:?}", failure);
    }

    /// Property: a player quitting mid-game keeps every invariant intact.
    #[test]
    fn prop_leave_keeps_invariants(
        settings in test_gens::settings(),
        n in test_gens::player_count(),
        seed in any::<u64>(),
        choices in test_gens::choices(),
        warmup in 0usize..80,
        seat in 0usize..4,
    ) {
        let state = GameState::new(GAME_ID, &players(n), settings, seed).unwrap();
        let state = play_random(state, &choices, warmup, |_, _| {});
        prop_assume!(state.status == GameStatus::Active);
        let leaver = players(n)[seat % n];
        let state = state.apply(leaver, &Action::Leave).unwrap();
        prop_assert!(check_invariants(&state).is_ok(), "{:?}", check_invariants(&state));
        if n == 2 {
            prop_assert_eq!(state.status, GameStatus::Finished);
            prop_assert_eq!(state.fool, None);
        }
        let mut failure = None;
        play_random(state, &choices, 400, |_, after| {
            if failure.is_none() {
                if let Err(e) = check_invariants(after) {
                    failure = Some(e);
                }
            }
        });
        prop_assert!(failure.is_none(), "invariant broken: {:?}", failure);
    }

    /// Property: a rejected command is rejected again, identically, and never
    /// mutates the state.
    #[test]
    fn prop_rejection_is_idempotent(
        settings in test_gens::settings(),
        n in test_gens::player_count(),
        seed in any::<u64>(),
        choices in test_gens::choices(),
        card in test_gens::card(),
        seat in 0usize..4,
    ) {
        let state = GameState::new(GAME_ID, &players(n), settings, seed).unwrap();
        let state = play_random(state, &choices, 40, |_, _| {});
        let seated = players(n);
        let actor = seated[seat % n];
        let target = seated[(seat + 1) % n];
        let attempts = [
            Action::Attack { card, target },
            Action::Defend { turn_id: 0, card },
            Action::Pass,
        ];
        for action in attempts {
            if let Err(first) = state.apply(actor, &action) {
                let again = state.apply(actor, &action).unwrap_err();
                prop_assert_eq!(first, again);
            }
        }
    }

    /// Property: games are fully determined by seed and command sequence.
    #[test]
    fn prop_same_seed_same_outcome(
        settings in test_gens::settings(),
        n in test_gens::player_count(),
        seed in any::<u64>(),
        choices in test_gens::choices(),
    ) {
        let a = GameState::new(GAME_ID, &players(n), settings, seed).unwrap();
        let b = a.clone();
        let a = play_random(a, &choices, 300, |_, _| {});
        let b = play_random(b, &choices, 300, |_, _| {});
        prop_assert_eq!(a, b);
    }

    /// Property: points only grow, and only between rounds.
    #[test]
    fn prop_points_move_only_at_round_end(
        settings in test_gens::settings(),
        n in test_gens::player_count(),
        seed in any::<u64>(),
        choices in test_gens::choices(),
    ) {
        let state = GameState::new(GAME_ID, &players(n), settings, seed).unwrap();
        let mut bad = false;
        let end = play_random(state, &choices, 600, |before, after| {
            let changed = before
                .players
                .iter()
                .zip(&after.players)
                .any(|(b, a)| a.points != b.points);
            let shrank = before
                .players
                .iter()
                .zip(&after.players)
                .any(|(b, a)| a.points < b.points);
            if shrank || (changed && after.history.len() == before.history.len()) {
                bad = true;
            }
        });
        prop_assert!(!bad);
        if end.status == GameStatus::Finished && end.settings.multi_round_mode {
            if let Some(fool) = end.fool {
                prop_assert!(end.players[fool as usize].points >= end.settings.max_points);
            }
        }
    }
}
