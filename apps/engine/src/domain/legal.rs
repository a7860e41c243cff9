//! Enumerate every action currently legal for a player.

use super::cards_logic::beats;
use super::game::Action;
use super::state::{DrawStatus, GameState, GameStatus, PlayerId, RoundStatus};
use super::turns::eligible_attackers;

/// Actions `player` may submit right now, excluding `Leave`.
///
/// Every returned action is accepted by `GameState::apply` against the
/// same state.
pub fn legal_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    if state.status != GameStatus::Active || state.round.status != RoundStatus::Active {
        return Vec::new();
    }
    let Ok(seat) = state.seat_of(player) else {
        return Vec::new();
    };
    let round = &state.round;
    if !round.is_active(seat) {
        return Vec::new();
    }
    let hand = round.hand(seat);

    let Some(turn) = round.turn.as_ref() else {
        if seat != round.next_attacker {
            return Vec::new();
        }
        let Some(target) = round
            .next_active_after(seat)
            .and_then(|s| state.player_id(s))
        else {
            return Vec::new();
        };
        return hand
            .iter()
            .map(|&card| Action::Attack { card, target })
            .collect();
    };

    let mut out = Vec::new();
    if seat == turn.defender {
        let pending: Vec<_> = turn
            .draws
            .iter()
            .filter(|d| d.status == DrawStatus::Pending)
            .map(|d| d.attacking)
            .collect();
        for &card in hand {
            if pending.iter().any(|a| beats(card, *a, round.trump)) {
                out.push(Action::Defend {
                    turn_id: turn.id,
                    card,
                });
            }
        }
        if !turn.draws.is_empty() {
            out.push(Action::Take { turn_id: turn.id });
        }
        return out;
    }

    if !eligible_attackers(round, &state.settings, turn).contains(&seat) {
        return out;
    }
    if let Some(target) = state.player_id(turn.defender) {
        if !state.settings.attack_limit_reached(turn.draws.len()) {
            for &card in hand {
                if turn.rank_on_table(card.rank) {
                    out.push(Action::Attack { card, target });
                }
            }
        }
    }
    if !turn.has_pending() && !turn.passed.contains(&seat) {
        out.push(Action::Pass);
    }
    out
}
