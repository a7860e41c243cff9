use crate::domain::state::{GameState, RoundResult, RoundStatus, Seat};

/// Penalty for holding the last cards of a round.
pub const LOSER_POINTS: u32 = 5;
/// Penalty for quitting mid-round in multi-round mode.
pub const LEAVE_POINTS: u32 = 1;

/// Points each seat receives for the current (finished) round.
pub fn round_points(state: &GameState) -> Vec<u32> {
    let mut points = vec![0u32; state.player_count()];
    if let Some(loser) = state.round.loser {
        if let Some(p) = points.get_mut(loser as usize) {
            *p += LOSER_POINTS;
        }
    }
    if state.settings.multi_round_mode {
        for seat in &state.round.left_this_round {
            if let Some(p) = points.get_mut(*seat as usize) {
                *p += LEAVE_POINTS;
            }
        }
    }
    points
}

/// Apply per-round scoring and record the round in the game history.
/// No-op unless the round is finished and not yet recorded.
pub fn apply_round_scoring(state: &mut GameState) -> Option<RoundResult> {
    if state.round.status != RoundStatus::Finished
        || state.history.iter().any(|r| r.round_id == state.round.id)
    {
        return None;
    }
    let awarded = round_points(state);
    for (slot, add) in state.players.iter_mut().zip(&awarded) {
        slot.points += add;
    }
    let result = RoundResult {
        round_id: state.round.id,
        round_no: state.round.round_no,
        loser: state.round.loser,
        winner: state.round.winner,
        points_awarded: awarded,
    };
    state.history.push(result.clone());
    Some(result)
}

/// Seat that is the overall loser once someone reaches the threshold.
///
/// Highest total wins the title; ties go to this round's loser, then to
/// the lowest seat.
pub fn fool_candidate(state: &GameState) -> Option<Seat> {
    let threshold = state.settings.max_points;
    let loser = state.round.loser;
    state
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.points >= threshold)
        .map(|(i, p)| (i as Seat, p.points))
        .max_by_key(|(seat, points)| (*points, Some(*seat) == loser, std::cmp::Reverse(*seat)))
        .map(|(seat, _)| seat)
}
