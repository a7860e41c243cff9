//! Round controller: closing turns, refilling hands, detecting the round's end.

use tracing::debug;

use super::state::{GameState, PlayerStatus, RoundState, RoundStatus, Seat, TurnState, TurnStatus};
use crate::errors::domain::DomainError;

/// Finish the active turn (already marked DefenderBeat or DefenderTook):
/// clear the table, refill, update statuses and pick the next attacker.
pub fn end_turn(state: &mut GameState) -> Result<(), DomainError> {
    let hand_size = state.settings.starting_hand_size as usize;
    let round = &mut state.round;
    let turn = round
        .turn
        .take()
        .ok_or_else(|| DomainError::invariant("end_turn without an active turn"))?;

    match turn.status {
        TurnStatus::DefenderBeat => {
            round
                .discarded
                .extend(turn.table_cards().into_iter().map(|(_, c)| c));
        }
        // Cards already moved to the defender's hand
        TurnStatus::DefenderTook => {}
        TurnStatus::Active => {
            return Err(DomainError::invariant("end_turn on a turn still active"));
        }
    }

    refill(round, &turn, hand_size);
    mark_finished(round, &finish_order(round, &turn));

    let status = turn.status;
    let defender = turn.defender;
    debug!(
        round_no = round.round_no,
        turn_id = turn.id,
        ?status,
        stock = round.stock.len(),
        "Turn closed"
    );
    round.turns.push(turn);

    if check_round_end(round) {
        return Ok(());
    }

    let next = match status {
        TurnStatus::DefenderTook => round.next_active_after(defender),
        _ => round.next_active_from(defender),
    };
    round.next_attacker =
        next.ok_or_else(|| DomainError::invariant("no next attacker in a live round"))?;
    Ok(())
}

/// Draw order after a turn: attackers as they joined, the remaining
/// non-defenders clockwise from the opener, the defender last.
pub fn refill_order(round: &RoundState, turn: &TurnState) -> Vec<Seat> {
    let mut order: Vec<Seat> = turn.attack_order.clone();
    for seat in round.clockwise_from(turn.attacker) {
        if seat != turn.defender && !order.contains(&seat) {
            order.push(seat);
        }
    }
    order.retain(|s| *s != turn.defender);
    order.push(turn.defender);
    order
}

/// Order in which empty-handed players leave the round after `turn`: by
/// when their hand ran out, then anyone else in draw order.
pub fn finish_order(round: &RoundState, turn: &TurnState) -> Vec<Seat> {
    let mut order = turn.emptied.clone();
    for seat in refill_order(round, turn) {
        if !order.contains(&seat) {
            order.push(seat);
        }
    }
    order
}

/// Top up active hands from the stock; stops when the stock runs out.
pub fn refill(round: &mut RoundState, turn: &TurnState, hand_size: usize) {
    for seat in refill_order(round, turn) {
        if !round.is_active(seat) {
            continue;
        }
        let Some(hand) = round.hands.get_mut(seat as usize) else {
            continue;
        };
        let mut drew = false;
        while hand.len() < hand_size {
            match round.stock.pop() {
                Some(card) => {
                    hand.push(card);
                    drew = true;
                }
                None => break,
            }
        }
        if drew {
            hand.sort();
        }
    }
}

/// Once the stock is empty, active players without cards are out of the
/// round. The first one out is the round's winner.
fn mark_finished(round: &mut RoundState, order: &[Seat]) {
    if !round.stock.is_empty() {
        return;
    }
    for &seat in order {
        let idx = seat as usize;
        if round.player_status.get(idx) == Some(&PlayerStatus::Active)
            && round.hands.get(idx).is_some_and(Vec::is_empty)
        {
            round.player_status[idx] = PlayerStatus::Finished;
            round.finish_order.push(seat);
            if round.winner.is_none() {
                round.winner = Some(seat);
            }
        }
    }
}

/// Finish the round when the stock is gone and at most one player holds
/// cards. That player, if any, is the loser.
pub fn check_round_end(round: &mut RoundState) -> bool {
    if round.status == RoundStatus::Finished {
        return true;
    }
    if !round.stock.is_empty() || round.turn.is_some() {
        return false;
    }
    let holders = round.seats_with_cards();
    if holders.len() > 1 {
        return false;
    }
    round.status = RoundStatus::Finished;
    round.loser = holders.first().copied();
    debug!(round_no = round.round_no, loser = ?round.loser, "Round finished");
    true
}
