//! Turn resolver: attack, defend, take and pass against the live table.
//!
//! Callers have already checked that the game is running and that `actor`
//! is an active seat. Every function validates fully before mutating, so a
//! returned error leaves the state untouched.

use super::cards_logic::beats;
use super::cards_types::Card;
use super::round_flow::end_turn;
use super::settings::GameSettings;
use super::state::{
    require_active_turn, require_turn_id, Draw, DrawStatus, EntityId, GameState, RoundState,
    Seat, TurnState, TurnStatus,
};
use crate::errors::domain::{DomainError, MoveKind};

/// Seats that may still add cards to (or pass on) `turn`.
pub fn eligible_attackers(
    round: &RoundState,
    settings: &GameSettings,
    turn: &TurnState,
) -> Vec<Seat> {
    let can_attack =
        |s: Seat| s != turn.defender && round.is_active(s) && !round.hand(s).is_empty();
    if settings.anyone_can_attack {
        round.active_seats().into_iter().filter(|s| can_attack(*s)).collect()
    } else if can_attack(turn.attacker) {
        vec![turn.attacker]
    } else {
        Vec::new()
    }
}

fn require_eligible_attacker(
    round: &RoundState,
    settings: &GameSettings,
    turn: &TurnState,
    actor: Seat,
) -> Result<(), DomainError> {
    if actor == turn.defender {
        return Err(DomainError::illegal(
            MoveKind::NotAnAttacker,
            "The defender cannot attack",
        ));
    }
    if !eligible_attackers(round, settings, turn).contains(&actor) {
        return Err(DomainError::illegal(
            MoveKind::NotAnAttacker,
            format!("Seat {actor} may not attack this turn"),
        ));
    }
    Ok(())
}

fn require_in_hand(round: &RoundState, seat: Seat, card: Card) -> Result<(), DomainError> {
    if round.hand(seat).contains(&card) {
        Ok(())
    } else {
        Err(DomainError::illegal(
            MoveKind::CardNotInHand,
            format!("Seat {seat} does not hold {card}"),
        ))
    }
}

fn remove_from_hand(round: &mut RoundState, seat: Seat, card: Card) -> Result<(), DomainError> {
    let hand = round
        .hands
        .get_mut(seat as usize)
        .ok_or_else(|| DomainError::invariant(format!("no hand for seat {seat}")))?;
    let pos = hand
        .iter()
        .position(|c| *c == card)
        .ok_or_else(|| DomainError::invariant(format!("{card} vanished from seat {seat}")))?;
    hand.remove(pos);
    Ok(())
}

/// Place `card` against `target`, opening a turn if none is active.
pub fn attack(
    state: &mut GameState,
    actor: Seat,
    card: Card,
    target: Seat,
) -> Result<(), DomainError> {
    let settings = state.settings;
    let opening = state.round.turn.is_none();

    if let Some(turn) = state.round.turn.as_ref() {
        require_eligible_attacker(&state.round, &settings, turn, actor)?;
        if target != turn.defender {
            return Err(DomainError::illegal(
                MoveKind::WrongTarget,
                format!("Seat {} is defending, not seat {target}", turn.defender),
            ));
        }
        require_in_hand(&state.round, actor, card)?;
        if !turn.rank_on_table(card.rank) {
            return Err(DomainError::illegal(
                MoveKind::RankNotOnTable,
                format!("Rank of {card} is not on the table"),
            ));
        }
        if settings.attack_limit_reached(turn.draws.len()) {
            return Err(DomainError::illegal(
                MoveKind::AttackLimitReached,
                format!("Attack limit of {} reached", settings.max_attack_cards),
            ));
        }
    } else {
        let round = &state.round;
        if actor != round.next_attacker {
            return Err(DomainError::illegal(
                MoveKind::NotYourTurn,
                format!("Seat {} opens the next turn", round.next_attacker),
            ));
        }
        let defender = round
            .next_active_after(actor)
            .ok_or_else(|| DomainError::invariant("no defender available"))?;
        if target != defender {
            return Err(DomainError::illegal(
                MoveKind::WrongTarget,
                format!("Seat {actor} must attack seat {defender}"),
            ));
        }
        require_in_hand(round, actor, card)?;
    }

    // Validation done; mutate.
    if opening {
        let turn_id = state.allocate_id();
        let turn_no = state.round.turns.len() as u32 + 1;
        state.round.turn = Some(TurnState {
            id: turn_id,
            turn_no,
            attacker: actor,
            defender: target,
            status: TurnStatus::Active,
            draws: Vec::new(),
            attack_order: Vec::new(),
            passed: Vec::new(),
            emptied: Vec::new(),
        });
    }
    let draw_id = state.allocate_id();
    remove_from_hand(&mut state.round, actor, card)?;
    let ran_out = state.round.hand(actor).is_empty();
    let turn = state
        .round
        .turn
        .as_mut()
        .ok_or_else(|| DomainError::invariant("turn missing after attack"))?;
    turn.draws.push(Draw {
        id: draw_id,
        attacker: actor,
        attacking: card,
        defending: None,
        status: DrawStatus::Pending,
    });
    if !turn.attack_order.contains(&actor) {
        turn.attack_order.push(actor);
    }
    turn.passed.clear();
    if ran_out {
        note_emptied(turn, actor);
    }
    Ok(())
}

fn note_emptied(turn: &mut TurnState, seat: Seat) {
    if !turn.emptied.contains(&seat) {
        turn.emptied.push(seat);
    }
}

/// Cover the oldest pending attack that `card` beats.
pub fn defend(
    state: &mut GameState,
    actor: Seat,
    turn_id: EntityId,
    card: Card,
) -> Result<(), DomainError> {
    let trump = state.round.trump;
    let turn = require_turn_id(&state.round, turn_id)?;
    if actor != turn.defender {
        return Err(DomainError::illegal(
            MoveKind::NotDefender,
            format!("Seat {} is defending, not seat {actor}", turn.defender),
        ));
    }
    require_in_hand(&state.round, actor, card)?;
    if !turn.has_pending() {
        return Err(DomainError::illegal(
            MoveKind::NoPendingAttack,
            "Nothing left to beat",
        ));
    }
    let idx = turn
        .draws
        .iter()
        .position(|d| d.status == DrawStatus::Pending && beats(card, d.attacking, trump))
        .ok_or_else(|| {
            DomainError::illegal(
                MoveKind::CannotBeat,
                format!("{card} does not beat any pending attack"),
            )
        })?;

    remove_from_hand(&mut state.round, actor, card)?;
    let ran_out = state.round.hand(actor).is_empty();
    let turn = state
        .round
        .turn
        .as_mut()
        .ok_or_else(|| DomainError::invariant("turn missing after defend"))?;
    let draw = &mut turn.draws[idx];
    draw.defending = Some(card);
    draw.status = DrawStatus::Beaten;
    if ran_out {
        note_emptied(turn, actor);
    }

    close_if_done(state)
}

/// Defender picks up every card on the table.
pub fn take(state: &mut GameState, actor: Seat, turn_id: EntityId) -> Result<(), DomainError> {
    let turn = require_turn_id(&state.round, turn_id)?;
    if actor != turn.defender {
        return Err(DomainError::illegal(
            MoveKind::NotDefender,
            format!("Seat {} is defending, not seat {actor}", turn.defender),
        ));
    }
    if turn.draws.is_empty() {
        return Err(DomainError::illegal(
            MoveKind::NoCardsOnTable,
            "No cards to take",
        ));
    }

    let round = &mut state.round;
    let turn = round
        .turn
        .as_mut()
        .ok_or_else(|| DomainError::invariant("turn missing during take"))?;
    let picked: Vec<Card> = turn.table_cards().into_iter().map(|(_, c)| c).collect();
    for draw in turn.draws.iter_mut() {
        draw.status = DrawStatus::Taken;
    }
    turn.status = TurnStatus::DefenderTook;
    let hand = round
        .hands
        .get_mut(actor as usize)
        .ok_or_else(|| DomainError::invariant(format!("no hand for seat {actor}")))?;
    hand.extend(picked);
    hand.sort();

    end_turn(state)
}

/// An attacker declares they are done adding cards.
pub fn pass(state: &mut GameState, actor: Seat) -> Result<(), DomainError> {
    let settings = state.settings;
    let turn = require_active_turn(&state.round, "pass")?;
    require_eligible_attacker(&state.round, &settings, turn, actor)?;
    if turn.has_pending() {
        return Err(DomainError::illegal(
            MoveKind::PendingAttacks,
            format!("{} attack(s) still pending", turn.pending_count()),
        ));
    }
    if turn.passed.contains(&actor) {
        return Err(DomainError::illegal(
            MoveKind::AlreadyPassed,
            format!("Seat {actor} already passed"),
        ));
    }

    if let Some(turn) = state.round.turn.as_mut() {
        turn.passed.push(actor);
    }
    close_if_done(state)
}

/// Close the active turn as beaten once nothing more can happen on it.
pub(crate) fn close_if_done(state: &mut GameState) -> Result<(), DomainError> {
    let Some(turn) = state.round.turn.as_ref() else {
        return Ok(());
    };
    if turn.has_pending() {
        return Ok(());
    }
    let defender_empty = state.round.hand(turn.defender).is_empty();
    let eligible = eligible_attackers(&state.round, &state.settings, turn);
    let all_passed = eligible.iter().all(|s| turn.passed.contains(s));
    if !(defender_empty || all_passed) {
        return Ok(());
    }
    if let Some(turn) = state.round.turn.as_mut() {
        turn.status = TurnStatus::DefenderBeat;
    }
    end_turn(state)
}
