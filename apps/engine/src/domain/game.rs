//! Game controller: creation, command dispatch, round lifecycle, game end.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::cards_types::Card;
use super::dealing::{deal, Deal};
use super::round_flow::{check_round_end, end_turn};
use super::scoring::{apply_round_scoring, fool_candidate};
use super::seed_derivation::derive_dealing_seed;
use super::settings::GameSettings;
use super::state::{
    DrawStatus, EntityId, GameId, GameState, GameStatus, PlayerId, PlayerSlot, PlayerStatus,
    RoundState, RoundStatus, Seat, TurnStatus,
};
use super::turns;
use crate::errors::domain::{ConfigKind, DomainError, MoveKind};

/// A player action, already attributed to an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Attack {
        card: Card,
        target: PlayerId,
    },
    Defend {
        turn_id: EntityId,
        card: Card,
    },
    #[serde(rename = "TAKE_CARDS")]
    Take {
        turn_id: EntityId,
    },
    #[serde(rename = "PASS_TURN")]
    Pass,
    /// Synthetic, submitted by the presence collaborator.
    Leave,
}

impl GameState {
    /// Seat `players` in the given order and deal the first round.
    pub fn new(
        game_id: GameId,
        players: &[PlayerId],
        settings: GameSettings,
        seed: u64,
    ) -> Result<Self, DomainError> {
        check_roster(players)?;
        settings.validate_for_players(players.len())?;
        let first = deal(players.len(), &settings, derive_dealing_seed(seed, 1))?;
        Ok(Self::seated(game_id, players, settings, seed, first))
    }

    /// Like `new`, but with a caller-supplied first deal.
    pub fn from_deal(
        game_id: GameId,
        players: &[PlayerId],
        settings: GameSettings,
        seed: u64,
        first: Deal,
    ) -> Result<Self, DomainError> {
        check_roster(players)?;
        settings.validate_for_players(players.len())?;
        first.validate(&settings, players.len())?;
        Ok(Self::seated(game_id, players, settings, seed, first))
    }

    fn seated(
        game_id: GameId,
        players: &[PlayerId],
        settings: GameSettings,
        seed: u64,
        first: Deal,
    ) -> Self {
        let slots = players
            .iter()
            .map(|&player_id| PlayerSlot {
                player_id,
                points: 0,
                left: false,
            })
            .collect::<Vec<_>>();
        let seats: Vec<Seat> = (0..players.len() as Seat).collect();
        let round = build_round(1, 1, &slots, &seats, first);
        let state = Self {
            game_id,
            seed,
            settings,
            players: slots,
            status: GameStatus::Active,
            fool: None,
            round,
            history: Vec::new(),
            previous_round: None,
            next_entity_id: 2,
        };
        info!(
            game_id,
            players = players.len(),
            trump = ?state.round.trump,
            starting_attacker = state.round.next_attacker,
            "Game created"
        );
        state
    }

    /// Apply `action` by `actor`, returning the next state.
    ///
    /// All-or-nothing: on error `self` is unchanged and nothing is returned.
    pub fn apply(&self, actor: PlayerId, action: &Action) -> Result<GameState, DomainError> {
        let mut next = self.clone();
        next.apply_in_place(actor, action)?;
        Ok(next)
    }

    fn apply_in_place(&mut self, actor: PlayerId, action: &Action) -> Result<(), DomainError> {
        if self.status == GameStatus::Finished {
            return Err(DomainError::illegal(
                MoveKind::GameFinished,
                format!("Game {} is finished", self.game_id),
            ));
        }
        let seat = self.seat_of(actor)?;

        if let Action::Leave = action {
            return self.leave(seat);
        }

        if self.round.status != RoundStatus::Active {
            return Err(DomainError::illegal(
                MoveKind::RoundNotActive,
                format!("Round {} is not active", self.round.round_no),
            ));
        }
        if !self.round.is_active(seat) {
            return Err(DomainError::illegal(
                MoveKind::PlayerNotActive,
                format!(
                    "Seat {seat} is {:?} in round {}",
                    self.round.status_of(seat),
                    self.round.round_no
                ),
            ));
        }

        match *action {
            Action::Attack { card, target } => {
                let target = self.seat_of(target)?;
                turns::attack(self, seat, card, target)?;
            }
            Action::Defend { turn_id, card } => turns::defend(self, seat, turn_id, card)?,
            Action::Take { turn_id } => turns::take(self, seat, turn_id)?,
            Action::Pass => turns::pass(self, seat)?,
            Action::Leave => {}
        }
        debug!(game_id = self.game_id, seat, ?action, "Action applied");

        self.after_round_progress()
    }

    /// A player quits. Their hand and any attack of theirs still
    /// unanswered are discarded. A turn left with no cards on it, or one
    /// they were defending, is abandoned. With fewer than two players left
    /// the game ends without a Fool.
    fn leave(&mut self, seat: Seat) -> Result<(), DomainError> {
        let idx = seat as usize;
        if self.players[idx].left {
            return Err(DomainError::illegal(
                MoveKind::PlayerNotActive,
                format!("Seat {seat} already left"),
            ));
        }
        self.players[idx].left = true;

        let round = &mut self.round;
        round.player_status[idx] = PlayerStatus::Left;
        round.left_this_round.push(seat);
        let hand = std::mem::take(&mut round.hands[idx]);
        round.discarded.extend(hand);
        let mut withdrawn = 0;
        if let Some(turn) = round.turn.as_mut() {
            turn.passed.retain(|s| *s != seat);
            if turn.defender != seat {
                let before = turn.draws.len();
                turn.draws.retain(|d| {
                    let theirs = d.attacker == seat && d.status == DrawStatus::Pending;
                    if theirs {
                        round.discarded.push(d.attacking);
                    }
                    !theirs
                });
                withdrawn = before - turn.draws.len();
            }
        }
        info!(game_id = self.game_id, seat, withdrawn, "Player left");

        if self.remaining_players() < 2 {
            let round = &mut self.round;
            if let Some(mut turn) = round.turn.take() {
                round
                    .discarded
                    .extend(turn.table_cards().into_iter().map(|(_, c)| c));
                turn.status = TurnStatus::DefenderBeat;
                round.turns.push(turn);
            }
            round.status = RoundStatus::Finished;
            round.loser = None;
            return self.after_round_progress();
        }

        match self.round.turn.as_ref() {
            Some(turn) if turn.defender == seat || turn.draws.is_empty() => {
                if let Some(turn) = self.round.turn.as_mut() {
                    turn.status = TurnStatus::DefenderBeat;
                }
                end_turn(self)?;
            }
            Some(_) => turns::close_if_done(self)?,
            None => {
                if self.round.next_attacker == seat {
                    self.round.next_attacker = self
                        .round
                        .next_active_after(seat)
                        .ok_or_else(|| DomainError::invariant("no attacker left"))?;
                }
                check_round_end(&mut self.round);
            }
        }
        self.after_round_progress()
    }

    /// Score a finished round, then end the game or deal the next round.
    fn after_round_progress(&mut self) -> Result<(), DomainError> {
        if self.round.status != RoundStatus::Finished {
            return Ok(());
        }
        if let Some(result) = apply_round_scoring(self) {
            info!(
                game_id = self.game_id,
                round_no = result.round_no,
                loser = ?result.loser,
                winner = ?result.winner,
                "Round scored"
            );
        }
        self.check_game_end()
    }

    fn check_game_end(&mut self) -> Result<(), DomainError> {
        let fool = if self.remaining_players() < 2 {
            Some(None)
        } else if !self.settings.multi_round_mode {
            Some(self.round.loser)
        } else {
            fool_candidate(self).map(Some)
        };

        match fool {
            Some(fool) => {
                self.status = GameStatus::Finished;
                self.fool = fool;
                info!(game_id = self.game_id, fool = ?fool, "Game finished");
                Ok(())
            }
            None => self.start_next_round(),
        }
    }

    fn start_next_round(&mut self) -> Result<(), DomainError> {
        let round_no = self.round.round_no + 1;
        let participants: Vec<Seat> = (0..self.player_count() as Seat)
            .filter(|s| !self.players[*s as usize].left)
            .collect();
        let dealt = deal(
            participants.len(),
            &self.settings,
            derive_dealing_seed(self.seed, round_no),
        )?;
        let id = self.allocate_id();
        let finished = std::mem::replace(
            &mut self.round,
            build_round(id, round_no, &self.players, &participants, dealt),
        );
        self.previous_round = Some(Box::new(finished));
        info!(
            game_id = self.game_id,
            round_no,
            trump = ?self.round.trump,
            starting_attacker = self.round.next_attacker,
            "Round started"
        );
        Ok(())
    }
}

fn check_roster(players: &[PlayerId]) -> Result<(), DomainError> {
    for (i, p) in players.iter().enumerate() {
        if players[..i].contains(p) {
            return Err(DomainError::configuration(
                ConfigKind::DuplicatePlayer,
                format!("Player {p} is seated twice"),
            ));
        }
    }
    Ok(())
}

/// Round `round_no` dealt to the seats in `participants`; departed seats
/// sit out with empty hands.
fn build_round(
    id: EntityId,
    round_no: u32,
    players: &[PlayerSlot],
    participants: &[Seat],
    dealt: Deal,
) -> RoundState {
    let mut hands = vec![Vec::new(); players.len()];
    let player_status: Vec<PlayerStatus> = players
        .iter()
        .map(|p| {
            if p.left {
                PlayerStatus::Left
            } else {
                PlayerStatus::Active
            }
        })
        .collect();
    for (hand, &seat) in dealt.hands.into_iter().zip(participants) {
        hands[seat as usize] = hand;
    }
    let next_attacker = participants
        .get(dealt.starting_attacker)
        .copied()
        .unwrap_or_default();
    RoundState {
        id,
        round_no,
        status: RoundStatus::Active,
        trump: dealt.trump,
        trump_card: dealt.trump_card,
        stock: dealt.stock,
        hands,
        discarded: Vec::new(),
        player_status,
        turn: None,
        turns: Vec::new(),
        next_attacker,
        loser: None,
        winner: None,
        finish_order: Vec::new(),
        left_this_round: Vec::new(),
    }
}
