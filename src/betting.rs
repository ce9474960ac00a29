//! One street of betting.
//!
//! A [`BettingRound`] owns the street's running bet, the minimum raise
//! increment and the queue of seats still to act. Raw amounts from a
//! [`MoveSource`] go through [`Player::resolve`]; the resulting move is
//! checked against the round state by [`examine_move`] before any chips move.

use crate::agents::{MoveSource, TurnContext};
use crate::moves::{Chips, Move, Street, SHOVE};
use crate::player::Player;
use std::collections::VecDeque;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BettingError {
    #[error(
        "invalid move {mv:?} from seat {seat}: current bet {current_bet}, min raise {min_raise}"
    )]
    InvalidMove { seat: usize, mv: Move, current_bet: Chips, min_raise: Chips },
    #[error("no players at the table")]
    NoPlayers,
    #[error("seat {0} is out of range")]
    SeatOutOfRange(usize),
}

/// Betting levels after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLevel {
    pub current_bet: Chips,
    pub min_raise: Chips,
    /// A full raise, which gives every other player the right to raise again.
    pub reopens: bool,
}

/// New `(current_bet, min_raise)` after `mv`, without touching any player.
///
/// Fold, check and call leave the levels alone. A raise sets the increment to
/// its size. An all-in that does not complete a full raise still lifts the bet
/// to the all-in amount but shrinks the increment so the next full raise
/// target is unchanged.
///
/// ```
/// use holdem_rs::betting::examine_move;
/// use holdem_rs::moves::Move;
///
/// // B raised to 500 over a 100 bet; C shoves 600.
/// let level = examine_move(0, Move::AllIn(600), 500, 400).unwrap();
/// assert_eq!((level.current_bet, level.min_raise), (600, 300));
/// assert!(!level.reopens);
/// ```
pub fn examine_move(
    seat: usize,
    mv: Move,
    current_bet: Chips,
    min_raise: Chips,
) -> Result<BetLevel, BettingError> {
    let invalid = BettingError::InvalidMove { seat, mv, current_bet, min_raise };
    let unchanged = BetLevel { current_bet, min_raise, reopens: false };
    let full_target = current_bet.saturating_add(min_raise);
    match mv {
        Move::Fold | Move::Check => Ok(unchanged),
        Move::Call(amount) if amount == current_bet => Ok(unchanged),
        Move::Call(_) => Err(invalid),
        Move::Raise(amount) if amount >= full_target => Ok(BetLevel {
            current_bet: amount,
            min_raise: amount - current_bet,
            reopens: true,
        }),
        Move::Raise(_) => Err(invalid),
        Move::AllIn(amount) if amount <= current_bet => Ok(unchanged),
        Move::AllIn(amount) if amount < full_target => Ok(BetLevel {
            current_bet: amount,
            min_raise: full_target - amount,
            reopens: false,
        }),
        Move::AllIn(amount) => Ok(BetLevel {
            current_bet: amount,
            min_raise: amount - current_bet,
            reopens: true,
        }),
    }
}

/// Parse terminal input into a raw amount. Numbers pass through, `fold`
/// becomes a negative amount, `allin` the largest possible one, and anything
/// else is unusable.
pub fn parse_amount(input: &str) -> Option<i64> {
    let t = input.trim();
    match t.to_ascii_lowercase().as_str() {
        "f" | "fold" => Some(-1),
        "a" | "allin" | "all-in" | "shove" => Some(SHOVE),
        _ => t.parse::<i64>().ok(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundEnd {
    /// Everyone still holding cards has matched the bet or is all-in.
    Closed,
    /// All but one player folded.
    Uncontested { winner: usize },
}

#[derive(Debug, Clone)]
pub struct BettingRound {
    street: Street,
    current_bet: Chips,
    min_raise: Chips,
    queue: VecDeque<usize>,
    last_raiser: Option<usize>,
    can_raise: Vec<bool>,
}

impl BettingRound {
    /// Queue every seat that can act, in seating order from `first_to_act`.
    pub fn new(
        street: Street,
        players: &[Player],
        first_to_act: usize,
        current_bet: Chips,
        min_raise: Chips,
    ) -> Result<Self, BettingError> {
        if players.is_empty() {
            return Err(BettingError::NoPlayers);
        }
        if first_to_act >= players.len() {
            return Err(BettingError::SeatOutOfRange(first_to_act));
        }
        let n = players.len();
        let queue =
            (0..n).map(|i| (first_to_act + i) % n).filter(|&s| players[s].can_act()).collect();
        Ok(Self {
            street,
            current_bet,
            min_raise,
            queue,
            last_raiser: None,
            can_raise: vec![true; n],
        })
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    pub fn last_raiser(&self) -> Option<usize> {
        self.last_raiser
    }

    /// Seats still waiting to act, front first.
    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    pub fn can_raise(&self, seat: usize) -> bool {
        self.can_raise.get(seat).copied().unwrap_or(false)
    }

    /// Context for `seat`'s decision at the current levels.
    pub fn context(&self, players: &[Player], seat: usize) -> Result<TurnContext, BettingError> {
        let p = players.get(seat).ok_or(BettingError::SeatOutOfRange(seat))?;
        Ok(TurnContext {
            seat,
            name: p.name().to_string(),
            street: self.street,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            to_call: self.current_bet.saturating_sub(p.current_bet()),
            money: p.money(),
            can_raise: self.can_raise(seat),
            hole: p.hole(),
        })
    }

    /// Next seat that actually has a decision to make, or `None` when the
    /// street is over. Stale queue entries are dropped on the way.
    pub fn next_seat(&mut self, players: &[Player]) -> Option<usize> {
        while let Some(&seat) = self.queue.front() {
            if live_count(players) <= 1 {
                self.queue.clear();
                return None;
            }
            let p = &players[seat];
            let matched = p.current_bet() >= self.current_bet;
            let skip = !p.can_act()
                || (self.last_raiser == Some(seat) && matched)
                || (matched && !others_can_act(players, seat));
            if !skip {
                return Some(seat);
            }
            self.queue.pop_front();
        }
        None
    }

    /// Ask `seat` for an amount, resolve it and apply it.
    pub fn act(
        &mut self,
        players: &mut [Player],
        seat: usize,
        source: &mut dyn MoveSource,
    ) -> Result<Move, BettingError> {
        let ctx = self.context(players, seat)?;
        let raw = source.next_move(&ctx);
        if raw.is_none() {
            log::warn!("{}: unusable input on the {}, treated as a call", ctx.name, self.street);
        }
        let mv = players[seat].resolve(raw, self.current_bet, self.min_raise, ctx.can_raise);
        self.apply_move(players, seat, mv)?;
        Ok(mv)
    }

    /// Validate and apply a fully formed move for `seat`.
    pub fn apply_move(
        &mut self,
        players: &mut [Player],
        seat: usize,
        mv: Move,
    ) -> Result<BetLevel, BettingError> {
        let p = players.get(seat).ok_or(BettingError::SeatOutOfRange(seat))?;
        let invalid = BettingError::InvalidMove {
            seat,
            mv,
            current_bet: self.current_bet,
            min_raise: self.min_raise,
        };
        let stack_total = p.current_bet() + p.money();
        let consistent = match mv {
            Move::Fold => true,
            Move::Check => p.current_bet() >= self.current_bet,
            Move::Call(total) => total < stack_total,
            Move::Raise(total) => self.can_raise(seat) && total < stack_total,
            Move::AllIn(total) => total == stack_total,
        };
        if !consistent || !p.can_act() {
            return Err(invalid);
        }
        let level = examine_move(seat, mv, self.current_bet, self.min_raise)?;

        if self.queue.front() == Some(&seat) {
            self.queue.pop_front();
        } else {
            self.queue.retain(|&s| s != seat);
        }
        players[seat].commit(self.street, mv);
        self.can_raise[seat] = false;
        log::debug!("{} {}: {} ({})", self.street, players[seat].name(), mv, players[seat].money());

        if level.current_bet > self.current_bet {
            self.requeue_after(players, seat, level.current_bet);
        }
        if level.reopens {
            self.last_raiser = Some(seat);
            for (s, flag) in self.can_raise.iter_mut().enumerate() {
                if s != seat {
                    *flag = true;
                }
            }
        }
        self.current_bet = level.current_bet;
        self.min_raise = level.min_raise;
        Ok(level)
    }

    /// Everyone short of the new bet acts again, in seating order after `actor`.
    fn requeue_after(&mut self, players: &[Player], actor: usize, new_bet: Chips) {
        let n = players.len();
        self.queue = (1..n)
            .map(|i| (actor + i) % n)
            .filter(|&s| players[s].can_act() && players[s].current_bet() < new_bet)
            .collect();
    }

    /// Drive the street to completion.
    pub fn run(
        &mut self,
        players: &mut [Player],
        source: &mut dyn MoveSource,
    ) -> Result<RoundEnd, BettingError> {
        while let Some(seat) = self.next_seat(players) {
            self.act(players, seat, source)?;
        }
        let mut live = players.iter().enumerate().filter(|(_, p)| !p.is_folded());
        match (live.next(), live.next()) {
            (Some((winner, _)), None) => Ok(RoundEnd::Uncontested { winner }),
            _ => Ok(RoundEnd::Closed),
        }
    }
}

/// Players still holding cards.
pub fn live_count(players: &[Player]) -> usize {
    players.iter().filter(|p| !p.is_folded()).count()
}

fn others_can_act(players: &[Player], seat: usize) -> bool {
    players.iter().enumerate().any(|(s, p)| s != seat && p.can_act())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ScriptedMoves;

    fn table(stacks: &[Chips]) -> Vec<Player> {
        stacks.iter().enumerate().map(|(i, &m)| Player::new(format!("P{i}"), m)).collect()
    }

    #[test]
    fn examine_move_levels() {
        let raise = examine_move(0, Move::Raise(500), 100, 100).unwrap();
        assert_eq!((raise.current_bet, raise.min_raise, raise.reopens), (500, 400, true));

        let short_call = examine_move(0, Move::AllIn(80), 100, 100).unwrap();
        assert_eq!((short_call.current_bet, short_call.min_raise), (100, 100));

        let full = examine_move(0, Move::AllIn(900), 500, 400).unwrap();
        assert_eq!((full.current_bet, full.min_raise, full.reopens), (900, 400, true));
    }

    #[test]
    fn inconsistent_moves_are_rejected() {
        assert!(matches!(
            examine_move(2, Move::Raise(550), 500, 400),
            Err(BettingError::InvalidMove { seat: 2, .. })
        ));
        assert!(examine_move(1, Move::Call(300), 500, 400).is_err());
    }

    #[test]
    fn check_when_owing_is_invalid() {
        let mut players = table(&[1000, 1000]);
        let mut round = BettingRound::new(Street::Flop, &players, 0, 0, 20).unwrap();
        round.apply_move(&mut players, 0, Move::Raise(100)).unwrap();
        let err = round.apply_move(&mut players, 1, Move::Check).unwrap_err();
        assert!(matches!(err, BettingError::InvalidMove { seat: 1, .. }));
    }

    #[test]
    fn parse_amount_inputs() {
        assert_eq!(parse_amount(" 250 "), Some(250));
        assert_eq!(parse_amount("fold"), Some(-1));
        assert_eq!(parse_amount("ALLIN"), Some(SHOVE));
        assert_eq!(parse_amount("twenty"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn everyone_checks_through() {
        let mut players = table(&[500, 500, 500]);
        let mut round = BettingRound::new(Street::Flop, &players, 1, 0, 20).unwrap();
        let mut src = ScriptedMoves::new([Some(0), Some(0), Some(0)]);
        assert_eq!(round.run(&mut players, &mut src).unwrap(), RoundEnd::Closed);
        assert_eq!(src.remaining(), 0);
        assert!(players.iter().all(|p| p.action() == Some(Move::Check)));
    }

    #[test]
    fn raise_requeues_players_who_already_acted() {
        let mut players = table(&[1000, 1000, 1000]);
        let mut round = BettingRound::new(Street::Flop, &players, 0, 0, 20).unwrap();
        // P0 checks, P1 bets 100, P2 calls, P0 calls
        let mut src = ScriptedMoves::new([Some(0), Some(100), Some(100), Some(100)]);
        round.run(&mut players, &mut src).unwrap();
        assert_eq!(src.remaining(), 0);
        assert!(players.iter().all(|p| p.current_bet() == 100));
        assert_eq!(round.last_raiser(), Some(1));
    }

    #[test]
    fn last_fold_ends_the_street() {
        let mut players = table(&[1000, 1000, 1000]);
        let mut round = BettingRound::new(Street::Turn, &players, 0, 0, 20).unwrap();
        let mut src = ScriptedMoves::new([Some(200), Some(-1), Some(-1)]);
        assert_eq!(round.run(&mut players, &mut src).unwrap(), RoundEnd::Uncontested { winner: 0 });
    }

    #[test]
    fn lone_player_facing_all_ins_only_calls() {
        let mut players = table(&[1000, 300]);
        let mut round = BettingRound::new(Street::Flop, &players, 1, 0, 20).unwrap();
        let mut src = ScriptedMoves::new([Some(300), Some(300)]);
        round.run(&mut players, &mut src).unwrap();
        assert!(players[1].is_all_in());
        assert_eq!(players[0].current_bet(), 300);
        assert_eq!(src.remaining(), 0);
    }

    #[test]
    fn short_all_in_does_not_reopen_raising() {
        let mut players = table(&[2000, 2000, 600, 2000]);
        let mut round = BettingRound::new(Street::Flop, &players, 0, 0, 100).unwrap();
        round.apply_move(&mut players, 0, Move::Raise(100)).unwrap();
        round.apply_move(&mut players, 1, Move::Raise(500)).unwrap();
        round.apply_move(&mut players, 2, Move::AllIn(600)).unwrap();
        assert_eq!(round.current_bet(), 600);
        assert_eq!(round.min_raise(), 300);

        let ctx = round.context(&players, 3).unwrap();
        assert_eq!(ctx.min_raise_to(), 900);
        assert_eq!(ctx.to_call, 600);

        // D calls; B already raised at the full level so may only call the extra 100
        round.apply_move(&mut players, 3, Move::Call(600)).unwrap();
        round.apply_move(&mut players, 0, Move::Call(600)).unwrap();
        assert_eq!(round.next_seat(&players), Some(1));
        assert!(!round.can_raise(1));
        let mv = players[1].resolve(Some(1200), 600, 300, round.can_raise(1));
        assert_eq!(mv, Move::Call(600));
    }
}
