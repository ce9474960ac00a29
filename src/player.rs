use crate::hand::HoleCards;
use crate::moves::{raw_amount, Chips, Move, Position, Street};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
}

/// One seat's betting state. `money` survives across hands; everything else
/// is per hand or per street.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) money: Chips,
    pub(crate) current_bet: Chips,
    pub(crate) committed: Chips,
    pub(crate) action: Option<Move>,
    pub(crate) status: PlayerStatus,
    pub(crate) position: Option<Position>,
    pub(crate) hole: Option<HoleCards>,
    history: [Vec<Move>; 4],
}

impl Player {
    pub fn new(name: impl Into<String>, money: Chips) -> Self {
        Self {
            name: name.into(),
            money,
            current_bet: 0,
            committed: 0,
            action: None,
            status: PlayerStatus::Active,
            position: None,
            hole: None,
            history: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chips behind, not counting anything already committed.
    pub fn money(&self) -> Chips {
        self.money
    }

    /// Total committed on the current street.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// Total committed over the whole hand.
    pub fn committed(&self) -> Chips {
        self.committed
    }

    pub fn action(&self) -> Option<Move> {
        self.action
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    /// Still has chips and cards, so may be asked for a decision.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active && self.money > 0
    }

    pub fn history(&self, street: Street) -> &[Move] {
        &self.history[street.index()]
    }

    /// Last move on each street. A fold or all-in is carried onto every
    /// later street, since the player takes no further decisions.
    pub fn last_moves(&self) -> [Option<Move>; 4] {
        let mut out = [None; 4];
        let mut carried: Option<Move> = None;
        for street in Street::ALL {
            let last = self.history[street.index()].last().copied();
            out[street.index()] = last.or(carried);
            if let Some(mv) = last.filter(|m| m.is_terminal()) {
                carried = Some(mv);
            }
        }
        out
    }

    /// Turn a raw amount into a legal move given the street's running bet.
    ///
    /// Rules, in order:
    /// 1. absent, or `0 < amount < current_bet + min_raise` (or a raise when
    ///    raising is closed to this player): call, all-in if short;
    /// 2. `amount >= current_bet + min_raise`: raise to `amount`, all-in if short;
    /// 3. zero with nothing owed: check;
    /// 4. anything else: fold.
    pub fn resolve(
        &self,
        amount: Option<i64>,
        current_bet: Chips,
        min_raise: Chips,
        can_raise: bool,
    ) -> Move {
        let raise_target = raw_amount(current_bet).saturating_add(raw_amount(min_raise));
        let all_in = Move::AllIn(self.current_bet + self.money);
        match amount {
            None => self.call_or_all_in(current_bet, all_in),
            Some(a) if a > 0 && (a < raise_target || !can_raise) => {
                self.call_or_all_in(current_bet, all_in)
            }
            Some(a) if a > 0 => {
                let additional = a.saturating_sub(raw_amount(self.current_bet));
                if additional >= raw_amount(self.money) {
                    all_in
                } else {
                    Move::Raise(self.current_bet + additional.unsigned_abs())
                }
            }
            Some(0) if self.current_bet >= current_bet => Move::Check,
            Some(_) => Move::Fold,
        }
    }

    fn call_or_all_in(&self, current_bet: Chips, all_in: Move) -> Move {
        let additional = current_bet.saturating_sub(self.current_bet);
        if additional >= self.money {
            all_in
        } else {
            Move::Call(current_bet)
        }
    }

    /// Resolve and apply a raw amount in one step.
    pub fn bet(
        &mut self,
        street: Street,
        amount: Option<i64>,
        current_bet: Chips,
        min_raise: Chips,
        can_raise: bool,
    ) -> Move {
        let mv = self.resolve(amount, current_bet, min_raise, can_raise);
        self.commit(street, mv);
        mv
    }

    /// Apply an already validated move: move chips from the stack into the
    /// street commitment and record it.
    pub(crate) fn commit(&mut self, street: Street, mv: Move) {
        match mv {
            Move::Fold => self.status = PlayerStatus::Folded,
            Move::Check => {}
            Move::Call(total) | Move::Raise(total) => self.pay_to(total),
            Move::AllIn(_) => {
                let rest = self.money;
                self.pay(rest);
                self.status = PlayerStatus::AllIn;
            }
        }
        self.action = Some(mv);
        self.history[street.index()].push(mv);
    }

    /// Forced pre-flop post. A stack shorter than the blind goes all-in.
    pub(crate) fn post_blind(&mut self, blind: Chips) -> Move {
        let paid = blind.min(self.money);
        self.pay(paid);
        let mv = if self.money == 0 {
            self.status = PlayerStatus::AllIn;
            Move::AllIn(self.current_bet)
        } else {
            Move::Call(self.current_bet)
        };
        self.action = Some(mv);
        self.history[Street::PreFlop.index()].push(mv);
        mv
    }

    fn pay_to(&mut self, total: Chips) {
        let additional = total.saturating_sub(self.current_bet);
        self.pay(additional);
    }

    fn pay(&mut self, chips: Chips) {
        let chips = chips.min(self.money);
        self.money -= chips;
        self.current_bet += chips;
        self.committed += chips;
    }

    pub(crate) fn award(&mut self, chips: Chips) {
        self.money += chips;
    }

    /// Clear the street commitment once pots have collected it.
    pub fn reset_current_bet(&mut self) {
        self.current_bet = 0;
    }

    pub fn reset_action(&mut self) {
        self.action = None;
    }

    /// Drop every per-hand field; only the name and stack survive.
    pub(crate) fn reset_for_hand(&mut self) {
        self.current_bet = 0;
        self.committed = 0;
        self.action = None;
        self.status = PlayerStatus::Active;
        self.position = None;
        self.hole = None;
        for street in &mut self.history {
            street.clear();
        }
    }

    /// Put the stack back to `money` and clear the hand, used when a hand aborts.
    pub(crate) fn restore(&mut self, money: Chips) {
        self.money = money;
        self.reset_for_hand();
    }
}
