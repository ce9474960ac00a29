//! Betting vocabulary: action tags, moves with their committed totals,
//! streets and seat positions.

use serde::Serialize;
use std::fmt;

/// Chip counts. A stack never goes negative.
pub type Chips = u64;

/// Most chips one table may hold across stacks and pots. Every stack, bet
/// and pot total fits a raw `i64` amount.
pub const MAX_TABLE_CHIPS: Chips = i64::MAX as Chips;

/// Raw amount that always resolves to all-in.
pub const SHOVE: i64 = i64::MAX;

/// `chips` as a raw move amount, clamped to [`SHOVE`].
pub fn raw_amount(chips: Chips) -> i64 {
    i64::try_from(chips).unwrap_or(SHOVE)
}

/// The tag of a [`Move`], without its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Raise => "Raise",
            Action::AllIn => "All-in",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved player decision. The amount is the player's new total
/// commitment for the street, not the chips added by this move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    Fold,
    Check,
    Call(Chips),
    Raise(Chips),
    AllIn(Chips),
}

impl Move {
    pub const fn action(self) -> Action {
        match self {
            Move::Fold => Action::Fold,
            Move::Check => Action::Check,
            Move::Call(_) => Action::Call,
            Move::Raise(_) => Action::Raise,
            Move::AllIn(_) => Action::AllIn,
        }
    }

    /// Street total committed after this move; zero for fold and check.
    pub const fn amount(self) -> Chips {
        match self {
            Move::Fold | Move::Check => 0,
            Move::Call(a) | Move::Raise(a) | Move::AllIn(a) => a,
        }
    }

    /// True for moves that end the player's participation in later streets.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Move::Fold | Move::AllIn(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Fold | Move::Check => write!(f, "{:<8}", self.action().label()),
            _ => write!(f, "{:<8}{:>6}", self.action().label(), self.amount()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::PreFlop, Street::Flop, Street::Turn, Street::River];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Street::PreFlop => "Pre-Flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }

    /// Board cards dealt when this street opens.
    pub const fn cards_dealt(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub fn next(self) -> Option<Street> {
        Street::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seat role relative to the button for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum Position {
    Btn,
    Sb,
    Bb,
    Utg,
    Utg1,
    Utg2,
    Mp,
    Hj,
    Co,
}

impl Position {
    const LATE: [Position; 5] =
        [Position::Utg1, Position::Utg2, Position::Mp, Position::Hj, Position::Co];

    /// Role of the seat `offset` places left of the button at a table of `n`.
    /// Heads-up the button posts the small blind and keeps the `Btn` label.
    ///
    /// ```
    /// use holdem_rs::moves::Position;
    ///
    /// assert_eq!(Position::for_offset(1, 2), Position::Bb);
    /// assert_eq!(Position::for_offset(3, 6), Position::Utg);
    /// assert_eq!(Position::for_offset(5, 6), Position::Co);
    /// ```
    pub fn for_offset(offset: usize, n: usize) -> Position {
        let offset = if n == 0 { 0 } else { offset % n };
        if n <= 2 {
            return if offset == 0 { Position::Btn } else { Position::Bb };
        }
        match offset {
            0 => Position::Btn,
            1 => Position::Sb,
            2 => Position::Bb,
            3 => Position::Utg,
            _ => {
                // seats after UTG take the tail of the late-position list
                let after_utg = n - 4;
                let start = Self::LATE.len().saturating_sub(after_utg);
                Self::LATE
                    .get(start + offset - 4)
                    .copied()
                    .unwrap_or(Position::Co)
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Position::Btn => "BTN",
            Position::Sb => "SB",
            Position::Bb => "BB",
            Position::Utg => "UTG",
            Position::Utg1 => "UTG1",
            Position::Utg2 => "UTG2",
            Position::Mp => "MP",
            Position::Hj => "HJ",
            Position::Co => "CO",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_amounts_and_tags() {
        assert_eq!(Move::Raise(500).amount(), 500);
        assert_eq!(Move::Check.amount(), 0);
        assert_eq!(Move::AllIn(600).action(), Action::AllIn);
        assert!(Move::Fold.is_terminal());
        assert!(!Move::Call(20).is_terminal());
    }

    #[test]
    fn move_display_is_column_aligned() {
        assert_eq!(Move::Call(100).to_string(), "Call       100");
        assert_eq!(Move::Fold.to_string(), "Fold    ");
    }

    #[test]
    fn streets_advance_in_order() {
        assert_eq!(Street::PreFlop.next(), Some(Street::Flop));
        assert_eq!(Street::River.next(), None);
        assert_eq!(Street::Flop.cards_dealt(), 3);
        assert_eq!(Street::PreFlop.to_string(), "Pre-Flop");
    }

    #[test]
    fn positions_for_full_ring() {
        let roles: Vec<&str> = (0..9).map(|o| Position::for_offset(o, 9).label()).collect();
        assert_eq!(roles, ["BTN", "SB", "BB", "UTG", "UTG1", "UTG2", "MP", "HJ", "CO"]);
    }

    #[test]
    fn positions_short_handed() {
        let roles: Vec<&str> = (0..3).map(|o| Position::for_offset(o, 3).label()).collect();
        assert_eq!(roles, ["BTN", "SB", "BB"]);
        let roles: Vec<&str> = (0..5).map(|o| Position::for_offset(o, 5).label()).collect();
        assert_eq!(roles, ["BTN", "SB", "BB", "UTG", "CO"]);
        assert_eq!(Position::for_offset(0, 2), Position::Btn);
    }
}
