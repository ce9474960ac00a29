use crate::cards::{parse_cards, Card, CardParseError};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const MAX_BOARD: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("{0} dealt twice as hole cards")]
    PairedHoleCard(Card),
    #[error("a board holds at most {MAX_BOARD} cards, got {0}")]
    BoardOverflow(usize),
    #[error("{0} appears twice on the board")]
    RepeatedBoardCard(Card),
    #[error("{0} is both a hole card and a board card")]
    SharedCard(Card),
    #[error("need two hole cards, got {0}")]
    HoleCount(usize),
    #[error(transparent)]
    Parse(#[from] CardParseError),
}

fn first_repeat(cards: &[Card]) -> Option<Card> {
    let mut seen = HashSet::with_capacity(cards.len());
    cards.iter().copied().find(|&c| !seen.insert(c))
}

/// A player's two private cards, held for the lifetime of one hand.
///
/// ```
/// use holdem_rs::hand::HoleCards;
///
/// let hole: HoleCards = "A♠ K♠".parse().unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards([Card; 2]);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            Err(HandError::PairedHoleCard(a))
        } else {
            Ok(Self([a, b]))
        }
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match *slice {
            [a, b] => Self::try_new(a, b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0[0]
    }

    pub fn second(&self) -> Card {
        self.0[1]
    }

    pub fn as_array(&self) -> [Card; 2] {
        self.0
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0[0], self.0[1])
    }
}

impl FromStr for HoleCards {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

/// Community cards. Grows 0 -> 3 -> 4 -> 5 within a hand and never shrinks
/// until the table is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    dealt: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self { dealt: Vec::with_capacity(MAX_BOARD) }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > MAX_BOARD {
            return Err(HandError::BoardOverflow(cards.len()));
        }
        match first_repeat(&cards) {
            Some(c) => Err(HandError::RepeatedBoardCard(c)),
            None => Ok(Self { dealt: cards }),
        }
    }

    pub fn len(&self) -> usize {
        self.dealt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dealt.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.dealt.len() == MAX_BOARD
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.dealt
    }

    pub(crate) fn push(&mut self, card: Card) -> Result<(), HandError> {
        if self.is_complete() {
            return Err(HandError::BoardOverflow(MAX_BOARD + 1));
        }
        if self.dealt.contains(&card) {
            return Err(HandError::RepeatedBoardCard(card));
        }
        self.dealt.push(card);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.dealt.clear();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in 0..MAX_BOARD {
            if slot > 0 {
                f.write_str(" ")?;
            }
            match self.dealt.get(slot) {
                Some(card) => write!(f, "{card}")?,
                None => f.write_str("??")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_new(parse_cards(s)?)
    }
}

/// Hole cards and board together: at most five board cards and no card seen
/// twice anywhere.
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > MAX_BOARD {
        return Err(HandError::BoardOverflow(board.len()));
    }
    if let Some(c) = first_repeat(board.as_slice()) {
        return Err(HandError::RepeatedBoardCard(c));
    }
    if let Some(&c) = board.as_slice().iter().find(|&&c| hole.contains(c)) {
        return Err(HandError::SharedCard(c));
    }
    if hole.first() == hole.second() {
        return Err(HandError::PairedHoleCard(hole.first()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_are_two_different_cards() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(HoleCards::try_new(ace, ace), Err(HandError::PairedHoleCard(ace)));
        assert_eq!(HoleCards::from_slice(&[ace]), Err(HandError::HoleCount(1)));
        assert!(matches!("As".parse::<HoleCards>(), Err(HandError::HoleCount(1))));
        assert!(matches!("Xs Kd".parse::<HoleCards>(), Err(HandError::Parse(_))));
    }

    #[test]
    fn dealing_onto_the_board_stops_at_five() {
        let mut b: Board = "2c 3c 4c 5c".parse().unwrap();
        let two = Card::new(Rank::Two, Suit::Clubs);
        assert_eq!(b.push(two), Err(HandError::RepeatedBoardCard(two)));
        b.push(Card::new(Rank::Six, Suit::Clubs)).unwrap();
        assert!(b.is_complete());
        assert_eq!(b.push(Card::new(Rank::Ace, Suit::Spades)), Err(HandError::BoardOverflow(6)));
    }

    #[test]
    fn parsed_boards_are_checked() {
        assert!(matches!("2c 2c".parse::<Board>(), Err(HandError::RepeatedBoardCard(_))));
        assert_eq!("2c 3c 4c 5c 6c 7c".parse::<Board>(), Err(HandError::BoardOverflow(6)));
    }

    #[test]
    fn shared_card_is_reported() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "2c As 3c".parse().unwrap();
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(validate_holdem(&hole, &board), Err(HandError::SharedCard(ace)));
    }

    #[test]
    fn undealt_slots_show_as_question_marks() {
        let board: Board = "As Kd 2c".parse().unwrap();
        assert_eq!(board.to_string(), "As Kd 2c ?? ??");
        assert_eq!(Board::new().to_string(), "?? ?? ?? ?? ??");
    }
}
