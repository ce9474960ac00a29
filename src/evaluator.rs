//! Hand strength evaluation over the prime-product lookup tables.
//!
//! Every five-card holding maps to a [`HandRank`] in `1..=7462`; lower is
//! stronger and equal ranks are exact ties. Hold'em hands with three, four or
//! five board cards are scored by taking the best rank over every five-card
//! subset.

pub(crate) mod combinations;
pub mod lookup;

use crate::cards::{prime_product_from_hand, prime_product_from_rankbits, Card};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use combinations::IndexCombinations;
use core::cmp::Ordering;
use lookup::{
    LookupTable, MAX_FLUSH, MAX_FOUR_OF_A_KIND, MAX_FULL_HOUSE, MAX_HIGH_CARD, MAX_PAIR,
    MAX_STRAIGHT, MAX_STRAIGHT_FLUSH, MAX_THREE_OF_A_KIND, MAX_TWO_PAIR,
};
use std::collections::HashSet;
use std::fmt;

const SUIT_FIELD: u32 = 0xF000;
const MIN_BOARD: usize = 3;
const MAX_CARDS: usize = 7;

/// Hand strength in `1..=7462`. Lower is stronger; 1 is a royal flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(u16);

impl HandRank {
    pub const BEST: HandRank = HandRank(1);
    pub const WORST: HandRank = HandRank(MAX_HIGH_CARD);

    pub fn new(value: u16) -> Option<Self> {
        (1..=MAX_HIGH_CARD).contains(&value).then_some(HandRank(value))
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub fn class(self) -> RankClass {
        RankClass::from_rank(self)
    }

    /// Share of the 7462 strengths this hand beats: 1.0 for a royal flush,
    /// 0.0 for the worst high card.
    pub fn percentile(self) -> f64 {
        f64::from(MAX_HIGH_CARD - self.0) / f64::from(MAX_HIGH_CARD - 1)
    }

    pub fn is_stronger_than(self, other: HandRank) -> bool {
        self.0 < other.0
    }

    /// Class name, with the top straight flush called out as a royal flush.
    pub fn describe(self) -> &'static str {
        if self == HandRank::BEST {
            "Royal Flush"
        } else {
            self.class().name()
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.describe(), self.0)
    }
}

/// The nine traditional categories, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum RankClass {
    StraightFlush = 1,
    FourOfAKind = 2,
    FullHouse = 3,
    Flush = 4,
    Straight = 5,
    ThreeOfAKind = 6,
    TwoPair = 7,
    Pair = 8,
    HighCard = 9,
}

impl RankClass {
    pub fn from_rank(rank: HandRank) -> Self {
        const THRESHOLDS: [(u16, RankClass); 8] = [
            (MAX_STRAIGHT_FLUSH, RankClass::StraightFlush),
            (MAX_FOUR_OF_A_KIND, RankClass::FourOfAKind),
            (MAX_FULL_HOUSE, RankClass::FullHouse),
            (MAX_FLUSH, RankClass::Flush),
            (MAX_STRAIGHT, RankClass::Straight),
            (MAX_THREE_OF_A_KIND, RankClass::ThreeOfAKind),
            (MAX_TWO_PAIR, RankClass::TwoPair),
            (MAX_PAIR, RankClass::Pair),
        ];
        THRESHOLDS
            .iter()
            .find(|(max, _)| rank.value() <= *max)
            .map_or(RankClass::HighCard, |&(_, class)| class)
    }

    /// 1 for a straight flush through 9 for high card.
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            RankClass::StraightFlush => "Straight Flush",
            RankClass::FourOfAKind => "Four of a Kind",
            RankClass::FullHouse => "Full House",
            RankClass::Flush => "Flush",
            RankClass::Straight => "Straight",
            RankClass::ThreeOfAKind => "Three of a Kind",
            RankClass::TwoPair => "Two Pair",
            RankClass::Pair => "Pair",
            RankClass::HighCard => "High Card",
        }
    }
}

impl fmt::Display for RankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn rank_to_string(rank: HandRank) -> &'static str {
    rank.class().name()
}

pub fn percentile(rank: HandRank) -> f64 {
    rank.percentile()
}

/// Best five-card result for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Evaluation {
    pub rank: HandRank,
    pub class: RankClass,
    /// Sorted high to low.
    pub best_five: [Card; 5],
}

impl Evaluation {
    pub fn rank_string(&self) -> &'static str {
        self.class.name()
    }

    pub fn percentile(&self) -> f64 {
        self.rank.percentile()
    }

    /// `Greater` when `self` is the stronger hand.
    pub fn cmp_strength(&self, other: &Evaluation) -> Ordering {
        other.rank.cmp(&self.rank)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: {0}")]
    NotEnoughCards(usize),
    #[error("too many cards to evaluate: {0}")]
    TooManyCards(usize),
    #[error("duplicate card in evaluation set")]
    DuplicateCards,
    #[error("no rank for prime product {0}")]
    UnrankedCombination(u32),
}

/// Rank exactly five cards.
///
/// Same suit bits across all five means a flush, keyed by the product of the
/// rank bits; anything else is keyed by the product of the card primes.
pub fn evaluate_five(cards: &[Card; 5]) -> Result<HandRank, EvalError> {
    let table = LookupTable::global();
    let suits = cards.iter().fold(SUIT_FIELD, |acc, c| acc & c.raw());
    let (product, rank) = if suits != 0 {
        let rankbits = cards.iter().fold(0, |acc, c| acc | c.bit_rank());
        let product = prime_product_from_rankbits(rankbits);
        (product, table.flush(product))
    } else {
        let product = prime_product_from_hand(cards);
        (product, table.unsuited(product))
    };
    rank.map(HandRank).ok_or(EvalError::UnrankedCombination(product))
}

/// Best hand among five to seven distinct cards.
pub fn evaluate_cards(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards(cards.len()));
    }
    if cards.len() > MAX_CARDS {
        return Err(EvalError::TooManyCards(cards.len()));
    }
    let unique: HashSet<Card> = cards.iter().copied().collect();
    if unique.len() != cards.len() {
        return Err(EvalError::DuplicateCards);
    }

    let mut best: Option<(HandRank, [Card; 5])> = None;
    for idx in IndexCombinations::<5>::new(cards.len()) {
        let five = idx.map(|i| cards[i]);
        let rank = evaluate_five(&five)?;
        if best.map_or(true, |(b, _)| rank < b) {
            best = Some((rank, five));
        }
    }
    let (rank, mut best_five) = best.ok_or(EvalError::NotEnoughCards(cards.len()))?;
    best_five.sort_by(|a, b| b.cmp(a));
    Ok(Evaluation { rank, class: rank.class(), best_five })
}

/// Evaluate hole cards against a board of three, four or five cards.
///
/// ```
/// use holdem_rs::evaluator::{evaluate, RankClass};
/// use holdem_rs::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "Qs Js Ts".parse().unwrap();
/// let eval = evaluate(&hole, &board).unwrap();
/// assert_eq!(eval.rank.value(), 1);
/// assert_eq!(eval.class, RankClass::StraightFlush);
/// assert_eq!(eval.rank.describe(), "Royal Flush");
/// assert_eq!(eval.percentile(), 1.0);
/// ```
pub fn evaluate(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    if board.len() < MIN_BOARD {
        return Err(EvalError::NotEnoughCards(board.len() + 2));
    }
    let mut cards = Vec::with_capacity(MAX_CARDS);
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    evaluate_cards(&cards)
}

/// `Greater` when `a` holds the stronger hand on `board`.
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let ea = evaluate(a, board)?;
    let eb = evaluate(b, board)?;
    Ok(ea.cmp_strength(&eb))
}
