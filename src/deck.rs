use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Where the dealer draws cards from. A drawn card is never put back within a hand.
pub trait CardSource {
    fn pop(&mut self) -> Option<Card>;

    fn remaining(&self) -> usize;
}

/// A 52-card deck. The top of the deck is the end of the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use holdem_rs::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &[Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades] {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// A standard deck shuffled with the given RNG.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    /// A prearranged deck; `top_first[0]` is the first card dealt.
    ///
    /// ```
    /// use holdem_rs::cards::parse_cards;
    /// use holdem_rs::deck::{CardSource, Deck};
    ///
    /// let mut deck = Deck::from_top(parse_cards("As Kd").unwrap());
    /// assert_eq!(deck.pop().unwrap().to_string(), "As");
    /// ```
    pub fn from_top(top_first: Vec<Card>) -> Self {
        let mut cards = top_first;
        cards.reverse();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw `n` cards; fewer if the deck runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }
}

impl CardSource for Deck {
    fn pop(&mut self) -> Option<Card> {
        self.draw()
    }

    fn remaining(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), 52);
        let unique: HashSet<Card> = d.cards.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::standard();
        let mut d2 = Deck::standard();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1, d2);
        assert_ne!(d1, Deck::standard());
    }

    #[test]
    fn pop_reduces_length_and_never_repeats() {
        let mut d = Deck::standard();
        d.shuffle_seeded(7);
        let mut seen = HashSet::new();
        while let Some(c) = d.pop() {
            assert!(seen.insert(c));
        }
        assert_eq!(seen.len(), 52);
        assert_eq!(d.remaining(), 0);
        assert!(d.pop().is_none());
    }

    #[test]
    fn from_top_deals_in_order() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        let b = Card::new(Rank::Two, Suit::Clubs);
        let mut d = Deck::from_top(vec![a, b]);
        assert_eq!(d.draw_n(2), vec![a, b]);
    }
}
