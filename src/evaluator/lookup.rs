//! Prime-product lookup tables mapping every five-card holding to one of the
//! 7462 distinct hand strengths (1 = royal flush, 7462 = seven-high).
//!
//! ```text
//! Straight Flush    10
//! Four of a Kind   156   13 * 12
//! Full House       156   13 * 12
//! Flush           1277   C(13,5) - 10 straight flushes
//! Straight          10
//! Three of a Kind  858   13 * C(12,2)
//! Two Pair         858   C(13,2) * 11
//! One Pair        2860   13 * C(12,3)
//! High Card       1277   C(13,5) - 10 straights
//! ----------------------
//! Total           7462
//! ```

use crate::cards::{prime_product_from_rankbits, PRIMES};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const MAX_STRAIGHT_FLUSH: u16 = 10;
pub const MAX_FOUR_OF_A_KIND: u16 = 166;
pub const MAX_FULL_HOUSE: u16 = 322;
pub const MAX_FLUSH: u16 = 1599;
pub const MAX_STRAIGHT: u16 = 1609;
pub const MAX_THREE_OF_A_KIND: u16 = 2467;
pub const MAX_TWO_PAIR: u16 = 3325;
pub const MAX_PAIR: u16 = 6185;
pub const MAX_HIGH_CARD: u16 = 7462;

/// Rank-bit patterns of the ten straights, royal first, wheel last.
const STRAIGHTS: [u32; 10] = [
    0b1_1111_0000_0000,
    0b0_1111_1000_0000,
    0b0_0111_1100_0000,
    0b0_0011_1110_0000,
    0b0_0001_1111_0000,
    0b0_0000_1111_1000,
    0b0_0000_0111_1100,
    0b0_0000_0011_1110,
    0b0_0000_0001_1111,
    0b1_0000_0000_1111,
];

/// Number of five-bit patterns over 13 bits after the lowest one, C(13,5) - 1.
const FIVE_BIT_PATTERNS_AFTER_FIRST: usize = 1286;

#[derive(Debug)]
pub struct LookupTable {
    flush_lookup: HashMap<u32, u16>,
    unsuited_lookup: HashMap<u32, u16>,
}

impl LookupTable {
    /// The process-wide table, built on first use and read-only afterwards.
    pub fn global() -> &'static LookupTable {
        static TABLE: OnceLock<LookupTable> = OnceLock::new();
        TABLE.get_or_init(LookupTable::build)
    }

    pub fn build() -> Self {
        let mut table = LookupTable {
            flush_lookup: HashMap::with_capacity(1287),
            unsuited_lookup: HashMap::with_capacity(6175),
        };
        table.flushes_and_straights();
        table.multiples();
        log::debug!(
            "built hand lookup tables: {} flush keys, {} unsuited keys",
            table.flush_lookup.len(),
            table.unsuited_lookup.len()
        );
        table
    }

    /// Rank for five same-suited cards keyed by the product of their rank primes.
    pub fn flush(&self, prime_product: u32) -> Option<u16> {
        self.flush_lookup.get(&prime_product).copied()
    }

    pub fn unsuited(&self, prime_product: u32) -> Option<u16> {
        self.unsuited_lookup.get(&prime_product).copied()
    }

    pub fn flush_len(&self) -> usize {
        self.flush_lookup.len()
    }

    pub fn unsuited_len(&self) -> usize {
        self.unsuited_lookup.len()
    }

    fn flushes_and_straights(&mut self) {
        let mut high_cards = Vec::with_capacity(1277);
        let mut bits: u32 = 0b1_1111;
        for _ in 0..FIVE_BIT_PATTERNS_AFTER_FIRST {
            bits = next_bit_permutation(bits);
            if !STRAIGHTS.contains(&bits) {
                high_cards.push(bits);
            }
        }
        // generated low to high; strongest first from here on
        high_cards.reverse();

        for (rank, &sf) in (1..).zip(STRAIGHTS.iter()) {
            self.flush_lookup.insert(prime_product_from_rankbits(sf), rank);
        }
        for (rank, &f) in (MAX_FULL_HOUSE + 1..).zip(high_cards.iter()) {
            self.flush_lookup.insert(prime_product_from_rankbits(f), rank);
        }
        for (rank, &s) in (MAX_FLUSH + 1..).zip(STRAIGHTS.iter()) {
            self.unsuited_lookup.insert(prime_product_from_rankbits(s), rank);
        }
        for (rank, &h) in (MAX_PAIR + 1..).zip(high_cards.iter()) {
            self.unsuited_lookup.insert(prime_product_from_rankbits(h), rank);
        }
    }

    fn multiples(&mut self) {
        let desc: Vec<usize> = (0..PRIMES.len()).rev().collect();
        let p = |i: usize| PRIMES[i];

        let mut rank = MAX_STRAIGHT_FLUSH + 1;
        for &quad in &desc {
            for &kicker in desc.iter().filter(|&&k| k != quad) {
                self.insert_unsuited(p(quad).pow(4) * p(kicker), &mut rank);
            }
        }

        let mut rank = MAX_FOUR_OF_A_KIND + 1;
        for &trips in &desc {
            for &pair in desc.iter().filter(|&&k| k != trips) {
                self.insert_unsuited(p(trips).pow(3) * p(pair).pow(2), &mut rank);
            }
        }

        let mut rank = MAX_STRAIGHT + 1;
        for &trips in &desc {
            let kickers: Vec<usize> = desc.iter().copied().filter(|&k| k != trips).collect();
            for (i, &k1) in kickers.iter().enumerate() {
                for &k2 in &kickers[i + 1..] {
                    self.insert_unsuited(p(trips).pow(3) * p(k1) * p(k2), &mut rank);
                }
            }
        }

        let mut rank = MAX_THREE_OF_A_KIND + 1;
        for (i, &high) in desc.iter().enumerate() {
            for &low in &desc[i + 1..] {
                for &kicker in desc.iter().filter(|&&k| k != high && k != low) {
                    self.insert_unsuited(p(high).pow(2) * p(low).pow(2) * p(kicker), &mut rank);
                }
            }
        }

        let mut rank = MAX_TWO_PAIR + 1;
        for &pair in &desc {
            let kickers: Vec<usize> = desc.iter().copied().filter(|&k| k != pair).collect();
            for (i, &k1) in kickers.iter().enumerate() {
                for (j, &k2) in kickers.iter().enumerate().skip(i + 1) {
                    for &k3 in &kickers[j + 1..] {
                        self.insert_unsuited(p(pair).pow(2) * p(k1) * p(k2) * p(k3), &mut rank);
                    }
                }
            }
        }
    }

    fn insert_unsuited(&mut self, product: u32, rank: &mut u16) {
        self.unsuited_lookup.insert(product, *rank);
        *rank += 1;
    }
}

/// Next integer with the same number of set bits.
fn next_bit_permutation(bits: u32) -> u32 {
    let t = (bits | (bits - 1)) + 1;
    t | ((((t & t.wrapping_neg()) / (bits & bits.wrapping_neg())) >> 1) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_sizes_match_category_counts() {
        let t = LookupTable::build();
        assert_eq!(t.flush_len(), 10 + 1277);
        assert_eq!(t.unsuited_len(), 156 + 156 + 10 + 858 + 858 + 2860 + 1277);
    }

    #[test]
    fn ranks_cover_one_to_7462_exactly_once() {
        let t = LookupTable::build();
        let ranks: HashSet<u16> =
            t.flush_lookup.values().chain(t.unsuited_lookup.values()).copied().collect();
        assert_eq!(ranks.len(), MAX_HIGH_CARD as usize);
        assert_eq!(ranks.iter().min(), Some(&1));
        assert_eq!(ranks.iter().max(), Some(&MAX_HIGH_CARD));
    }

    #[test]
    fn next_bit_permutation_keeps_popcount() {
        let mut bits = 0b1_1111u32;
        for _ in 0..FIVE_BIT_PATTERNS_AFTER_FIRST {
            let next = next_bit_permutation(bits);
            assert!(next > bits);
            assert_eq!(next.count_ones(), 5);
            bits = next;
        }
        assert_eq!(bits, 0b1_1111_0000_0000);
    }

    #[test]
    fn category_boundaries() {
        let t = LookupTable::global();
        // AAAAK, 22223
        assert_eq!(t.unsuited(41u32.pow(4) * 37), Some(MAX_STRAIGHT_FLUSH + 1));
        assert_eq!(t.unsuited(2u32.pow(4) * 3), Some(MAX_FOUR_OF_A_KIND));
        // 75432 is the weakest hand
        assert_eq!(t.unsuited(13 * 7 * 5 * 3 * 2), Some(MAX_HIGH_CARD));
        // wheel straight flush is the tenth rank
        assert_eq!(t.flush(41 * 2 * 3 * 5 * 7), Some(MAX_STRAIGHT_FLUSH));
    }
}
