use holdem_rs::cards::{Card, Rank, Suit};
use holdem_rs::evaluator::{evaluate_cards, evaluate_five, HandRank, RankClass};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

fn any_rank() -> impl Strategy<Value = Rank> {
    (0u8..13).prop_map(|i| Rank::from_index(i).expect("index in range"))
}

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Clubs), Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Spades)]
}

fn any_card() -> impl Strategy<Value = Card> {
    (any_rank(), any_suit()).prop_map(|(r, s)| Card::new(r, s))
}

/// `n` distinct cards.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::btree_set(any_card(), n).prop_map(|s| s.into_iter().collect())
}

fn five(v: &[Card]) -> [Card; 5] {
    [v[0], v[1], v[2], v[3], v[4]]
}

fn rank(r: u8) -> Rank {
    Rank::from_index(r).expect("index in range")
}

/// Straight topped by rank index `top`; 3 is the wheel.
fn straight_cards(top: u8) -> [Card; 5] {
    let ranks: [u8; 5] =
        if top == 3 { [12, 0, 1, 2, 3] } else { [top - 4, top - 3, top - 2, top - 1, top] };
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    let mut out = [Card::new(Rank::Two, Suit::Clubs); 5];
    for i in 0..5 {
        out[i] = Card::new(rank(ranks[i]), suits[i]);
    }
    out
}

fn flush_rank_set() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::btree_set(0u8..13, 5)
        .prop_filter("non-straight ranks", |set: &BTreeSet<u8>| {
            let vals: Vec<u8> = set.iter().copied().collect();
            let is_wheel = vals == [0, 1, 2, 3, 12];
            let is_straight = vals.windows(2).all(|w| w[1] == w[0] + 1);
            !(is_straight || is_wheel)
        })
        .prop_map(|set| set.into_iter().rev().collect())
}

proptest! {
    #[test]
    fn ranks_stay_in_range(cards in distinct_cards(5)) {
        let r = evaluate_five(&five(&cards)).unwrap();
        prop_assert!(HandRank::new(r.value()).is_some());
        prop_assert!((0.0..=1.0).contains(&r.percentile()));
    }

    #[test]
    fn hand_order_does_not_matter(cards in distinct_cards(5), shift in 0usize..5) {
        let mut rotated = cards.clone();
        rotated.rotate_left(shift);
        let before = evaluate_five(&five(&cards)).unwrap();
        prop_assert_eq!(before, evaluate_five(&five(&rotated)).unwrap());
    }

    #[test]
    fn seven_card_best_is_at_least_as_good_as_any_five(cards in distinct_cards(7)) {
        let best7 = evaluate_cards(&cards).unwrap();
        // every five-card subset leaves out exactly two of the seven
        for a in 0..7 {
            for b in (a + 1)..7 {
                let rest: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != a && i != b)
                    .map(|(_, &c)| c)
                    .collect();
                prop_assert!(best7.rank <= evaluate_five(&five(&rest)).unwrap());
            }
        }
        prop_assert_eq!(evaluate_five(&best7.best_five).unwrap(), best7.rank);
    }

    #[test]
    fn best_five_is_sorted_high_to_low(cards in distinct_cards(6)) {
        let eval = evaluate_cards(&cards).unwrap();
        prop_assert!(eval.best_five.windows(2).all(|w| w[0].rank() >= w[1].rank()));
    }

    #[test]
    fn straight_ordering_respects_top_card(top_hi in 4u8..=12u8, top_lo in 3u8..=11u8) {
        prop_assume!(top_hi > top_lo);
        let e_hi = evaluate_five(&straight_cards(top_hi)).unwrap();
        let e_lo = evaluate_five(&straight_cards(top_lo)).unwrap();
        prop_assert_eq!(e_hi.class(), RankClass::Straight);
        prop_assert_eq!(e_lo.class(), RankClass::Straight);
        prop_assert!(e_hi.is_stronger_than(e_lo));
    }

    #[test]
    fn flush_kicker_ordering(a in flush_rank_set(), b in flush_rank_set()) {
        let hand = |ranks: &[u8]| {
            let mut out = [Card::new(Rank::Two, Suit::Hearts); 5];
            for (slot, &r) in out.iter_mut().zip(ranks) {
                *slot = Card::new(rank(r), Suit::Hearts);
            }
            out
        };
        let e_a = evaluate_five(&hand(&a)).unwrap();
        let e_b = evaluate_five(&hand(&b)).unwrap();
        prop_assert_eq!(e_a.class(), RankClass::Flush);
        prop_assert_eq!(e_b.class(), RankClass::Flush);

        // both lists are high to low, so lexicographic order is kicker order
        match a.cmp(&b) {
            Ordering::Greater => prop_assert!(e_a.is_stronger_than(e_b)),
            Ordering::Less => prop_assert!(e_b.is_stronger_than(e_a)),
            Ordering::Equal => prop_assert_eq!(e_a, e_b),
        }
    }
}
