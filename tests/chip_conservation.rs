use holdem_rs::agents::RandomAgent;
use holdem_rs::config::TableConfig;
use holdem_rs::dealer::Dealer;
use holdem_rs::moves::Action;
use holdem_rs::player::Player;
use holdem_rs::pot::{Contribution, PotManager};
use proptest::prelude::*;

fn street_strategy() -> impl Strategy<Value = Vec<(u64, u8)>> {
    // (committed, 0 = fold, 1 = call/raise, 2 = all-in)
    prop::collection::vec((0u64..500, 0u8..3), 2..7)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_never_creates_or_loses_chips(
        stacks in prop::collection::vec(1u64..3000, 2..7),
        seed in any::<u64>(),
        hands in 1usize..6,
    ) {
        let total: u64 = stacks.iter().sum();
        let players =
            stacks.iter().enumerate().map(|(i, &m)| Player::new(format!("p{i}"), m)).collect();
        let config = TableConfig { seed: Some(seed), ..TableConfig::default() };
        let mut dealer = Dealer::with_players(config, players).unwrap();
        let mut agent = RandomAgent::new(Some(seed ^ 0x5eed));

        let outcomes = dealer.play(&mut agent, &mut (), hands).unwrap();
        for outcome in &outcomes {
            prop_assert!(outcome.total_awarded() > 0);
        }
        prop_assert_eq!(dealer.chips_in_play(), total);
        prop_assert_eq!(dealer.pots().total_chips(), 0);
        prop_assert!(dealer.players().iter().all(|p| p.money() > 0));
    }

    #[test]
    fn pots_hold_exactly_what_was_committed(
        streets in prop::collection::vec(street_strategy(), 1..4),
    ) {
        let seats = streets.iter().map(Vec::len).min().unwrap_or(2);
        let mut pm = PotManager::new();
        let mut folded = vec![false; seats];
        let mut all_in = vec![false; seats];
        let mut committed_total = 0u64;

        for street in &streets {
            let mut contributions = Vec::new();
            for (seat, &(chips, kind)) in street.iter().take(seats).enumerate() {
                if folded[seat] || all_in[seat] {
                    contributions.push(Contribution {
                        seat,
                        committed: 0,
                        action: None,
                        folded: folded[seat],
                    });
                    continue;
                }
                let action = match kind {
                    0 => Action::Fold,
                    1 => Action::Call,
                    _ => Action::AllIn,
                };
                folded[seat] = action == Action::Fold;
                all_in[seat] = action == Action::AllIn;
                committed_total += chips;
                contributions.push(Contribution {
                    seat,
                    committed: chips,
                    action: Some(action),
                    folded: folded[seat],
                });
            }
            pm.update_pots(&contributions).unwrap();

            prop_assert_eq!(pm.total_chips(), committed_total);
            for pot in pm.pots() {
                prop_assert!(pot.eligible.iter().all(|&s| !folded[s]));
            }
        }
    }
}
