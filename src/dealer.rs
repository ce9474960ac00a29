//! Hand orchestration: blinds, dealing, the four betting rounds, pot
//! building, showdown and bust-outs.
//!
//! The dealer owns every player and the pots for the length of a hand. Any
//! error aborts the hand: stacks are put back to what they were when the
//! hand started and all per-hand state is cleared.

use crate::agents::MoveSource;
use crate::betting::{live_count, BettingError, BettingRound};
use crate::cards::{card_list_to_pretty_str, Card};
use crate::config::{ConfigError, TableConfig};
use crate::deck::{CardSource, Deck};
use crate::evaluator::{evaluate, EvalError, HandRank, RankClass};
use crate::hand::{Board, HandError, HoleCards};
use crate::moves::{Chips, Move, Position, Street, MAX_TABLE_CHIPS};
use crate::player::Player;
use crate::pot::{Contribution, PotAward, PotError, PotManager};
use crate::snapshot::{DisplaySink, TableSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DealerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Betting(#[from] BettingError),
    #[error(transparent)]
    Pot(#[from] PotError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error("need at least two players with chips, have {0}")]
    NotEnoughPlayers(usize),
    #[error("table seats at most {max} players, got {got}")]
    TooManyPlayers { max: usize, got: usize },
    #[error("the deck ran out of cards")]
    DeckExhausted,
    #[error("stacks add up to more than {MAX_TABLE_CHIPS} chips")]
    TooManyChips,
}

/// One contender's hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ShowdownEntry {
    pub seat: usize,
    pub name: String,
    pub rank: u16,
    pub class: String,
    /// High to low.
    pub best_five: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct HandOutcome {
    pub hand_number: u64,
    pub board: Vec<String>,
    /// Empty when everyone else folded.
    pub showdown: Vec<ShowdownEntry>,
    pub awards: Vec<PotAward>,
    /// Names of the players who won chips, in seat order.
    pub winners: Vec<String>,
    /// Names of the players removed after the hand.
    pub busted: Vec<String>,
}

impl HandOutcome {
    pub fn total_awarded(&self) -> Chips {
        self.awards.iter().flat_map(|a| a.shares.iter().map(|&(_, c)| c)).sum()
    }
}

#[derive(Debug)]
pub struct Dealer {
    config: TableConfig,
    players: Vec<Player>,
    deck: Deck,
    board: Board,
    pots: PotManager,
    button: usize,
    street: Option<Street>,
    hand_number: u64,
    rng: ChaCha8Rng,
}

impl Dealer {
    /// Seat `names` with the configured starting stack, button on the first seat.
    pub fn new<I, S>(config: TableConfig, names: I) -> Result<Self, DealerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<Player> =
            names.into_iter().map(|n| Player::new(n, config.starting_stack)).collect();
        Self::with_players(config, players)
    }

    /// Seat players with their own stacks. Seats without chips are dropped.
    pub fn with_players(
        config: TableConfig,
        mut players: Vec<Player>,
    ) -> Result<Self, DealerError> {
        config.validate()?;
        players.retain(|p| p.money() > 0);
        if players.len() < 2 {
            return Err(DealerError::NotEnoughPlayers(players.len()));
        }
        if players.len() > config.max_players {
            return Err(DealerError::TooManyPlayers { max: config.max_players, got: players.len() });
        }
        let on_table = players.iter().try_fold(0, |acc: Chips, p| acc.checked_add(p.money()));
        if on_table.map_or(true, |total| total > MAX_TABLE_CHIPS) {
            return Err(DealerError::TooManyChips);
        }
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Ok(Self {
            config,
            players,
            deck: Deck::standard(),
            board: Board::new(),
            pots: PotManager::new(),
            button: 0,
            street: None,
            hand_number: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pots(&self) -> &PotManager {
        &self.pots
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn street(&self) -> Option<Street> {
        self.street
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// Chips in stacks plus chips in the pots.
    pub fn chips_in_play(&self) -> Chips {
        self.players.iter().map(|p| p.money()).sum::<Chips>() + self.pots.total_chips()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(
            self.hand_number,
            self.street,
            &self.board,
            &self.players,
            &self.pots,
        )
    }

    /// Fresh unshuffled deck, empty board, no hole cards, no street bets.
    pub fn reset_deck(&mut self) {
        self.deck = Deck::standard();
        self.board.clear();
        self.street = None;
        for p in &mut self.players {
            p.reset_for_hand();
        }
    }

    pub fn reset_pot(&mut self) {
        self.pots.reset_pot();
    }

    /// Play one hand with a freshly shuffled deck.
    pub fn play_hand(
        &mut self,
        moves: &mut dyn MoveSource,
        sink: &mut dyn DisplaySink,
    ) -> Result<HandOutcome, DealerError> {
        self.reset_deck();
        self.deck.shuffle_with(&mut self.rng);
        let mut deck = std::mem::replace(&mut self.deck, Deck::standard());
        let result = self.play_hand_with_deck(&mut deck, moves, sink);
        if result.is_ok() {
            self.deck = deck;
        }
        result
    }

    /// Play one hand drawing from `cards`; useful for prearranged decks.
    pub fn play_hand_with_deck(
        &mut self,
        cards: &mut dyn CardSource,
        moves: &mut dyn MoveSource,
        sink: &mut dyn DisplaySink,
    ) -> Result<HandOutcome, DealerError> {
        let funded = self.players.iter().filter(|p| p.money() > 0).count();
        if funded < 2 {
            return Err(DealerError::NotEnoughPlayers(funded));
        }
        let stacks: Vec<Chips> = self.players.iter().map(|p| p.money()).collect();
        match self.run_hand(cards, moves, sink) {
            Ok(mut outcome) => {
                outcome.busted = self.finish_hand();
                Ok(outcome)
            }
            Err(e) => {
                log::warn!("hand #{} aborted: {e}", self.hand_number);
                for (p, &money) in self.players.iter_mut().zip(&stacks) {
                    p.restore(money);
                }
                self.reset_deck();
                self.reset_pot();
                Err(e)
            }
        }
    }

    /// Play until one player is left or `max_hands` have been dealt.
    pub fn play(
        &mut self,
        moves: &mut dyn MoveSource,
        sink: &mut dyn DisplaySink,
        max_hands: usize,
    ) -> Result<Vec<HandOutcome>, DealerError> {
        let mut outcomes = Vec::new();
        while self.players.len() >= 2 && outcomes.len() < max_hands {
            outcomes.push(self.play_hand(moves, sink)?);
        }
        Ok(outcomes)
    }

    fn run_hand(
        &mut self,
        cards: &mut dyn CardSource,
        moves: &mut dyn MoveSource,
        sink: &mut dyn DisplaySink,
    ) -> Result<HandOutcome, DealerError> {
        self.board.clear();
        self.reset_pot();
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.hand_number += 1;
        self.street = Some(Street::PreFlop);
        self.assign_positions();
        log::info!(
            "hand #{}: {} players, button {}",
            self.hand_number,
            self.players.len(),
            self.players[self.button].name()
        );

        let (sb, bb) = self.blind_seats();
        let sb_post = self.players[sb].post_blind(self.config.small_blind);
        let bb_post = self.players[bb].post_blind(self.config.big_blind);
        log::debug!(
            "blinds: {} {}, {} {}",
            self.players[sb].name(),
            sb_post,
            self.players[bb].name(),
            bb_post
        );
        self.deal_hole_cards(cards)?;

        for street in Street::ALL {
            if street != Street::PreFlop {
                self.open_street(street, cards)?;
            }
            sink.show(&self.snapshot());

            let (first, current_bet) = match street {
                Street::PreFlop => {
                    let first = if self.players.len() == 2 { sb } else { self.next_seat(bb) };
                    (first, sb_post.amount().max(bb_post.amount()))
                }
                _ => (self.next_seat(self.button), 0),
            };
            let bb_size = self.config.big_blind;
            let mut round = BettingRound::new(street, &self.players, first, current_bet, bb_size)?;
            round.run(&mut self.players, moves)?;
            self.collect_street()?;

            if live_count(&self.players) <= 1 {
                break;
            }
        }

        let outcome = self.showdown()?;
        self.street = None;
        sink.show(&self.snapshot());
        Ok(outcome)
    }

    fn assign_positions(&mut self) {
        let n = self.players.len();
        for offset in 0..n {
            let seat = (self.button + offset) % n;
            self.players[seat].position = Some(Position::for_offset(offset, n));
        }
    }

    /// Heads-up the button posts the small blind.
    fn blind_seats(&self) -> (usize, usize) {
        if self.players.len() == 2 {
            (self.button, self.next_seat(self.button))
        } else {
            let sb = self.next_seat(self.button);
            (sb, self.next_seat(sb))
        }
    }

    fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    /// Two passes round the table starting left of the button.
    fn deal_hole_cards(&mut self, cards: &mut dyn CardSource) -> Result<(), DealerError> {
        let n = self.players.len();
        let mut dealt: Vec<Vec<Card>> = vec![Vec::with_capacity(2); n];
        for _ in 0..2 {
            for offset in 1..=n {
                let seat = (self.button + offset) % n;
                dealt[seat].push(cards.pop().ok_or(DealerError::DeckExhausted)?);
            }
        }
        for (p, hole) in self.players.iter_mut().zip(dealt) {
            p.hole = Some(HoleCards::from_slice(&hole)?);
        }
        Ok(())
    }

    fn open_street(
        &mut self,
        street: Street,
        cards: &mut dyn CardSource,
    ) -> Result<(), DealerError> {
        for _ in 0..street.cards_dealt() {
            let card = cards.pop().ok_or(DealerError::DeckExhausted)?;
            self.board.push(card)?;
        }
        for p in &mut self.players {
            p.reset_current_bet();
            p.reset_action();
        }
        self.street = Some(street);
        log::debug!("{}: {}", street, self.board);
        Ok(())
    }

    fn collect_street(&mut self) -> Result<(), DealerError> {
        let street: Vec<Contribution> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| Contribution {
                seat,
                committed: p.current_bet(),
                action: p.action().map(Move::action),
                folded: p.is_folded(),
            })
            .collect();
        self.pots.update_pots(&street)?;
        Ok(())
    }

    /// Seats from the first left of the button, all the way round.
    fn payout_order(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..=n).map(|i| (self.button + i) % n).collect()
    }

    fn showdown(&mut self) -> Result<HandOutcome, DealerError> {
        let live: Vec<usize> =
            (0..self.players.len()).filter(|&s| !self.players[s].is_folded()).collect();
        let mut showdown = Vec::new();
        let mut ranks: Vec<Option<HandRank>> = vec![None; self.players.len()];

        if live.len() == 1 {
            ranks[live[0]] = Some(HandRank::WORST);
        } else {
            for &seat in &live {
                let p = &self.players[seat];
                let hole = p.hole().ok_or(HandError::HoleCount(0))?;
                let eval = evaluate(&hole, &self.board)?;
                ranks[seat] = Some(eval.rank);
                log::info!(
                    "{}: {} {} ({})",
                    p.name(),
                    card_list_to_pretty_str(&eval.best_five),
                    eval.rank.describe(),
                    eval.rank.value()
                );
                showdown.push(ShowdownEntry {
                    seat,
                    name: p.name().to_string(),
                    rank: eval.rank.value(),
                    class: class_label(eval.rank, eval.class),
                    best_five: eval.best_five.iter().map(|c| c.to_string()).collect(),
                });
            }
        }

        let order = self.payout_order();
        let awards = self.pots.distribute(|s| ranks.get(s).copied().flatten(), &order);
        let mut won = vec![0 as Chips; self.players.len()];
        for award in &awards {
            for &(seat, chips) in &award.shares {
                won[seat] += chips;
            }
        }
        for (p, &chips) in self.players.iter_mut().zip(&won) {
            p.award(chips);
        }
        let winners: Vec<String> = won
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, _)| self.players[s].name().to_string())
            .collect();
        for (s, &c) in won.iter().enumerate().filter(|&(_, &c)| c > 0) {
            log::info!("{} wins {c}", self.players[s].name());
        }
        self.pots.reset_pot();

        Ok(HandOutcome {
            hand_number: self.hand_number,
            board: self.board.as_slice().iter().map(|c| c.to_string()).collect(),
            showdown,
            awards,
            winners,
            busted: Vec::new(),
        })
    }

    /// Drop busted players and move the button to the next surviving seat.
    fn finish_hand(&mut self) -> Vec<String> {
        let n = self.players.len();
        let next_button =
            (1..=n).map(|i| (self.button + i) % n).find(|&s| self.players[s].money() > 0);
        let survivors_before = |seat: usize, players: &[Player]| {
            players[..seat].iter().filter(|p| p.money() > 0).count()
        };
        let new_button = next_button.map(|s| survivors_before(s, &self.players)).unwrap_or(0);

        let mut busted = Vec::new();
        self.players.retain(|p| {
            if p.money() == 0 {
                busted.push(p.name().to_string());
                false
            } else {
                true
            }
        });
        for name in &busted {
            log::info!("{name} is out of chips and leaves the table");
        }
        self.button = if self.players.is_empty() { 0 } else { new_button % self.players.len() };
        busted
    }
}

fn class_label(rank: HandRank, class: RankClass) -> String {
    if rank == HandRank::BEST {
        rank.describe().to_string()
    } else {
        class.name().to_string()
    }
}
