//! Main and side pots for one hand.
//!
//! Pots are built street by street. At the close of each street the chips
//! committed on it are cut into layers at every all-in amount; each layer is
//! contested only by the live players who reached it. Folded chips stay in the
//! pots they were put into, but folded players are struck from every pot.

use crate::evaluator::HandRank;
use crate::moves::{Action, Chips, MAX_TABLE_CHIPS};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PotError {
    #[error("seat {seat} committed chips without a supported action")]
    UnsupportedAction { seat: usize },
    #[error("pots hold {held} chips but {expected} were committed")]
    ChipsOutOfBalance { held: Chips, expected: Chips },
    #[error("pots would hold more than {MAX_TABLE_CHIPS} chips")]
    TooManyChips,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: BTreeSet<usize>,
}

impl Pot {
    pub fn new(amount: Chips, eligible: impl IntoIterator<Item = usize>) -> Self {
        Self { amount, eligible: eligible.into_iter().collect() }
    }

    pub fn is_contested(&self) -> bool {
        self.eligible.len() > 1
    }
}

/// One seat's chips for the street that just closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub committed: Chips,
    /// Last action on the street, if the seat did anything.
    pub action: Option<Action>,
    pub folded: bool,
}

impl Contribution {
    fn is_all_in(&self) -> bool {
        self.action == Some(Action::AllIn)
    }
}

/// Chips paid out of one pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct PotAward {
    pub pot: usize,
    pub amount: Chips,
    /// `(seat, chips)` in payout order.
    pub shares: Vec<(usize, Chips)>,
}

impl PotAward {
    pub fn winners(&self) -> impl Iterator<Item = usize> + '_ {
        self.shares.iter().map(|&(seat, _)| seat)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
    collected: Chips,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Main pot first, side pots in creation order.
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn total_chips(&self) -> Chips {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn reset_pot(&mut self) {
        self.pots.clear();
        self.collected = 0;
    }

    /// Fold one street's commitments into the pots.
    ///
    /// ```
    /// use holdem_rs::moves::Action;
    /// use holdem_rs::pot::{Contribution, PotManager};
    ///
    /// let street = [
    ///     Contribution { seat: 0, committed: 100, action: Some(Action::AllIn), folded: false },
    ///     Contribution { seat: 1, committed: 100, action: Some(Action::AllIn), folded: false },
    ///     Contribution { seat: 2, committed: 300, action: Some(Action::Raise), folded: false },
    /// ];
    /// let mut pots = PotManager::new();
    /// pots.update_pots(&street).unwrap();
    /// assert_eq!(pots.pots()[0].amount, 300);
    /// assert_eq!(pots.pots()[1].amount, 200);
    /// assert_eq!(pots.pots()[1].eligible.len(), 1);
    /// ```
    pub fn update_pots(&mut self, street: &[Contribution]) -> Result<(), PotError> {
        if let Some(c) = street.iter().find(|c| c.committed > 0 && c.action.is_none()) {
            return Err(PotError::UnsupportedAction { seat: c.seat });
        }
        let collected = street
            .iter()
            .try_fold(self.collected, |acc, c| acc.checked_add(c.committed))
            .filter(|&total| total <= MAX_TABLE_CHIPS)
            .ok_or(PotError::TooManyChips)?;

        let folded: BTreeSet<usize> = street.iter().filter(|c| c.folded).map(|c| c.seat).collect();
        for pot in &mut self.pots {
            pot.eligible.retain(|s| !folded.contains(s));
        }

        let mut live: Vec<&Contribution> =
            street.iter().filter(|c| !c.folded && c.committed > 0).collect();
        live.sort_by_key(|c| c.committed);
        let top = street.iter().map(|c| c.committed).max().unwrap_or(0);

        let mut levels: Vec<Chips> =
            live.iter().filter(|c| c.is_all_in()).map(|c| c.committed).collect();
        levels.push(top);
        levels.dedup();

        let mut prev = 0;
        for level in levels {
            if level <= prev {
                continue;
            }
            let amount: Chips =
                street.iter().map(|c| c.committed.clamp(prev, level) - prev).sum();
            let eligible: BTreeSet<usize> =
                live.iter().filter(|c| c.committed > prev).map(|c| c.seat).collect();
            log::debug!("pot layer {prev}..{level}: {amount} chips, eligible {eligible:?}");
            self.add_layer(amount, eligible);
            prev = level;
        }
        self.merge_equal_neighbours();

        self.collected = collected;
        let held = self.total_chips();
        if held != self.collected {
            return Err(PotError::ChipsOutOfBalance { held, expected: self.collected });
        }
        Ok(())
    }

    fn add_layer(&mut self, amount: Chips, eligible: BTreeSet<usize>) {
        if amount == 0 {
            return;
        }
        match self.pots.last_mut() {
            Some(last) if last.eligible == eligible || eligible.is_empty() => last.amount += amount,
            _ => self.pots.push(Pot { amount, eligible }),
        }
    }

    fn merge_equal_neighbours(&mut self) {
        let mut merged: Vec<Pot> = Vec::with_capacity(self.pots.len());
        for pot in self.pots.drain(..) {
            match merged.last_mut() {
                Some(last) if last.eligible == pot.eligible => last.amount += pot.amount,
                _ => merged.push(pot),
            }
        }
        self.pots = merged;
    }

    /// Split every pot among its best eligible hands.
    ///
    /// `strength` gives a seat's hand rank, or `None` for a seat that cannot
    /// win. `order` lists seats starting left of the button; odd chips go one
    /// at a time to the earliest winners in that order. A pot with nobody
    /// eligible is skipped.
    pub fn distribute<F>(&self, strength: F, order: &[usize]) -> Vec<PotAward>
    where
        F: Fn(usize) -> Option<HandRank>,
    {
        let mut awards = Vec::new();
        for (index, pot) in self.pots.iter().enumerate() {
            let ranked: Vec<(usize, HandRank)> =
                pot.eligible.iter().filter_map(|&s| strength(s).map(|r| (s, r))).collect();
            let Some(best) = ranked.iter().map(|&(_, r)| r).min() else {
                log::debug!("pot {index} has no eligible hands, skipped");
                continue;
            };
            let mut winners: Vec<usize> =
                ranked.iter().filter(|&&(_, r)| r == best).map(|&(s, _)| s).collect();
            winners.sort_by_key(|s| order.iter().position(|o| o == s).unwrap_or(usize::MAX));

            if !pot.is_contested() {
                log::debug!("pot {index} ({}) goes back uncontested", pot.amount);
            }
            let count = winners.len() as Chips;
            let per = pot.amount / count;
            let mut rem = pot.amount % count;
            let shares = winners
                .into_iter()
                .map(|seat| {
                    let extra = if rem > 0 {
                        rem -= 1;
                        1
                    } else {
                        0
                    };
                    (seat, per + extra)
                })
                .collect();
            awards.push(PotAward { pot: index, amount: pot.amount, shares });
        }
        awards
    }
}
