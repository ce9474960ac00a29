//! Move sources: whatever decides a seat's raw bet amount.
//!
//! The betting round asks a [`MoveSource`] for an amount and resolves it
//! through the player's coercion rules, so a source never has to produce a
//! legal move itself. `None` stands for unusable input and is treated as a
//! call.

use crate::hand::HoleCards;
use crate::moves::{raw_amount, Chips, Street, SHOVE};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// What a move source sees when a seat is asked to act.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TurnContext {
    pub seat: usize,
    pub name: String,
    pub street: Street,
    pub current_bet: Chips,
    pub min_raise: Chips,
    /// Chips needed to match `current_bet`.
    pub to_call: Chips,
    pub money: Chips,
    pub can_raise: bool,
    pub hole: Option<HoleCards>,
}

impl TurnContext {
    /// Smallest street total that counts as a full raise.
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet.saturating_add(self.min_raise)
    }
}

/// A blocking source of raw amounts, one per turn.
pub trait MoveSource {
    fn next_move(&mut self, ctx: &TurnContext) -> Option<i64>;
}

impl<F> MoveSource for F
where
    F: FnMut(&TurnContext) -> Option<i64>,
{
    fn next_move(&mut self, ctx: &TurnContext) -> Option<i64> {
        self(ctx)
    }
}

/// Plays back a fixed queue of inputs, then keeps calling.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    queue: VecDeque<Option<i64>>,
}

impl ScriptedMoves {
    pub fn new(moves: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self { queue: moves.into_iter().collect() }
    }

    /// Queue raw text the way a terminal would deliver it.
    pub fn from_inputs<'a>(inputs: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(inputs.into_iter().map(crate::betting::parse_amount))
    }

    pub fn push(&mut self, amount: Option<i64>) {
        self.queue.push_back(amount);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, ctx: &TurnContext) -> Option<i64> {
        match self.queue.pop_front() {
            Some(amount) => amount,
            None => Some(raw_amount(ctx.current_bet)),
        }
    }
}

/// Prompts on `output` and reads one amount per line from `input`.
///
/// Once the input ends or fails, every later turn folds and
/// [`LineMoves::exhausted`] reports it, so a caller can stop dealing.
#[derive(Debug)]
pub struct LineMoves<R, W> {
    input: R,
    output: W,
    exhausted: bool,
}

impl<R: BufRead, W: Write> LineMoves<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, exhausted: false }
    }

    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, ctx: &TurnContext) -> io::Result<()> {
        let hole = ctx.hole.map(|h| h.to_string()).unwrap_or_default();
        write!(
            self.output,
            "{:<10} {}  to call {}, raise to {}+  Bet: ",
            ctx.name,
            hole,
            ctx.to_call,
            ctx.min_raise_to()
        )?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> MoveSource for LineMoves<R, W> {
    fn next_move(&mut self, ctx: &TurnContext) -> Option<i64> {
        if self.exhausted {
            return Some(-1);
        }
        if let Err(e) = self.prompt(ctx) {
            log::warn!("could not write prompt: {e}");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                log::info!("input closed, folding {}", ctx.name);
                self.exhausted = true;
                Some(-1)
            }
            Ok(_) => crate::betting::parse_amount(&line),
            Err(e) => {
                log::warn!("could not read a move: {e}");
                self.exhausted = true;
                Some(-1)
            }
        }
    }
}

/// Checks when possible, otherwise calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingAgent;

impl MoveSource for CallingAgent {
    fn next_move(&mut self, ctx: &TurnContext) -> Option<i64> {
        if ctx.to_call == 0 {
            Some(0)
        } else {
            Some(raw_amount(ctx.current_bet))
        }
    }
}

/// Weighted random play for simulations. Seeded agents are reproducible.
#[derive(Debug)]
pub struct RandomAgent {
    rng: StdRng,
    fold: f64,
    raise: f64,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng, fold: 0.15, raise: 0.25 }
    }

    /// Probabilities of folding to a bet and of raising; the rest calls.
    pub fn with_weights(mut self, fold: f64, raise: f64) -> Self {
        self.fold = fold.clamp(0.0, 1.0);
        self.raise = raise.clamp(0.0, 1.0 - self.fold);
        self
    }
}

impl MoveSource for RandomAgent {
    fn next_move(&mut self, ctx: &TurnContext) -> Option<i64> {
        let roll: f64 = self.rng.random();
        if roll < self.fold && ctx.to_call > 0 {
            return Some(-1);
        }
        if roll < self.fold + self.raise && ctx.can_raise {
            // the seat's own street total if it shoved
            let top =
                raw_amount(ctx.current_bet - ctx.to_call).saturating_add(raw_amount(ctx.money));
            let floor = raw_amount(ctx.min_raise_to());
            if floor < top {
                return Some(self.rng.random_range(floor..=top));
            }
            return Some(SHOVE);
        }
        if ctx.to_call == 0 {
            Some(0)
        } else {
            Some(raw_amount(ctx.current_bet))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(current_bet: Chips, to_call: Chips) -> TurnContext {
        TurnContext {
            seat: 0,
            name: "p".into(),
            street: Street::Flop,
            current_bet,
            min_raise: 20,
            to_call,
            money: 500,
            can_raise: true,
            hole: None,
        }
    }

    #[test]
    fn scripted_moves_fall_back_to_calling() {
        let mut s = ScriptedMoves::from_inputs(["100", "bogus"]);
        let c = ctx(40, 40);
        assert_eq!(s.next_move(&c), Some(100));
        assert_eq!(s.next_move(&c), None);
        assert_eq!(s.next_move(&c), Some(40));
    }

    #[test]
    fn calling_agent_checks_when_free() {
        let mut a = CallingAgent;
        assert_eq!(a.next_move(&ctx(0, 0)), Some(0));
        assert_eq!(a.next_move(&ctx(60, 40)), Some(60));
    }

    #[test]
    fn seeded_random_agents_agree() {
        let mut a = RandomAgent::new(Some(9));
        let mut b = RandomAgent::new(Some(9));
        let c = ctx(40, 40);
        for _ in 0..50 {
            assert_eq!(a.next_move(&c), b.next_move(&c));
        }
    }

    #[test]
    fn random_raises_stay_inside_the_stack() {
        let mut a = RandomAgent::new(Some(3)).with_weights(0.0, 1.0);
        let c = ctx(40, 40);
        for _ in 0..50 {
            let amount = a.next_move(&c).unwrap();
            assert!((60..=500).contains(&amount));
        }
    }

    #[test]
    fn min_raise_to_saturates() {
        let mut c = ctx(Chips::MAX - 1, 0);
        c.min_raise = Chips::MAX;
        assert_eq!(c.min_raise_to(), Chips::MAX);
    }

    #[test]
    fn line_moves_parse_each_line_and_prompt_by_name() {
        let input = io::Cursor::new("120\nallin\nnope\n");
        let mut lines = LineMoves::new(input, Vec::new());
        let c = ctx(40, 40);
        assert_eq!(lines.next_move(&c), Some(120));
        assert_eq!(lines.next_move(&c), Some(SHOVE));
        assert_eq!(lines.next_move(&c), None);
        assert!(!lines.exhausted());
        let shown = String::from_utf8(lines.into_output()).unwrap();
        assert_eq!(shown.matches("raise to 60+").count(), 3);
        assert!(shown.starts_with("p "));
    }

    #[test]
    fn closed_input_folds_from_then_on() {
        let mut lines = LineMoves::new(io::Cursor::new("30\n"), io::sink());
        let c = ctx(20, 20);
        assert_eq!(lines.next_move(&c), Some(30));
        assert_eq!(lines.next_move(&c), Some(-1));
        assert!(lines.exhausted());
        assert_eq!(lines.next_move(&c), Some(-1));
    }

    #[test]
    fn closures_are_move_sources() {
        let mut fold_all = |_: &TurnContext| Some(-1);
        assert_eq!(fold_all.next_move(&ctx(20, 20)), Some(-1));
    }
}
