//! Read-only table views handed to a display.

use crate::hand::Board;
use crate::moves::{Chips, Move, Position, Street};
use crate::player::Player;
use crate::pot::PotManager;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct PlayerView {
    pub seat: usize,
    pub name: String,
    pub money: Chips,
    pub position: Option<Position>,
    pub current_bet: Chips,
    pub folded: bool,
    pub all_in: bool,
    /// Last move per street, Pre-Flop first.
    pub moves: [Option<Move>; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PotView {
    pub amount: Chips,
    pub eligible: Vec<usize>,
}

/// Everything a display needs for one refresh. Hole cards are not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct TableSnapshot {
    pub hand_number: u64,
    pub street: Option<Street>,
    pub board: Vec<String>,
    pub players: Vec<PlayerView>,
    pub pots: Vec<PotView>,
    pub pot_total: Chips,
}

impl TableSnapshot {
    pub fn capture(
        hand_number: u64,
        street: Option<Street>,
        board: &Board,
        players: &[Player],
        pots: &PotManager,
    ) -> Self {
        let players = players
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerView {
                seat,
                name: p.name().to_string(),
                money: p.money(),
                position: p.position(),
                current_bet: p.current_bet(),
                folded: p.is_folded(),
                all_in: p.is_all_in(),
                moves: p.last_moves(),
            })
            .collect();
        let pot_views = pots
            .pots()
            .iter()
            .map(|p| PotView { amount: p.amount, eligible: p.eligible.iter().copied().collect() })
            .collect();
        Self {
            hand_number,
            street,
            board: board.as_slice().iter().map(|c| c.to_string()).collect(),
            players,
            pots: pot_views,
            pot_total: pots.total_chips(),
        }
    }
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board: Vec<&str> = self.board.iter().map(String::as_str).collect();
        board.resize(5, "??");
        writeln!(
            f,
            "Hand #{}  Board: {}  Pot: {}",
            self.hand_number,
            board.join(" "),
            self.pot_total
        )?;
        write!(f, "{:<10} {:<4} {:>6}", "Player", "Pos", "Money")?;
        for street in Street::ALL {
            write!(f, " {:<14}", street.name())?;
        }
        writeln!(f)?;
        for p in &self.players {
            let pos = p.position.map(|x| x.label()).unwrap_or("");
            write!(f, "{:<10} {:<4} {:>6}", p.name, pos, p.money)?;
            for mv in &p.moves {
                match mv {
                    Some(m) => write!(f, " {:<14}", m.to_string())?,
                    None => write!(f, " {:<14}", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Receives a snapshot whenever the table changes in a way worth showing.
pub trait DisplaySink {
    fn show(&mut self, snapshot: &TableSnapshot);
}

/// Discards everything.
impl DisplaySink for () {
    fn show(&mut self, _snapshot: &TableSnapshot) {}
}

/// Keeps every snapshot, mostly for tests and replays.
impl DisplaySink for Vec<TableSnapshot> {
    fn show(&mut self, snapshot: &TableSnapshot) {
        self.push(snapshot.clone());
    }
}
