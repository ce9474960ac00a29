use holdem_rs::agents::LineMoves;
use holdem_rs::config::TableConfig;
use holdem_rs::dealer::Dealer;
use holdem_rs::snapshot::{DisplaySink, TableSnapshot};
use std::io::{self, IsTerminal};

struct Screen {
    clear: bool,
}

impl DisplaySink for Screen {
    fn show(&mut self, snapshot: &TableSnapshot) {
        if self.clear {
            print!("\x1b[H\x1b[J");
        }
        println!("{snapshot}");
    }
}

fn main() {
    holdem_rs::logging::init();

    let config = match TableConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("holdem: {e}");
            std::process::exit(2);
        }
    };
    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        names = vec!["Player1".into(), "Player2".into()];
    }

    let mut dealer = match Dealer::new(config, names) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("holdem: {e}");
            std::process::exit(2);
        }
    };

    // every seat is played from the same terminal
    let mut moves = LineMoves::new(io::stdin().lock(), io::stdout());
    let mut screen = Screen { clear: io::stdout().is_terminal() };

    println!(
        "holdem-rs {}: amounts are street totals; 'fold', 'allin' or a number",
        holdem_rs::VERSION
    );
    while dealer.players().len() >= 2 && !moves.exhausted() {
        match dealer.play_hand(&mut moves, &mut screen) {
            Ok(outcome) => {
                for entry in &outcome.showdown {
                    let best = entry.best_five.join(" ");
                    println!("{:<10} {}\t{}", entry.name, best, entry.class);
                }
                println!("Winners: {}", outcome.winners.join(", "));
                for name in &outcome.busted {
                    println!("{name} is out");
                }
            }
            Err(e) => {
                eprintln!("holdem: {e}");
                std::process::exit(1);
            }
        }
    }
    if moves.exhausted() {
        println!("input closed, stopping");
    } else if let Some(p) = dealer.players().first() {
        println!("{} takes the table with {}", p.name(), p.money());
    }
}
