//! holdem-rs: a Texas Hold'em engine
//!
//! Goals:
//! - Constant-time five-card evaluation over prime-product lookup tables
//! - A betting-round state machine with min-raise and re-open rules
//! - Side pots and showdown settlement that never create or lose chips
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_rs::cards::{Card, Rank, Suit};
//! use holdem_rs::evaluator::{evaluate, RankClass};
//! use holdem_rs::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate(&hole, &board).unwrap();
//! assert_eq!(eval.class, RankClass::Pair);
//! ```
//!
//! ## Playing a hand
//! ```
//! use holdem_rs::agents::CallingAgent;
//! use holdem_rs::config::TableConfig;
//! use holdem_rs::dealer::Dealer;
//!
//! let config = TableConfig { seed: Some(7), ..TableConfig::default() };
//! let mut dealer = Dealer::new(config, ["alice", "bob", "carol"]).unwrap();
//! let outcome = dealer.play_hand(&mut CallingAgent, &mut ()).unwrap();
//! assert_eq!(outcome.board.len(), 5);
//! assert_eq!(dealer.chips_in_play(), 3000);
//! ```
//!
//! ## Terminal play
//! ```sh
//! cargo run --bin holdem -- alice bob
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod dealer;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod logging;
pub mod moves;
pub mod player;
pub mod pot;
pub mod snapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
