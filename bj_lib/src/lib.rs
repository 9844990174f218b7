//! Cards, hands and card sources shared by the blackjack simulator.

pub mod card;
pub mod hand;
pub mod pile;

pub use card::{Card, Suit};
pub use hand::{Hand, Score};
pub use pile::{CardSource, Pile, Stacked, DECK_SIZE};

use thiserror::Error;

/// Errors raised while building cards or drawing from a source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("card rank must be between 1 and 13, got {0}")]
    InvalidRank(u8),
    #[error("card source is exhausted and cannot be refilled (decks: {deck_count})")]
    Exhausted { deck_count: usize },
}
