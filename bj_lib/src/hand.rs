//! Pure evaluation of an ordered sequence of cards.
//!
//! Aces always count as 1 here, the only place an ace is worth more is the two card
//! blackjack check, which fixes the total at 21.

use crate::Card;
use std::fmt::Display;

pub const BLACKJACK: u32 = 21;

/// Evaluated total of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Running total, stops accumulating at the first card that pushes it past 21.
    pub total: u32,
    pub bust: bool,
    pub blackjack: bool,
}

/// Cards dealt to one round, in deal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Computes the total, bust and blackjack flags in one pass.
    pub fn score(&self) -> Score {
        if self.is_blackjack() {
            return Score {
                total: BLACKJACK,
                bust: false,
                blackjack: true,
            };
        }
        let mut total = 0;
        for card in &self.cards {
            total += card.value();
            if total > BLACKJACK {
                return Score {
                    total,
                    bust: true,
                    blackjack: false,
                };
            }
        }
        Score {
            total,
            bust: false,
            blackjack: false,
        }
    }

    pub fn sum(&self) -> u32 {
        self.score().total
    }

    pub fn is_bust(&self) -> bool {
        self.score().bust
    }

    /// Exactly two cards, one ace and one ten valued card.
    pub fn is_blackjack(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => (a.is_ace() && b.is_ten()) || (a.is_ten() && b.is_ace()),
            _ => false,
        }
    }

    /// Exactly two cards that are equal, which means suit and rank both have to match.
    pub fn can_split(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => a == b,
            _ => false,
        }
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand { cards }
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "[{}] ({})", cards, self.sum())
    }
}
