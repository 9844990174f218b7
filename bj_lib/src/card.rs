use crate::CardError;
use std::fmt::Display;

/// The four suits of a standard deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Clover,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Clover];

    fn symbol(&self) -> char {
        match self {
            Suit::Spade => '♠',
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Clover => '♣',
        }
    }
}

/// An immutable playing card. `rank` runs from 1 (ace) to 13 (king).
///
/// Two cards are equal only when both the suit and the rank match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub(crate) suit: Suit,
    pub(crate) rank: u8,
}

impl Card {
    /// Associated function to create a new `Card`, fails if `rank` is outside `1..=13`.
    pub fn new(suit: Suit, rank: u8) -> Result<Card, CardError> {
        if !(1..=13).contains(&rank) {
            return Err(CardError::InvalidRank(rank));
        }
        Ok(Card { suit, rank })
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Blackjack value of the card, face cards count as 10 and an ace always counts as 1.
    pub fn value(&self) -> u32 {
        u32::from(self.rank.min(10))
    }

    pub fn is_ace(&self) -> bool {
        self.value() == 1
    }

    pub fn is_ten(&self) -> bool {
        self.value() == 10
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rank = match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        };
        write!(f, "{}{}", rank, self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_caps_at_ten() {
        for rank in 1..=13 {
            let card = Card::new(Suit::Heart, rank).unwrap();
            assert_eq!(card.value(), u32::from(rank.min(10)));
        }
    }

    #[test]
    fn test_invalid_rank() {
        assert_eq!(Card::new(Suit::Spade, 0), Err(CardError::InvalidRank(0)));
        assert_eq!(Card::new(Suit::Spade, 14), Err(CardError::InvalidRank(14)));
    }

    #[test]
    fn test_equality_includes_suit() {
        let a = Card::new(Suit::Diamond, 12).unwrap();
        let b = Card::new(Suit::Diamond, 12).unwrap();
        let c = Card::new(Suit::Spade, 12).unwrap();
        let d = Card::new(Suit::Diamond, 13).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        // Same value bucket, different rank
        assert_ne!(a, d);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Spade, 1).unwrap().to_string(), "A♠");
        assert_eq!(Card::new(Suit::Heart, 10).unwrap().to_string(), "10♥");
        assert_eq!(Card::new(Suit::Clover, 13).unwrap().to_string(), "K♣");
    }
}
