use crate::{Card, CardError, Suit};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Number of cards in a single deck.
pub const DECK_SIZE: usize = 52;

lazy_static! {
    static ref STANDARD_DECK: Vec<Card> = Suit::ALL
        .iter()
        .flat_map(|suit| (1..=13).map(move |rank| Card { suit: *suit, rank }))
        .collect();
}

/// Capability of handing out cards one at a time.
///
/// Strategies only ever see a source through `&dyn CardSource`, so the read only methods are what
/// they can use to reason about the shoe.
pub trait CardSource {
    /// Takes the top card, refilling the source first if it is running low.
    fn draw(&mut self) -> Result<Card, CardError>;

    /// Number of cards left before the next draw.
    fn remaining(&self) -> usize;

    /// Whether the next draw will trigger a reshuffle.
    fn needs_shuffle(&self) -> bool;
}

/// A shoe of `deck_count` standard decks, shuffled with its own seeded generator.
pub struct Pile {
    cards: Vec<Card>,
    deck_count: usize,
    rng: StdRng,
}

impl Pile {
    /// Associated function to create an empty `Pile`, it is filled on the first draw or an explicit call to `prepare()`.
    pub fn new(deck_count: usize, seed: u64) -> Pile {
        Pile {
            cards: Vec::with_capacity(DECK_SIZE * deck_count),
            deck_count,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn deck_count(&self) -> usize {
        self.deck_count
    }

    /// True once a third or less of the full shoe is left.
    pub fn should_shuffle(&self) -> bool {
        self.len() <= DECK_SIZE * self.deck_count / 3
    }

    /// Discards what is left, rebuilds `deck_count` decks and shuffles them.
    pub fn prepare(&mut self) -> &mut Self {
        self.cards.clear();
        for _ in 0..self.deck_count {
            self.cards.extend(STANDARD_DECK.iter().copied());
        }
        self.cards.shuffle(&mut self.rng);
        log::debug!("pile reshuffled, {} cards", self.cards.len());
        self
    }

    /// Places `card` on top of the pile so it is the next one drawn. A pile due for a reshuffle
    /// is reshuffled first, otherwise the draw would throw the card away.
    pub fn push(&mut self, card: Card) {
        if self.should_shuffle() {
            self.prepare();
        }
        self.cards.push(card);
    }
}

impl CardSource for Pile {
    fn draw(&mut self) -> Result<Card, CardError> {
        if self.should_shuffle() {
            self.prepare();
        }
        self.cards.pop().ok_or(CardError::Exhausted {
            deck_count: self.deck_count,
        })
    }

    fn remaining(&self) -> usize {
        self.len()
    }

    fn needs_shuffle(&self) -> bool {
        self.should_shuffle()
    }
}

/// A source that hands out a fixed sequence of cards in order and never reshuffles.
#[derive(Debug, Clone, Default)]
pub struct Stacked {
    cards: VecDeque<Card>,
}

impl Stacked {
    pub fn new<I: IntoIterator<Item = Card>>(cards: I) -> Stacked {
        Stacked {
            cards: cards.into_iter().collect(),
        }
    }
}

impl CardSource for Stacked {
    fn draw(&mut self) -> Result<Card, CardError> {
        self.cards
            .pop_front()
            .ok_or(CardError::Exhausted { deck_count: 0 })
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }

    fn needs_shuffle(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_prepare_builds_full_decks() {
        let mut pile = Pile::new(3, 1);
        pile.prepare();
        assert_eq!(pile.len(), 3 * DECK_SIZE);
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for card in &pile.cards {
            *counts.entry(*card).or_default() += 1;
        }
        assert_eq!(counts.len(), DECK_SIZE);
        assert!(counts.values().all(|n| *n == 3));
    }

    #[test]
    fn test_should_shuffle_threshold() {
        let mut pile = Pile::new(1, 1);
        assert!(pile.should_shuffle());
        pile.prepare();
        assert!(!pile.should_shuffle());
        // 52 / 3 == 17
        while pile.len() > 18 {
            pile.cards.pop();
        }
        assert!(!pile.should_shuffle());
        pile.cards.pop();
        assert!(pile.should_shuffle());
    }

    #[test]
    fn test_draw_refills_when_low() {
        let mut pile = Pile::new(1, 9);
        let card = pile.draw().unwrap();
        assert_eq!(pile.len(), DECK_SIZE - 1);
        assert!(STANDARD_DECK.contains(&card));
        for _ in 0..200 {
            pile.draw().unwrap();
            assert!(pile.len() >= DECK_SIZE / 3);
        }
    }

    #[test]
    fn test_push_rigs_next_draw() {
        let mut pile = Pile::new(1, 3);
        pile.prepare();
        let king = Card::new(Suit::Diamond, 13).unwrap();
        pile.push(king);
        assert_eq!(pile.draw().unwrap(), king);
    }

    #[test]
    fn test_push_survives_low_pile() {
        let mut pile = Pile::new(1, 3);
        pile.prepare();
        pile.cards.truncate(10);
        let king = Card::new(Suit::Diamond, 13).unwrap();
        pile.push(king);
        assert_eq!(pile.len(), DECK_SIZE + 1);
        assert_eq!(pile.draw().unwrap(), king);
        assert_eq!(pile.len(), DECK_SIZE);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = Pile::new(2, 42);
        let mut b = Pile::new(2, 42);
        for _ in 0..150 {
            assert_eq!(a.draw().unwrap(), b.draw().unwrap());
        }
    }

    #[test]
    fn test_zero_decks_is_exhausted() {
        let mut pile = Pile::new(0, 1);
        assert_eq!(pile.draw(), Err(CardError::Exhausted { deck_count: 0 }));
    }

    #[test]
    fn test_stacked_draws_in_order() {
        let cards = vec![
            Card::new(Suit::Spade, 1).unwrap(),
            Card::new(Suit::Heart, 2).unwrap(),
        ];
        let mut source = Stacked::new(cards.clone());
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.draw().unwrap(), cards[0]);
        assert_eq!(source.draw().unwrap(), cards[1]);
        assert!(source.draw().is_err());
        assert!(!source.needs_shuffle());
    }
}
