use crate::game::player::Player;
use crate::game::round::{Outcome, Round};
use crate::game::strategy::{DealerHandStrategy, HandStrategy};
use std::fmt::Display;

/// The house. Plays its own hand with a fixed strategy, never bets, and decides the outcome of
/// every player's round against its own.
pub struct Dealer {
    player: Player,
}

impl Dealer {
    pub fn new() -> Dealer {
        Dealer {
            player: Player::new(0).hand_strategy(DealerHandStrategy),
        }
    }

    /// A dealer playing with a house policy other than the default one.
    pub fn with_strategy<H: HandStrategy + 'static>(strategy: H) -> Dealer {
        Dealer {
            player: Player::new(0).hand_strategy(strategy),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Total of the dealer's current hand, zero before any card is dealt.
    pub fn sum(&self) -> u32 {
        self.player.current_round().map_or(0, Round::sum)
    }

    /// Compares a single leaf against the dealer's hand.
    ///
    /// A bust leaf loses and a blackjack wins, whatever the dealer holds. Otherwise an equal total
    /// is a draw and the higher total wins. The dealer's total is compared as is, so a busted
    /// dealer with a higher running total still beats the leaf.
    pub fn result(&self, round: &Round) -> Outcome {
        if round.is_bust() {
            return Outcome::Lose;
        }
        if round.is_blackjack() {
            return Outcome::Win;
        }
        let dealer_sum = self.sum();
        let sum = round.sum();
        if dealer_sum == sum {
            Outcome::Draw
        } else if dealer_sum > sum {
            Outcome::Lose
        } else {
            Outcome::Win
        }
    }

    /// Assigns an outcome to every pending leaf of `round`.
    pub fn settle(&self, round: &mut Round) {
        round.settle_with(&|leaf: &Round| self.result(leaf));
        log::debug!("settled against dealer {}: {}", self.sum(), round);
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Dealer::new()
    }
}

impl Display for Dealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.player.current_round() {
            Some(round) => write!(f, "{:<21}{}", "dealer:", round),
            None => write!(f, "{:<21}no cards", "dealer:"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::act::Act;
    use bj_lib::{Card, Suit};

    fn card(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank).unwrap()
    }

    fn dealer_with(cards: Vec<Card>) -> Dealer {
        let mut dealer = Dealer::new();
        dealer.player_mut().open_round();
        for c in cards {
            dealer.player_mut().hit(c).unwrap();
        }
        dealer
    }

    fn leaf(cards: Vec<Card>) -> Round {
        Round::from_parts(cards, vec![Act::bet(-10)])
    }

    #[test]
    fn test_equal_sums_draw() {
        let dealer = dealer_with(vec![card(Suit::Spade, 10), card(Suit::Spade, 8)]);
        let round = leaf(vec![card(Suit::Heart, 9), card(Suit::Heart, 9)]);
        assert_eq!(dealer.result(&round), Outcome::Draw);
    }

    #[test]
    fn test_higher_player_sum_wins() {
        let dealer = dealer_with(vec![card(Suit::Spade, 10), card(Suit::Spade, 7)]);
        let round = leaf(vec![card(Suit::Heart, 13), card(Suit::Heart, 10)]);
        assert_eq!(dealer.result(&round), Outcome::Win);
    }

    #[test]
    fn test_lower_player_sum_loses() {
        let dealer = dealer_with(vec![card(Suit::Spade, 10), card(Suit::Spade, 9)]);
        let round = leaf(vec![card(Suit::Heart, 13), card(Suit::Heart, 7)]);
        assert_eq!(dealer.result(&round), Outcome::Lose);
    }

    #[test]
    fn test_bust_player_always_loses() {
        let round = leaf(vec![
            card(Suit::Heart, 13),
            card(Suit::Heart, 7),
            card(Suit::Heart, 5),
        ]);
        let busted_dealer = dealer_with(vec![
            card(Suit::Spade, 10),
            card(Suit::Spade, 9),
            card(Suit::Spade, 9),
        ]);
        assert_eq!(busted_dealer.result(&round), Outcome::Lose);
        let low_dealer = dealer_with(vec![card(Suit::Spade, 2), card(Suit::Spade, 3)]);
        assert_eq!(low_dealer.result(&round), Outcome::Lose);
    }

    #[test]
    fn test_blackjack_wins_even_against_dealer_blackjack() {
        let dealer = dealer_with(vec![card(Suit::Spade, 1), card(Suit::Spade, 13)]);
        let round = leaf(vec![card(Suit::Heart, 1), card(Suit::Heart, 10)]);
        assert_eq!(dealer.result(&round), Outcome::Win);
    }

    #[test]
    fn test_busted_dealer_with_higher_total_beats_player() {
        let dealer = dealer_with(vec![
            card(Suit::Spade, 10),
            card(Suit::Spade, 6),
            card(Suit::Spade, 8),
        ]);
        assert_eq!(dealer.sum(), 24);
        let round = leaf(vec![card(Suit::Heart, 10), card(Suit::Heart, 9)]);
        assert_eq!(dealer.result(&round), Outcome::Lose);
    }

    #[test]
    fn test_settle_split_tree() {
        let dealer = dealer_with(vec![card(Suit::Spade, 10), card(Suit::Spade, 8)]);
        let eight = card(Suit::Heart, 8);
        let mut round = leaf(vec![eight, eight]);
        let mut balance = 100;
        round.split(&mut balance).unwrap();
        round.playable_mut().unwrap().hit(card(Suit::Clover, 13));
        round.playable_mut().unwrap().push_act(Act::stand());
        round.playable_mut().unwrap().hit(card(Suit::Clover, 10));
        round.playable_mut().unwrap().push_act(Act::stand());

        dealer.settle(&mut round);
        assert!(round.is_split());
        let outcomes: Vec<Option<Outcome>> = round.leaves().iter().map(|l| l.outcome()).collect();
        assert_eq!(outcomes, vec![Some(Outcome::Draw), Some(Outcome::Draw)]);
        assert_eq!(round.payout(), 20);
    }
}
