//! Decision policies consulted by a player at every action point.

use crate::game::act::{Act, Reason};
use crate::game::table::TableState;

/// Trait for a generic betting strategy. Decides the initial wager of a round.
///
/// The returned act must be an initial bet with a negative value, anything else is rejected when
/// the bet is placed.
pub trait BettingStrategy {
    fn bet(&self, table: &TableState<'_>) -> Act;
}

/// Trait for a generic playing strategy. Decides the next move for the player's current hand,
/// one of hit, stand, double down or split.
pub trait HandStrategy {
    fn act(&self, table: &TableState<'_>) -> Reason;
}

/// Always bets the table minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBettingStrategy;

impl BettingStrategy for DefaultBettingStrategy {
    fn bet(&self, table: &TableState<'_>) -> Act {
        Act::bet(-table.config.min_bet)
    }
}

/// Always stands on the dealt cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandStrategy;

impl HandStrategy for DefaultHandStrategy {
    fn act(&self, _table: &TableState<'_>) -> Reason {
        Reason::Stand
    }
}

/// The dealer's policy. It keeps hitting until the hand is over, i.e. until it busts or holds a
/// blackjack, even past 16.
#[derive(Debug, Clone, Copy, Default)]
pub struct DealerHandStrategy;

impl HandStrategy for DealerHandStrategy {
    // TODO: stand on 17 or more once the house rule is confirmed
    fn act(&self, _table: &TableState<'_>) -> Reason {
        Reason::Hit
    }
}

/// Doubles the stake after every losing round and drops back to the minimum after a winning one.
/// A push repeats the previous stake. The stake never exceeds the table maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct Martingale;

impl BettingStrategy for Martingale {
    fn bet(&self, table: &TableState<'_>) -> Act {
        let config = table.config;
        let last = match table.myself.history().last() {
            Some(round) if !round.leaves().iter().any(|leaf| leaf.is_pending()) => round,
            _ => return Act::bet(-config.min_bet),
        };
        let stake = match last.net() {
            n if n > 0 => config.min_bet,
            0 => last.total_stake(),
            _ => last.total_stake() * 2,
        };
        Act::bet(-stake.clamp(config.min_bet, config.max_bet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::dealer::Dealer;
    use crate::game::player::Player;
    use crate::game::round::{Outcome, Round};
    use bj_lib::Stacked;

    fn martingale_bet(config: &Config, player: &Player) -> Act {
        let pile = Stacked::default();
        let dealer = Dealer::new();
        let table = TableState {
            config,
            pile: &pile,
            myself: player,
            players: std::slice::from_ref(player),
            dealer: &dealer,
        };
        Martingale.bet(&table)
    }

    fn settled(acts: Vec<Act>, outcome: Outcome) -> Round {
        let mut round = Round::from_parts(vec![], acts);
        round.settle(outcome);
        round.payout();
        round
    }

    #[test]
    fn test_default_strategies() {
        let config = Config::default();
        let player = Player::new(1000);
        let pile = Stacked::default();
        let dealer = Dealer::new();
        let table = TableState {
            config: &config,
            pile: &pile,
            myself: &player,
            players: &[],
            dealer: &dealer,
        };
        assert_eq!(DefaultBettingStrategy.bet(&table), Act::bet(-5));
        assert_eq!(DefaultHandStrategy.act(&table), Reason::Stand);
        assert_eq!(DealerHandStrategy.act(&table), Reason::Hit);
    }

    #[test]
    fn test_martingale_first_round_bets_minimum() {
        let config = Config::default();
        let player = Player::new(1000);
        assert_eq!(martingale_bet(&config, &player), Act::bet(-5));
    }

    #[test]
    fn test_martingale_doubles_after_loss() {
        let config = Config::default();
        let player =
            Player::with_history(1000, vec![settled(vec![Act::bet(-20)], Outcome::Lose)]);
        assert_eq!(martingale_bet(&config, &player), Act::bet(-40));
    }

    #[test]
    fn test_martingale_caps_at_max_bet() {
        let config = Config::default();
        let player =
            Player::with_history(1000, vec![settled(vec![Act::bet(-40)], Outcome::Lose)]);
        assert_eq!(martingale_bet(&config, &player), Act::bet(-50));
    }

    #[test]
    fn test_martingale_resets_after_win() {
        let config = Config::default();
        let player = Player::with_history(1000, vec![settled(vec![Act::bet(-40)], Outcome::Win)]);
        assert_eq!(martingale_bet(&config, &player), Act::bet(-5));
    }

    #[test]
    fn test_martingale_repeats_after_push() {
        let config = Config::default();
        let player =
            Player::with_history(1000, vec![settled(vec![Act::bet(-15)], Outcome::Draw)]);
        assert_eq!(martingale_bet(&config, &player), Act::bet(-15));
    }
}
