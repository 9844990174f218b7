//! Players, their bankroll and the turn loop that drives their hand.

use crate::error::GameError;
use crate::game::act::{Act, Reason};
use crate::game::dealer::Dealer;
use crate::game::round::Round;
use crate::game::strategy::{
    BettingStrategy, DefaultBettingStrategy, DefaultHandStrategy, HandStrategy,
};
use crate::game::table::{GameContext, Seat};
use bj_lib::Card;
use std::fmt::Display;

/// Struct for a simulated player. Holds the chip balance, one root round per game round played
/// and the strategies consulted for betting and playing.
pub struct Player {
    balance: i64,
    history: Vec<Round>,
    betting_strategy: Box<dyn BettingStrategy>,
    hand_strategy: Box<dyn HandStrategy>,
}

impl Player {
    /// Associated function to create a new `Player` using the default strategies.
    pub fn new(balance: i64) -> Player {
        Player {
            balance,
            history: Vec::new(),
            betting_strategy: Box::new(DefaultBettingStrategy),
            hand_strategy: Box::new(DefaultHandStrategy),
        }
    }

    /// Creates a player that already played the rounds in `history`.
    pub fn with_history(balance: i64, history: Vec<Round>) -> Player {
        Player {
            history,
            ..Player::new(balance)
        }
    }

    pub fn betting_strategy<B: BettingStrategy + 'static>(mut self, strategy: B) -> Self {
        self.betting_strategy = Box::new(strategy);
        self
    }

    pub fn hand_strategy<H: HandStrategy + 'static>(mut self, strategy: H) -> Self {
        self.hand_strategy = Box::new(strategy);
        self
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// Root round of the game round being played, if any.
    pub fn current_round(&self) -> Option<&Round> {
        self.history.last()
    }

    /// Root round of the game round being played, opened on first request.
    pub fn current_round_mut(&mut self) -> &mut Round {
        if self.history.is_empty() {
            self.history.push(Round::new());
        }
        let last = self.history.len() - 1;
        &mut self.history[last]
    }

    /// Starts a fresh root round for a new game round.
    pub fn open_round(&mut self) -> &mut Round {
        self.history.push(Round::new());
        let last = self.history.len() - 1;
        &mut self.history[last]
    }

    /// The leaf the player acts on next: the leftmost unfinished leaf of the current round.
    pub fn playable(&self) -> Option<&Round> {
        self.current_round().and_then(Round::playable)
    }

    /// Deals `card` to the leaf being played. Fails when every leaf of the current round is done.
    pub fn hit(&mut self, card: Card) -> Result<(), GameError> {
        self.current_round_mut()
            .playable_mut()
            .ok_or(GameError::NoActiveRound)?
            .hit(card);
        Ok(())
    }

    pub fn stand(&mut self) -> Result<(), GameError> {
        let leaf = self.playable_leaf()?;
        leaf.push_act(Act::stand());
        Ok(())
    }

    /// Doubles the stake of the leaf being played and deals it `card`, the last card it gets.
    pub fn double_down(&mut self, card: Card) -> Result<(), GameError> {
        let Player {
            history, balance, ..
        } = self;
        let leaf = history
            .last_mut()
            .and_then(Round::playable_mut)
            .ok_or(GameError::NoActiveRound)?;
        leaf.double_down(balance)?;
        leaf.hit(card);
        Ok(())
    }

    pub fn split(&mut self) -> Result<(), GameError> {
        let Player {
            history, balance, ..
        } = self;
        let leaf = history
            .last_mut()
            .and_then(Round::playable_mut)
            .ok_or(GameError::NoActiveRound)?;
        leaf.split(balance)
    }

    /// Whether the hand being played is a pair that may be split.
    pub fn can_split(&self) -> bool {
        self.playable().map_or(false, |r| r.hand().can_split())
    }

    /// Has the dealer settle every leaf of the current round and credits the payout.
    /// Returns the amount credited.
    pub fn settle(&mut self, dealer: &Dealer) -> i64 {
        let Some(round) = self.history.last_mut() else {
            return 0;
        };
        dealer.settle(round);
        let payout = round.payout();
        self.balance += payout;
        payout
    }

    fn playable_leaf(&mut self) -> Result<&mut Round, GameError> {
        self.history
            .last_mut()
            .and_then(Round::playable_mut)
            .ok_or(GameError::NoActiveRound)
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<21}{}", "balance:", self.balance)?;
        writeln!(f, "{:<21}{}", "rounds played:", self.history.len())?;
        match self.current_round() {
            Some(round) => write!(f, "{:<21}\n{}", "current round:", round),
            None => write!(f, "{:<21}none", "current round:"),
        }
    }
}

/// Asks the player's betting strategy for a wager and places it.
///
/// The bet is rejected, leaving the balance and history untouched, when it is below the table
/// minimum, above the table maximum or more than the player holds. On success the stake is
/// debited and recorded on a newly opened round.
pub fn bet(ctx: &mut GameContext, index: usize) -> Result<Act, GameError> {
    let seat = Seat::Player(index);
    let act = ctx
        .seat(seat)
        .betting_strategy
        .bet(&ctx.table_state(seat));
    if act.reason != Reason::InitialBet || act.value >= 0 {
        return Err(GameError::InvalidBetAct {
            reason: act.reason,
            value: act.value,
        });
    }
    let stake = -act.value;
    let config = &ctx.config;
    if stake < config.min_bet {
        return Err(GameError::BetBelowMinimum {
            min: config.min_bet,
            bet: stake,
        });
    }
    if stake > config.max_bet {
        return Err(GameError::BetAboveMaximum {
            max: config.max_bet,
            bet: stake,
        });
    }
    let player = ctx.seat_mut(seat);
    if stake > player.balance {
        return Err(GameError::BetExceedsBalance {
            balance: player.balance,
            bet: stake,
        });
    }
    player.balance -= stake;
    player.open_round().push_act(act);
    log::debug!("player {} bets {}", index, stake);
    Ok(act)
}

/// The turn loop. Keeps asking the hand strategy at `seat` for a decision until the current
/// round has no unfinished leaf left.
///
/// A leaf holding a single card, the second child of a split, is dealt a card before its
/// strategy is consulted. A split requested on a hand that is not a pair is played as a hit.
pub fn make_action(ctx: &mut GameContext, seat: Seat) -> Result<(), GameError> {
    loop {
        let decision = match ctx.seat(seat).playable() {
            None => return Ok(()),
            Some(leaf) if leaf.hand().len() < 2 => None,
            Some(_) => Some(ctx.seat(seat).hand_strategy.act(&ctx.table_state(seat))),
        };
        let (player, pile) = ctx.seat_and_pile(seat);
        let Some(reason) = decision else {
            player.hit(pile.draw()?)?;
            continue;
        };
        log::trace!("{:?} decides {}", seat, reason);
        match reason {
            Reason::Hit => player.hit(pile.draw()?)?,
            Reason::DoubleDown => player.double_down(pile.draw()?)?,
            Reason::Split if player.can_split() => {
                player.split()?;
                player.hit(pile.draw()?)?;
            }
            Reason::Split => {
                log::debug!("{:?} cannot split, hitting instead", seat);
                player.hit(pile.draw()?)?;
            }
            Reason::Stand => player.stand()?,
            other => return Err(GameError::UnexpectedAction { reason: other }),
        }
    }
}
