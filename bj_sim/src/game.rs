//! Module that drives a game of blackjack round by round. A round collects the bets, deals two
//! cards to every seat, lets every player and then the dealer play, and settles every player's
//! round against the dealer's hand.

pub mod act;
pub mod dealer;
pub mod player;
pub mod round;
pub mod strategy;
pub mod table;

pub mod prelude {
    pub use super::act::{Act, Reason};
    pub use super::dealer::Dealer;
    pub use super::player::Player;
    pub use super::round::{Outcome, Round};
    pub use super::strategy::{
        BettingStrategy, DealerHandStrategy, DefaultBettingStrategy, DefaultHandStrategy,
        HandStrategy, Martingale,
    };
    pub use super::table::{GameContext, Seat, TableState};
    pub use super::BlackjackGame;
}

use crate::config::{BettingKind, Config};
use crate::error::GameError;
use crate::stats::SimulationSummary;
use bj_lib::Pile;
use prelude::*;

/// Struct that runs a configured number of rounds on a table.
pub struct BlackjackGame {
    ctx: GameContext,
}

impl BlackjackGame {
    pub fn new(ctx: GameContext) -> BlackjackGame {
        BlackjackGame { ctx }
    }

    /// Builds a table from `config`: a freshly shuffled pile, `player_count` players using the
    /// configured betting strategy and a dealer.
    pub fn from_config(config: Config) -> Result<BlackjackGame, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!(
            "new table: {} players, {} decks, seed {}",
            config.player_count,
            config.deck_count,
            seed
        );
        let mut pile = Pile::new(config.deck_count, seed);
        pile.prepare();
        let players = (0..config.player_count)
            .map(|_| new_player(&config))
            .collect();
        let ctx = GameContext::new(config, Box::new(pile), players, Dealer::new());
        Ok(BlackjackGame::new(ctx))
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn play_count(&self) -> u32 {
        self.ctx.play_count()
    }

    /// Plays rounds until the configured number has been reached. Stops at the first error.
    pub fn play(&mut self) -> Result<(), GameError> {
        log::info!("starting game");
        while self.ctx.config.play_count > self.ctx.play_count() {
            log::info!("round start, count: {}", self.ctx.play_count());
            self.play_round()?;
        }
        Ok(())
    }

    /// Plays a single round from the bets to the payouts.
    pub fn play_round(&mut self) -> Result<(), GameError> {
        let ctx = &mut self.ctx;

        // Betting
        for i in 0..ctx.players.len() {
            player::bet(ctx, i).map_err(|e| e.for_player(i))?;
        }
        ctx.dealer.player_mut().open_round();

        // Two passes, the dealer is dealt last in each
        for _ in 0..2 {
            for i in 0..ctx.players.len() {
                let card = ctx.pile.draw()?;
                ctx.players[i].hit(card)?;
            }
            let card = ctx.pile.draw()?;
            ctx.dealer.player_mut().hit(card)?;
        }

        // Hit or stand
        for i in 0..ctx.players.len() {
            player::make_action(ctx, Seat::Player(i)).map_err(|e| e.for_player(i))?;
        }
        player::make_action(ctx, Seat::Dealer)?;

        // Settlement
        let GameContext {
            players, dealer, ..
        } = ctx;
        for (i, p) in players.iter_mut().enumerate() {
            let payout = p.settle(dealer);
            log::debug!("player {} paid {}, balance {}", i, payout, p.balance());
        }

        ctx.increment_play_count();
        Ok(())
    }

    /// Per player summary of everything played so far.
    pub fn summaries(&self) -> Vec<SimulationSummary> {
        self.ctx
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| SimulationSummary::from_player(i, p, self.ctx.config.initial_amount))
            .collect()
    }
}

fn new_player(config: &Config) -> Player {
    let player = Player::new(config.initial_amount);
    match config.betting_strategy {
        BettingKind::Default => player,
        BettingKind::Martingale => player.betting_strategy(Martingale),
    }
}
