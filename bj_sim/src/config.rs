//! Table configuration, loaded once at startup.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which betting strategy the simulated players use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BettingKind {
    #[default]
    Default,
    Martingale,
}

/// Struct for configuring a game of blackjack. Every field has a default, so a JSON file only
/// needs to name the values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub deck_count: usize,
    /// Number of rounds to play.
    pub play_count: u32,
    pub min_bet: i64,
    pub max_bet: i64,
    pub min_bet_unit: i64,
    /// Informational for strategies, the turn loop rejects a surrender decision either way.
    pub surrender: bool,
    /// Starting balance of every player.
    pub initial_amount: i64,
    pub player_count: usize,
    /// Seed for the shuffle, a random one is picked when absent.
    pub seed: Option<u64>,
    pub betting_strategy: BettingKind,
}

impl Config {
    /// Associated method for returning a new `ConfigBuilder` object.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn from_json_str(s: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Config, crate::SimulationError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Config::from_json_str(&contents)?)
    }

    /// Checks the limits are coherent before any round is played.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.deck_count == 0 {
            return Err(GameError::Config("deck count must be at least 1".to_string()));
        }
        if self.min_bet_unit <= 0 {
            return Err(GameError::Config(format!(
                "min bet unit must be positive, got {}",
                self.min_bet_unit
            )));
        }
        if self.min_bet <= 0 {
            return Err(GameError::Config(format!(
                "min bet must be positive, got {}",
                self.min_bet
            )));
        }
        if self.min_bet > self.max_bet {
            return Err(GameError::Config(format!(
                "min bet {} is greater than max bet {}",
                self.min_bet, self.max_bet
            )));
        }
        if self.min_bet % self.min_bet_unit != 0 || self.max_bet % self.min_bet_unit != 0 {
            return Err(GameError::Config(format!(
                "bet limits {}..={} must be multiples of {}",
                self.min_bet, self.max_bet, self.min_bet_unit
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    /// Returns the standard configuration for a game.
    fn default() -> Self {
        Config::new().build()
    }
}

/// Struct to implement builder pattern for `Config`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigBuilder {
    deck_count: Option<usize>,
    play_count: Option<u32>,
    min_bet: Option<i64>,
    max_bet: Option<i64>,
    min_bet_unit: Option<i64>,
    surrender: Option<bool>,
    initial_amount: Option<i64>,
    player_count: Option<usize>,
    seed: Option<u64>,
    betting_strategy: Option<BettingKind>,
}

impl ConfigBuilder {
    pub fn deck_count(&mut self, decks: usize) -> &mut Self {
        self.deck_count = Some(decks);
        self
    }

    /// Method for setting the number of rounds played.
    pub fn play_count(&mut self, rounds: u32) -> &mut Self {
        self.play_count = Some(rounds);
        self
    }

    pub fn min_bet(&mut self, bet: i64) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    pub fn max_bet(&mut self, bet: i64) -> &mut Self {
        self.max_bet = Some(bet);
        self
    }

    pub fn min_bet_unit(&mut self, unit: i64) -> &mut Self {
        self.min_bet_unit = Some(unit);
        self
    }

    /// Method for setting a flag that determines if the game allows surrender or not
    pub fn surrender(&mut self, surrender: bool) -> &mut Self {
        self.surrender = Some(surrender);
        self
    }

    pub fn initial_amount(&mut self, amount: i64) -> &mut Self {
        self.initial_amount = Some(amount);
        self
    }

    pub fn player_count(&mut self, players: usize) -> &mut Self {
        self.player_count = Some(players);
        self
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn betting_strategy(&mut self, kind: BettingKind) -> &mut Self {
        self.betting_strategy = Some(kind);
        self
    }

    /// Method for building a `Config` object, unset values fall back to the defaults.
    pub fn build(&mut self) -> Config {
        Config {
            deck_count: self.deck_count.unwrap_or(5),
            play_count: self.play_count.unwrap_or(10),
            min_bet: self.min_bet.unwrap_or(5),
            max_bet: self.max_bet.unwrap_or(50),
            min_bet_unit: self.min_bet_unit.unwrap_or(5),
            surrender: self.surrender.unwrap_or(true),
            initial_amount: self.initial_amount.unwrap_or(1000),
            player_count: self.player_count.unwrap_or(5),
            seed: self.seed,
            betting_strategy: self.betting_strategy.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.deck_count, 5);
        assert_eq!(config.play_count, 10);
        assert_eq!(config.min_bet, 5);
        assert_eq!(config.max_bet, 50);
        assert_eq!(config.initial_amount, 1000);
        assert_eq!(config.player_count, 5);
        assert_eq!(config.betting_strategy, BettingKind::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            Config::from_json_str(r#"{"min_bet": 10, "betting_strategy": "martingale"}"#).unwrap();
        assert_eq!(config.min_bet, 10);
        assert_eq!(config.max_bet, 50);
        assert_eq!(config.betting_strategy, BettingKind::Martingale);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(Config::from_json_str(r#"{"betting_strategy": "paroli"}"#).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Config::new().deck_count(0).build().validate().is_err());
        assert!(Config::new().min_bet(60).build().validate().is_err());
        assert!(Config::new().min_bet(0).build().validate().is_err());
        assert!(Config::new().min_bet(7).build().validate().is_err());
        assert!(Config::new().min_bet_unit(0).build().validate().is_err());
        assert!(Config::new()
            .min_bet(50)
            .max_bet(500)
            .min_bet_unit(10)
            .build()
            .validate()
            .is_ok());
    }
}
