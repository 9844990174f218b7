//! Error types for the simulator.

use crate::game::act::Reason;
use bj_lib::CardError;
use thiserror::Error;

/// Errors raised while playing a round. Every variant is fatal to a run, they signal either a
/// strategy breaking its contract or a bad configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("betting amount must be greater equal than min bet. min bet: {min}, bet: {bet}")]
    BetBelowMinimum { min: i64, bet: i64 },
    #[error("betting amount must be lesser equal than max bet. max bet: {max}, bet: {bet}")]
    BetAboveMaximum { max: i64, bet: i64 },
    #[error("bet exceeds player's amount. amount: {balance}, bet: {bet}")]
    BetExceedsBalance { balance: i64, bet: i64 },
    #[error("betting strategy must return a negative initial bet, got {reason} with value {value}")]
    InvalidBetAct { reason: Reason, value: i64 },
    #[error("split must have one pair card. count: {count}")]
    InvalidSplit { count: usize },
    #[error("round has no initial bet to duplicate")]
    MissingInitialBet,
    #[error("player has no round left to act on")]
    NoActiveRound,
    #[error("unexpected act for player: {reason}")]
    UnexpectedAction { reason: Reason },
    #[error("got error for player {index}: {source}")]
    Player {
        index: usize,
        #[source]
        source: Box<GameError>,
    },
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GameError {
    /// Tags the error with the index of the player it came from.
    pub fn for_player(self, index: usize) -> GameError {
        GameError::Player {
            index,
            source: Box::new(self),
        }
    }
}

/// Errors raised by the batch `Simulator`.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("simulation #{id} failed: {source}")]
    GameError {
        id: usize,
        #[source]
        source: GameError,
    },
    #[error("failed to send summary: {0}")]
    SendingError(String),
    #[error("failed to write summaries: {0}")]
    WriteError(#[source] std::io::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("simulation thread panicked")]
    Panicked,
    #[error("failed to read configuration: {0}")]
    ConfigError(#[from] serde_json::Error),
}
