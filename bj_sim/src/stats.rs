use crate::game::act::Reason;
use crate::game::player::Player;
use crate::game::round::{Outcome, Round};
use std::fmt::Display;

/// Simple struct for recording all of the interesting data points accumulated by one seat during
/// a simulation. Summaries of the same seat from independent runs can be merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub seat: usize,
    pub runs: u32,
    pub rounds: u32,
    pub wins: i32,
    pub pushes: i32,
    pub losses: i32,
    pub other_outcomes: i32,
    pub player_blackjacks: i32,
    pub splits: i32,
    pub double_downs: i32,
    pub winnings: i64,
    pub final_balance: i64,
}

impl SimulationSummary {
    /// Builds the summary of `player`'s history, `starting_balance` is what the player sat down with.
    pub fn from_player(seat: usize, player: &Player, starting_balance: i64) -> SimulationSummary {
        let mut summary = SimulationSummary {
            seat,
            runs: 1,
            rounds: player.history().len() as u32,
            winnings: player.balance() - starting_balance,
            final_balance: player.balance(),
            ..Default::default()
        };
        for round in player.history() {
            summary.splits += count_splits(round);
            for leaf in round.leaves() {
                match leaf.outcome() {
                    Some(Outcome::Win) => summary.wins += 1,
                    Some(Outcome::Draw) => summary.pushes += 1,
                    Some(Outcome::Lose) => summary.losses += 1,
                    Some(_) => summary.other_outcomes += 1,
                    None => {}
                }
                if leaf.is_blackjack() {
                    summary.player_blackjacks += 1;
                }
                if leaf.find_by(Reason::DoubleDown).is_some() {
                    summary.double_downs += 1;
                }
            }
        }
        summary
    }

    /// Adds the counts of another run of the same seat.
    pub fn merge(&mut self, other: &SimulationSummary) {
        self.runs += other.runs;
        self.rounds += other.rounds;
        self.wins += other.wins;
        self.pushes += other.pushes;
        self.losses += other.losses;
        self.other_outcomes += other.other_outcomes;
        self.player_blackjacks += other.player_blackjacks;
        self.splits += other.splits;
        self.double_downs += other.double_downs;
        self.winnings += other.winnings;
        self.final_balance += other.final_balance;
    }

    /// Number of settled hands, a split round counts once per leaf.
    pub fn hands(&self) -> i32 {
        self.wins + self.pushes + self.losses + self.other_outcomes
    }
}

fn count_splits(round: &Round) -> i32 {
    match round.children() {
        Some(children) => 1 + children.iter().map(count_splits).sum::<i32>(),
        None => 0,
    }
}

fn ratio(n: f64, d: f64) -> f64 {
    if d == 0.0 {
        0.0
    } else {
        n / d
    }
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let hands = f64::from(self.hands());
        write!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}\n",
            "simulations run",
            self.runs,
            "rounds played",
            self.rounds,
            "hands won",
            self.wins,
            "hands pushed",
            self.pushes,
            "hands lost",
            self.losses,
            "number of player blackjacks",
            self.player_blackjacks,
            "splits",
            self.splits,
            "double downs",
            self.double_downs,
            "winnings",
            self.winnings,
            "win percentage",
            ratio(f64::from(self.wins), hands),
            "push percentage",
            ratio(f64::from(self.pushes), hands),
            "loss percentage",
            ratio(f64::from(self.losses), hands),
            "average winnings per hand",
            ratio(self.winnings as f64, hands),
            "average final balance",
            ratio(self.final_balance as f64, f64::from(self.runs)),
        )
    }
}
