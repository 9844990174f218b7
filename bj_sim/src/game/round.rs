//! A single playable unit of blackjack.
//!
//! A `Round` is either a leaf that ends up with an [`Outcome`], or a split node that owns exactly two
//! child rounds. The act log is the source of truth for the stake and for whether play is over.

use crate::error::GameError;
use crate::game::act::{Act, Reason};
use bj_lib::{Card, Hand};
use std::fmt::{Display, Write};

/// Result of a settled leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
    Surrendered,
    Insured,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
            Outcome::Surrendered => "surrendered",
            Outcome::Insured => "insured",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Status {
    #[default]
    Pending,
    Settled(Outcome),
    Split(Box<[Round; 2]>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    hand: Hand,
    acts: Vec<Act>,
    status: Status,
}

impl Round {
    pub fn new() -> Round {
        Round::default()
    }

    /// Builds a leaf round from already dealt cards and an existing act log.
    pub fn from_parts(cards: Vec<Card>, acts: Vec<Act>) -> Round {
        Round {
            hand: cards.into(),
            acts,
            status: Status::Pending,
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn acts(&self) -> &[Act] {
        &self.acts
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self.status, Status::Split(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, Status::Pending)
    }

    pub fn children(&self) -> Option<&[Round; 2]> {
        match &self.status {
            Status::Split(children) => Some(children),
            _ => None,
        }
    }

    pub fn sum(&self) -> u32 {
        self.hand.sum()
    }

    pub fn is_bust(&self) -> bool {
        self.hand.is_bust()
    }

    pub fn is_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    pub(crate) fn push_act(&mut self, act: Act) {
        self.acts.push(act);
    }

    /// Most recent act in this round's own log.
    pub fn tail(&self) -> Option<&Act> {
        self.acts.last()
    }

    /// First act with the given reason.
    pub fn find_by(&self, reason: Reason) -> Option<&Act> {
        self.acts.iter().find(|a| a.reason == reason)
    }

    pub fn initial_bet(&self) -> Option<i64> {
        self.find_by(Reason::InitialBet).map(|a| a.value)
    }

    /// Deals `card` into the hand and records the hit.
    pub fn hit(&mut self, card: Card) {
        self.hand.push(card);
        self.acts.push(Act::hit());
    }

    /// Commits the initial bet a second time. The caller draws the one card that follows.
    pub fn double_down(&mut self, balance: &mut i64) -> Result<(), GameError> {
        let bet = self.initial_bet().ok_or(GameError::MissingInitialBet)?;
        *balance += bet;
        self.acts.push(Act::double_down(bet));
        Ok(())
    }

    /// Splits a two card hand into two child rounds, each holding one card and a copy of the
    /// initial bet. The extra stake is taken from `balance`. Nothing is mutated on failure.
    pub fn split(&mut self, balance: &mut i64) -> Result<(), GameError> {
        let count = self.hand.len();
        if count != 2 {
            return Err(GameError::InvalidSplit { count });
        }
        let bet = self.initial_bet().ok_or(GameError::MissingInitialBet)?;
        let cards = self.hand.cards();
        let children = [
            Round::from_parts(vec![cards[0]], vec![Act::bet(bet)]),
            Round::from_parts(vec![cards[1]], vec![Act::bet(bet)]),
        ];
        self.acts.push(Act::split(-bet));
        *balance += bet;
        self.status = Status::Split(Box::new(children));
        Ok(())
    }

    /// Whether play on this round is over.
    ///
    /// A leaf is done once it is bust or a blackjack, or once it stood or doubled down. A split
    /// node is done when both of its children are.
    pub fn is_done(&self) -> bool {
        match &self.status {
            Status::Split(children) => children.iter().all(Round::is_done),
            Status::Settled(_) => true,
            Status::Pending => {
                let score = self.hand.score();
                if score.bust || score.blackjack {
                    return true;
                }
                self.acts
                    .iter()
                    .rev()
                    .any(|a| matches!(a.reason, Reason::Stand | Reason::DoubleDown))
            }
        }
    }

    /// The leftmost leaf, depth first, that still has play left.
    pub fn playable(&self) -> Option<&Round> {
        if let Status::Split(children) = &self.status {
            return children.iter().find_map(Round::playable);
        }
        if self.is_done() {
            None
        } else {
            Some(self)
        }
    }

    pub fn playable_mut(&mut self) -> Option<&mut Round> {
        if self.is_split() {
            return match &mut self.status {
                Status::Split(children) => children.iter_mut().find_map(Round::playable_mut),
                _ => None,
            };
        }
        if self.is_done() {
            None
        } else {
            Some(self)
        }
    }

    /// All leaves of the tree in depth first order.
    pub fn leaves(&self) -> Vec<&Round> {
        match &self.status {
            Status::Split(children) => children.iter().flat_map(Round::leaves).collect(),
            _ => vec![self],
        }
    }

    /// Assigns an outcome to this leaf. Split nodes and already settled leaves are left alone.
    pub fn settle(&mut self, outcome: Outcome) {
        if self.is_pending() {
            self.status = Status::Settled(outcome);
        }
    }

    /// Settles every pending leaf of the tree with the outcome `decide` gives for it.
    pub fn settle_with<F>(&mut self, decide: &F)
    where
        F: Fn(&Round) -> Outcome,
    {
        if let Status::Split(children) = &mut self.status {
            for child in children.iter_mut() {
                child.settle_with(decide);
            }
            return;
        }
        if self.is_pending() {
            let outcome = decide(self);
            self.status = Status::Settled(outcome);
        }
    }

    /// Stake committed by this round's own log, zero for a split node whose stake moved to its
    /// children.
    pub fn bet_summary(&self) -> i64 {
        if self.is_split() {
            return 0;
        }
        self.acts.iter().map(Act::stake).sum()
    }

    /// Stake committed over every leaf of the tree.
    pub fn total_stake(&self) -> i64 {
        match &self.status {
            Status::Split(children) => children.iter().map(Round::total_stake).sum(),
            _ => self.bet_summary(),
        }
    }

    /// Chips won (positive) or lost (negative) by the tree, counting stakes and payouts.
    pub fn net(&self) -> i64 {
        match &self.status {
            Status::Split(children) => children.iter().map(Round::net).sum(),
            _ => self.acts.iter().map(|a| a.value).sum(),
        }
    }

    /// Computes the payout of a settled round and books it as a `return` act.
    ///
    /// Losing pays nothing, a draw returns the stake, a win pays twice the stake and a natural
    /// blackjack two and a half times, rounded down. A split node pays the sum of its children.
    /// Calling it again returns the booked payout without booking it twice.
    pub fn payout(&mut self) -> i64 {
        if let Status::Split(children) = &mut self.status {
            return children.iter_mut().map(Round::payout).sum();
        }
        if let Some(booked) = self.find_by(Reason::Return) {
            return booked.value;
        }
        let stake = self.bet_summary();
        let payout = match self.status {
            Status::Settled(Outcome::Win) if self.is_blackjack() => stake * 5 / 2,
            Status::Settled(Outcome::Win) => stake * 2,
            Status::Settled(Outcome::Draw) => stake,
            Status::Settled(Outcome::Surrendered) => stake / 2,
            Status::Settled(Outcome::Lose) | Status::Settled(Outcome::Insured) => return 0,
            Status::Pending | Status::Split(_) => return 0,
        };
        self.acts.push(Act::payout(payout));
        payout
    }

    fn write_tree(&self, out: &mut String, depth: usize) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        let status = match &self.status {
            Status::Pending => "pending".to_string(),
            Status::Settled(outcome) => outcome.to_string(),
            Status::Split(_) => "splitted".to_string(),
        };
        let acts = self
            .acts
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        writeln!(out, "{}{} {} | {}", indent, self.hand, status, acts)?;
        if let Status::Split(children) = &self.status {
            for child in children.iter() {
                child.write_tree(out, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        self.write_tree(&mut out, 0)?;
        write!(f, "{}", out.trim_end())
    }
}
