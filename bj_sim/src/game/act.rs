use std::fmt::Display;

/// The kind of decision recorded in a round's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    InitialBet,
    DoubleDown,
    Split,
    Surrender,
    Insure,
    Return,
    Hit,
    Stand,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Reason::InitialBet => "initial bet",
            Reason::DoubleDown => "double down",
            Reason::Split => "split",
            Reason::Surrender => "surrender",
            Reason::Insure => "insure",
            Reason::Return => "return",
            Reason::Hit => "hit",
            Reason::Stand => "stand",
        };
        write!(f, "{}", s)
    }
}

/// One entry of a round's log: what was done and how many chips moved.
///
/// Stakes leaving the bankroll are negative, payouts credited at settlement are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Act {
    pub reason: Reason,
    pub value: i64,
}

impl Act {
    /// Initial bet, `value` is expected to be negative.
    pub fn bet(value: i64) -> Act {
        Act {
            reason: Reason::InitialBet,
            value,
        }
    }

    pub fn double_down(value: i64) -> Act {
        Act {
            reason: Reason::DoubleDown,
            value,
        }
    }

    pub fn split(value: i64) -> Act {
        Act {
            reason: Reason::Split,
            value,
        }
    }

    pub fn hit() -> Act {
        Act {
            reason: Reason::Hit,
            value: 0,
        }
    }

    pub fn stand() -> Act {
        Act {
            reason: Reason::Stand,
            value: 0,
        }
    }

    /// Payout credited when the round is settled.
    pub fn payout(value: i64) -> Act {
        Act {
            reason: Reason::Return,
            value,
        }
    }

    /// Chips committed by this act, zero for anything that is not a stake.
    pub fn stake(&self) -> i64 {
        if self.value < 0 {
            -self.value
        } else {
            0
        }
    }
}

impl Display for Act {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value == 0 {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}({:+})", self.reason, self.value)
        }
    }
}
