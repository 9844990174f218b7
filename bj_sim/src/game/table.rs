use crate::config::Config;
use crate::game::dealer::Dealer;
use crate::game::player::Player;
use bj_lib::CardSource;

/// Identifies who is acting at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Player(usize),
    Dealer,
}

/// Everything a strategy may look at when it makes a decision. Bundles the arguments so the
/// strategy traits only need one parameter.
pub struct TableState<'a> {
    pub config: &'a Config,
    pub pile: &'a dyn CardSource,
    pub myself: &'a Player,
    pub players: &'a [Player],
    pub dealer: &'a Dealer,
}

/// The mutable state of a table: the shoe, the players, the dealer and the number of rounds
/// played so far.
pub struct GameContext {
    pub config: Config,
    pub pile: Box<dyn CardSource>,
    pub players: Vec<Player>,
    pub dealer: Dealer,
    play_count: u32,
}

impl GameContext {
    pub fn new(
        config: Config,
        pile: Box<dyn CardSource>,
        players: Vec<Player>,
        dealer: Dealer,
    ) -> GameContext {
        GameContext {
            config,
            pile,
            players,
            dealer,
            play_count: 0,
        }
    }

    /// Number of rounds completed so far.
    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    pub fn increment_play_count(&mut self) {
        self.play_count += 1;
    }

    /// Will panic if `seat` names a player index that does not exist.
    pub fn seat(&self, seat: Seat) -> &Player {
        match seat {
            Seat::Player(i) => &self.players[i],
            Seat::Dealer => self.dealer.player(),
        }
    }

    pub fn seat_mut(&mut self, seat: Seat) -> &mut Player {
        match seat {
            Seat::Player(i) => &mut self.players[i],
            Seat::Dealer => self.dealer.player_mut(),
        }
    }

    /// Borrows the player at `seat` together with the pile, so a card can be drawn straight into
    /// their hand.
    pub fn seat_and_pile(&mut self, seat: Seat) -> (&mut Player, &mut dyn CardSource) {
        let GameContext {
            pile,
            players,
            dealer,
            ..
        } = self;
        let player = match seat {
            Seat::Player(i) => &mut players[i],
            Seat::Dealer => dealer.player_mut(),
        };
        (player, &mut **pile)
    }

    /// Read only view of the table from the point of view of `seat`.
    pub fn table_state(&self, seat: Seat) -> TableState<'_> {
        TableState {
            config: &self.config,
            pile: &*self.pile,
            myself: self.seat(seat),
            players: &self.players,
            dealer: &self.dealer,
        }
    }
}
