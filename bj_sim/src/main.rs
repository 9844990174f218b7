use bj_sim::{init_logging, write, BettingKind, BlackjackGame, Config, SimulationError, Simulator};
use clap::Parser;
use std::path::PathBuf;

/// Simulates rounds of blackjack between a dealer and a table of players.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON file with the table configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rounds to play
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Number of players at the table
    #[arg(short, long)]
    players: Option<usize>,

    /// Number of decks in the pile
    #[arg(short, long)]
    decks: Option<usize>,

    /// Seed for the pile shuffles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Players bet with the martingale system
    #[arg(long)]
    martingale: bool,

    /// Run this many independent games and report the merged results
    #[arg(long)]
    simulations: Option<usize>,

    /// Log every round and shuffle
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn load_config(&self) -> Result<Config, SimulationError> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(rounds) = self.rounds {
            config.play_count = rounds;
        }
        if let Some(players) = self.players {
            config.player_count = players;
        }
        if let Some(decks) = self.decks {
            config.deck_count = decks;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.martingale {
            config.betting_strategy = BettingKind::Martingale;
        }
        Ok(config)
    }
}

fn run(args: &Args) -> Result<(), SimulationError> {
    let config = args.load_config()?;
    match args.simulations {
        Some(n) => Simulator::new(config)
            .num_simulations(n)
            .build()
            .run(Box::new(std::io::stdout())),
        None => {
            let mut game = BlackjackGame::from_config(config)
                .map_err(|source| SimulationError::GameError { id: 0, source })?;
            game.play()
                .map_err(|source| SimulationError::GameError { id: 0, source })?;
            write::write_report(&game.summaries(), std::io::stdout().lock())?;
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(e) = run(&args) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
