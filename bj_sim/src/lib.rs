pub mod config;
pub mod error;
pub mod game;
pub mod stats;
pub mod write;

pub use config::{BettingKind, Config, ConfigBuilder};
pub use error::{GameError, SimulationError};
pub use game::prelude::*;
pub use stats::SimulationSummary;

use std::collections::HashSet;
use std::io::Write;
use std::sync::mpsc;
use std::thread;

pub mod prelude {
    pub use super::{
        game::prelude::*, BettingKind, Config, ConfigBuilder, GameError, SimulationError,
        SimulationSummary, Simulator, SimulatorBuilder,
    };
}

/// Sets up terminal logging, `Debug` when `verbose` is set and `Info` otherwise.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    if let Err(e) = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("warning: logger already initialized: {e}");
    }
}

/// Runs many independent games with the same configuration and reports the results merged per
/// seat. Every run owns its own pile, seeded `base_seed + run id`, and its own players, so runs
/// share nothing and are spread over worker threads.
pub struct Simulator {
    config: Config,
    num_simulations: usize,
    base_seed: u64,
    num_workers: usize,
}

impl Simulator {
    /// Method that returns a new `SimulatorBuilder` object.
    pub fn new(config: Config) -> SimulatorBuilder {
        SimulatorBuilder {
            config,
            num_simulations: None,
            base_seed: None,
            num_workers: None,
        }
    }

    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// Runs every simulation and writes the merged summaries to `out`. Returns the first game
    /// error any run hit.
    pub fn run(&self, out: Box<dyn Write + Send + 'static>) -> Result<(), SimulationError> {
        let (sender, receiver) = mpsc::channel::<(Option<Vec<SimulationSummary>>, usize)>();

        // Create unique id's for each simulation, that way the writing thread knows when one is done
        let ids: HashSet<usize> = (1..=self.num_simulations).collect();
        let write_handle = thread::spawn(move || write::write_summaries(receiver, ids, out));

        let workers = self.num_workers.clamp(1, self.num_simulations.max(1));
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let sender = sender.clone();
            let config = self.config;
            let base_seed = self.base_seed;
            let num_simulations = self.num_simulations;
            handles.push(thread::spawn(move || -> Result<(), SimulationError> {
                for id in (worker + 1..=num_simulations).step_by(workers) {
                    let summaries = run_single(config, base_seed.wrapping_add(id as u64))
                        .map_err(|source| SimulationError::GameError { id, source })?;
                    sender
                        .send((Some(summaries), id))
                        .map_err(|e| SimulationError::SendingError(e.to_string()))?;
                    sender
                        .send((None, id))
                        .map_err(|e| SimulationError::SendingError(e.to_string()))?;
                }
                Ok(())
            }));
        }
        // Only the workers hold senders now, the writer stops once they are all gone
        drop(sender);

        let mut result = Ok(());
        for handle in handles {
            let outcome = handle.join().map_err(|_| SimulationError::Panicked)?;
            if let (Err(e), Ok(())) = (outcome, &result) {
                log::error!("{e}");
                result = Err(e);
            }
        }
        write_handle
            .join()
            .map_err(|_| SimulationError::Panicked)?
            .map_err(SimulationError::WriteError)?;
        result
    }
}

/// Plays one full game and returns the summary of every seat.
fn run_single(mut config: Config, seed: u64) -> Result<Vec<SimulationSummary>, GameError> {
    config.seed = Some(seed);
    let mut game = BlackjackGame::from_config(config)?;
    game.play()?;
    Ok(game.summaries())
}

/// Struct for building a `Simulator` object
pub struct SimulatorBuilder {
    config: Config,
    num_simulations: Option<usize>,
    base_seed: Option<u64>,
    num_workers: Option<usize>,
}

impl SimulatorBuilder {
    pub fn num_simulations(&mut self, n: usize) -> &mut Self {
        self.num_simulations = Some(n);
        self
    }

    /// Seed of the first run, later runs add their id to it. Defaults to the configured seed, or
    /// a random one.
    pub fn base_seed(&mut self, seed: u64) -> &mut Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn num_workers(&mut self, workers: usize) -> &mut Self {
        self.num_workers = Some(workers);
        self
    }

    pub fn build(&mut self) -> Simulator {
        let base_seed = self
            .base_seed
            .or(self.config.seed)
            .unwrap_or_else(rand::random);
        let num_workers = self.num_workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        Simulator {
            config: self.config,
            num_simulations: self.num_simulations.unwrap_or(100),
            base_seed,
            num_workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps what was written so the test can read it back after the threads finish.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn run_multiple_simulations() {
        let config = Config::new().player_count(2).play_count(15).build();
        let simulator = Simulator::new(config)
            .num_simulations(6)
            .num_workers(3)
            .base_seed(1)
            .build();
        let buffer = SharedBuffer::default();
        simulator.run(Box::new(buffer.clone())).unwrap();

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("player #1"));
        assert!(text.contains("player #2"));
        assert!(!text.contains("player #3"));
    }

    #[test]
    fn runs_are_reproducible() {
        let config = Config::new().play_count(10).build();
        assert_eq!(run_single(config, 3).unwrap(), run_single(config, 3).unwrap());
    }

    #[test]
    fn failing_run_is_reported() {
        // Not enough chips for the rounds requested
        let config = Config::new()
            .initial_amount(10)
            .play_count(50)
            .player_count(1)
            .build();
        let simulator = Simulator::new(config)
            .num_simulations(2)
            .num_workers(1)
            .base_seed(5)
            .build();
        let result = simulator.run(Box::new(std::io::sink()));
        assert!(matches!(result, Err(SimulationError::GameError { .. })));
    }
}
