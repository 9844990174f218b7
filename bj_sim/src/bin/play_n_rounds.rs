use bj_sim::{init_logging, write, BlackjackGame, Config, GameError};

/// Plays up to `numb_rounds` rounds, printing every seat after each one. Stops at the first error.
fn play_rounds(game: &mut BlackjackGame, numb_rounds: u32) -> Result<(), GameError> {
    for round in 1..=numb_rounds {
        game.play_round()?;

        println!("{:-^80}", format!("round {round}"));
        for (i, player) in game.context().players.iter().enumerate() {
            println!("player #{}: {}", i + 1, player);
        }
        println!("dealer: {}", game.context().dealer);
        println!();
    }
    Ok(())
}

fn main() {
    let numb_rounds_result = if let Some(n) = std::env::args().nth(1) {
        n.parse::<u32>()
    } else {
        eprintln!("usage: play_n_rounds ROUNDS");
        std::process::exit(1);
    };

    let numb_rounds = match numb_rounds_result {
        Ok(n) => n,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    init_logging(false);

    let config = Config::new().play_count(numb_rounds).build();
    let mut game = match BlackjackGame::from_config(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = play_rounds(&mut game, numb_rounds);

    // Stats cover the rounds played before any failure
    println!("{:-^80}", "stats");
    if let Err(e) = write::write_report(&game.summaries(), std::io::stdout().lock()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
