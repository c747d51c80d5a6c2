//! Move n' Shoot headless runner
//!
//! Plays AI-vs-AI matches with the physics core and prints the final scores.
//!
//! Usage: `move-n-shoot [settings.json]` (log level via `RUST_LOG`)

use std::path::PathBuf;
use std::process::ExitCode;

use move_n_shoot::{MatchLog, Session, Settings};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Move n' Shoot (headless) starting...");

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(settings)?;
    let mut results = MatchLog::new();

    for round in 0..settings.matches {
        if round > 0 {
            session.restart();
        }
        let result = session.run_match()?;
        log::debug!("Final state: {}", serde_json::to_string(&session.state.snapshot())?);

        println!("Final score");
        println!("Player 1: {}", result.scores[0]);
        println!("Player 2: {}", result.scores[1]);
        results.record(result);
    }

    if results.len() > 1 {
        let wins = results.wins();
        println!(
            "Wins after {} matches: P1 {} / P2 {} / draws {}",
            results.len(),
            wins[0],
            wins[1],
            results.draws()
        );
    }

    if let Some(path) = &settings.results_path {
        results.save(path)?;
    }
    Ok(())
}
