//! Player - plays one Schnapsen match between two bots
//!
//! 1. Loads configuration (config.toml, env overrides, CLI flags)
//! 2. Deals a game from the configured seed
//! 3. Seats the configured bots and plays the game out
//! 4. Reports the winner and game points

use anyhow::Result;
use clap::Parser;
use engine_core::{GameState, Player};
use games_schnapsen::State;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod bot;
mod config;
mod match_runner;

use crate::bot::build_bot;
use crate::config::Config;
use crate::match_runner::play_match;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, seed = config.seed, "Tracing initialized");

    let state = State::deal(&mut ChaCha20Rng::seed_from_u64(config.seed));
    info!(trump = ?state.trump(), leader = %state.mover(), "Dealt game");

    let mut bots = [
        build_bot::<State>(Player::One, &config)?,
        build_bot::<State>(Player::Two, &config)?,
    ];
    info!(
        bot_one = bots[0].name(),
        bot_two = bots[1].name(),
        "Bots seated"
    );

    let report = play_match(&mut bots, state)?;
    info!(
        plies = report.plies,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Match complete"
    );
    for player in Player::ALL {
        info!(
            %player,
            bot = bots[player.index()].name(),
            points = report.final_state.points(player),
            tricks = report.final_state.tricks_won(player),
            "Final score"
        );
    }

    match report.outcome.winner() {
        Some(winner) => println!(
            "{} ({}) wins {:?} after {} plies",
            winner,
            bots[winner.index()].name(),
            report.outcome,
            report.plies
        ),
        None => println!("draw after {} plies", report.plies),
    }

    Ok(())
}
