//! Move selection bots seated at the table

use anyhow::{Context, Result};
use engine_core::{random_move, GameState, Player};
use mcts::{decide, Decision, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::config::{BotKind, Config};

/// A player that picks moves for whichever seat it occupies.
pub trait Bot<S: GameState> {
    fn name(&self) -> &str;

    /// Pick a move for the mover of `state`. `None` only for finished games.
    fn get_move(&mut self, state: &S) -> Result<Option<S::Move>>;
}

/// Bot backed by determinized search and alpha-beta.
///
/// Each decision uses a fresh seed derived from the configured one, so a
/// match is reproducible without every decision drawing the same numbers.
#[derive(Debug)]
pub struct SearchBot {
    name: String,
    config: SearchConfig,
    decisions: u64,
}

impl SearchBot {
    pub fn new(name: impl Into<String>, config: SearchConfig) -> Self {
        Self {
            name: name.into(),
            config,
            decisions: 0,
        }
    }

    fn next_config(&mut self) -> SearchConfig {
        let seed = self.config.seed.wrapping_add(self.decisions);
        self.decisions += 1;
        self.config.clone().with_seed(seed)
    }
}

impl<S: GameState> Bot<S> for SearchBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, state: &S) -> Result<Option<S::Move>> {
        let config = self.next_config();
        let decision = decide(state, &config)
            .with_context(|| format!("{} failed to select a move", self.name))?;

        match &decision {
            Decision::Searched(result) => {
                if result.fallback {
                    info!(bot = %self.name, "time budget exhausted, played a random move");
                }
                debug!(
                    bot = %self.name,
                    decision = self.decisions,
                    iterations = result.iterations,
                    rounds = result.rounds,
                    elapsed_ms = result.elapsed.as_millis() as u64,
                    "searched decision"
                );
                for (mv, stats) in &result.stats {
                    debug!(
                        bot = %self.name,
                        mv = ?mv,
                        wins = stats.wins,
                        visits = stats.visits,
                        ratio = stats.win_ratio(),
                        "candidate"
                    );
                }
            }
            Decision::Solved { value, .. } => {
                debug!(bot = %self.name, value, "solved decision");
            }
            Decision::Forced(_) | Decision::GameOver => {}
        }

        Ok(decision.into_move())
    }
}

/// Bot that picks uniformly among legal moves.
#[derive(Debug)]
pub struct RandomBot {
    name: String,
    rng: ChaCha20Rng,
}

impl RandomBot {
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<S: GameState> Bot<S> for RandomBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, state: &S) -> Result<Option<S::Move>> {
        Ok(random_move(state, &mut self.rng))
    }
}

/// Build the bot configured for `seat`.
pub fn build_bot<S: GameState>(seat: Player, config: &Config) -> Result<Box<dyn Bot<S>>> {
    let kind = match seat {
        Player::One => config.bot_one()?,
        Player::Two => config.bot_two()?,
    };
    // Seats draw from different seeds so two equal bots do not mirror each other.
    let seed = config.seed.wrapping_add(1 + seat.index() as u64);
    let name = format!("{:?}-{}", kind, seat.index() + 1).to_lowercase();

    Ok(match kind {
        BotKind::Search => Box::new(SearchBot::new(
            name,
            config.search_config()?.with_seed(seed),
        )),
        BotKind::Random => Box::new(RandomBot::with_seed(name, seed)),
    })
}
