//! Configuration for the match player
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::{SearchConfig, TieBreak};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_bot_one() -> String {
    CENTRAL_CONFIG.player.bot_one.clone()
}

fn default_bot_two() -> String {
    CENTRAL_CONFIG.player.bot_two.clone()
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.search.exploration
}

fn default_determinizations() -> u32 {
    CENTRAL_CONFIG.search.determinizations
}

fn default_rollouts_per_round() -> u32 {
    CENTRAL_CONFIG.search.rollouts_per_round
}

fn default_max_depth() -> u32 {
    CENTRAL_CONFIG.search.max_depth
}

fn default_tie_break() -> String {
    CENTRAL_CONFIG.search.tie_break.clone()
}

fn default_randomize_minimax() -> bool {
    CENTRAL_CONFIG.search.randomize_minimax
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.search.time_budget_ms
}

fn default_parallel_rounds() -> bool {
    CENTRAL_CONFIG.search.parallel_rounds
}

/// Kind of bot seated at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    Search,
    Random,
}

impl FromStr for BotKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "search" | "mcts" => Ok(BotKind::Search),
            "random" => Ok(BotKind::Random),
            other => Err(anyhow!(
                "unknown bot kind '{}', expected 'search' or 'random'",
                other
            )),
        }
    }
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "player")]
#[command(about = "Foresight player - plays one Schnapsen match between two bots")]
#[command(
    long_about = "Deals a Schnapsen game from the configured seed and plays it out
between two bots, logging every decision.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Seed for the deal and for every bot decision
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Bot seated as player one (search or random)
    #[arg(long, default_value_t = default_bot_one())]
    pub bot_one: String,

    /// Bot seated as player two (search or random)
    #[arg(long, default_value_t = default_bot_two())]
    pub bot_two: String,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Determinization rounds per decision
    #[arg(long, default_value_t = default_determinizations())]
    pub determinizations: u32,

    /// Simulations per determinization round
    #[arg(long, default_value_t = default_rollouts_per_round())]
    pub rollouts_per_round: u32,

    /// Alpha-beta depth limit once nothing is hidden
    #[arg(long, default_value_t = default_max_depth())]
    pub max_depth: u32,

    /// Tie break between equally good moves (insertion or random)
    #[arg(long, default_value_t = default_tie_break())]
    pub tie_break: String,

    /// Shuffle move order in alpha-beta
    #[arg(long, default_value_t = default_randomize_minimax(), action = clap::ArgAction::Set)]
    pub randomize_minimax: bool,

    /// Wall-clock budget per decision in milliseconds (0 to disable)
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// Run determinization rounds in parallel
    #[arg(long, default_value_t = default_parallel_rounds(), action = clap::ArgAction::Set)]
    pub parallel_rounds: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.bot_one().context("bot_one")?;
        self.bot_two().context("bot_two")?;

        self.search_config()?
            .validate()
            .context("invalid search configuration")?;

        Ok(())
    }

    pub fn bot_one(&self) -> Result<BotKind> {
        self.bot_one.parse()
    }

    pub fn bot_two(&self) -> Result<BotKind> {
        self.bot_two.parse()
    }

    pub fn time_budget(&self) -> Option<Duration> {
        (self.time_budget_ms > 0).then(|| Duration::from_millis(self.time_budget_ms))
    }

    /// Search parameters for a searching bot.
    pub fn search_config(&self) -> Result<SearchConfig> {
        let tie_break: TieBreak = self.tie_break.parse()?;
        Ok(SearchConfig::default()
            .with_exploration(self.exploration)
            .with_determinizations(self.determinizations)
            .with_rollouts_per_round(self.rollouts_per_round)
            .with_max_depth(self.max_depth)
            .with_seed(self.seed)
            .with_tie_break(tie_break)
            .with_randomized_minimax(self.randomize_minimax)
            .with_time_budget(self.time_budget())
            .with_parallel_rounds(self.parallel_rounds))
    }
}
