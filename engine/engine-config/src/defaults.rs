//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time, so a binary started
//! without any config.toml still has every value.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    player: PlayerDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    exploration: f64,
    determinizations: u32,
    rollouts_per_round: u32,
    max_depth: u32,
    tie_break: String,
    randomize_minimax: bool,
    time_budget_ms: u64,
    parallel_rounds: bool,
}

#[derive(Debug, Deserialize)]
struct PlayerDefaults {
    bot_one: String,
    bot_two: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Search
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn determinizations() -> u32 {
    DEFAULTS.search.determinizations
}
pub fn rollouts_per_round() -> u32 {
    DEFAULTS.search.rollouts_per_round
}
pub fn max_depth() -> u32 {
    DEFAULTS.search.max_depth
}
pub fn tie_break() -> &'static str {
    &DEFAULTS.search.tie_break
}
pub fn randomize_minimax() -> bool {
    DEFAULTS.search.randomize_minimax
}
pub fn time_budget_ms() -> u64 {
    DEFAULTS.search.time_budget_ms
}
pub fn parallel_rounds() -> bool {
    DEFAULTS.search.parallel_rounds
}

// Player
pub fn bot_one() -> &'static str {
    &DEFAULTS.player.bot_one
}
pub fn bot_two() -> &'static str {
    &DEFAULTS.player.bot_two
}
