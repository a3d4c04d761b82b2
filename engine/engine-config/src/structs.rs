//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_determinizations() -> u32 {
    defaults::determinizations()
}
fn d_rollouts() -> u32 {
    defaults::rollouts_per_round()
}
fn d_max_depth() -> u32 {
    defaults::max_depth()
}
fn d_tie_break() -> String {
    defaults::tie_break().into()
}
fn d_randomize_minimax() -> bool {
    defaults::randomize_minimax()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_parallel_rounds() -> bool {
    defaults::parallel_rounds()
}
fn d_bot_one() -> String {
    defaults::bot_one().into()
}
fn d_bot_two() -> String {
    defaults::bot_two().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub player: PlayerSection,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Move search parameters
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchSection {
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_determinizations")]
    pub determinizations: u32,
    #[serde(default = "d_rollouts")]
    pub rollouts_per_round: u32,
    #[serde(default = "d_max_depth")]
    pub max_depth: u32,
    #[serde(default = "d_tie_break")]
    pub tie_break: String,
    #[serde(default = "d_randomize_minimax")]
    pub randomize_minimax: bool,
    /// 0 disables the wall-clock budget
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    #[serde(default = "d_parallel_rounds")]
    pub parallel_rounds: bool,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            exploration: defaults::exploration(),
            determinizations: defaults::determinizations(),
            rollouts_per_round: defaults::rollouts_per_round(),
            max_depth: defaults::max_depth(),
            tie_break: defaults::tie_break().into(),
            randomize_minimax: defaults::randomize_minimax(),
            time_budget_ms: defaults::time_budget_ms(),
            parallel_rounds: defaults::parallel_rounds(),
        }
    }
}

/// Match player configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayerSection {
    /// Bot kind seated as player one
    #[serde(default = "d_bot_one")]
    pub bot_one: String,
    /// Bot kind seated as player two
    #[serde(default = "d_bot_two")]
    pub bot_two: String,
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            bot_one: defaults::bot_one().into(),
            bot_two: defaults::bot_two().into(),
        }
    }
}
