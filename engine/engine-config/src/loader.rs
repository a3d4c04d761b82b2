//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "FORESIGHT_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the FORESIGHT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_VAR, path.display());
            return load_from_path(path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_VAR,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, bool)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: FORESIGHT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "FORESIGHT_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "FORESIGHT_COMMON_SEED", parse);

    // Search
    env_override!(
        config,
        search.exploration,
        "FORESIGHT_SEARCH_EXPLORATION",
        parse
    );
    env_override!(
        config,
        search.determinizations,
        "FORESIGHT_SEARCH_DETERMINIZATIONS",
        parse
    );
    env_override!(
        config,
        search.rollouts_per_round,
        "FORESIGHT_SEARCH_ROLLOUTS_PER_ROUND",
        parse
    );
    env_override!(
        config,
        search.max_depth,
        "FORESIGHT_SEARCH_MAX_DEPTH",
        parse
    );
    env_override!(config, search.tie_break, "FORESIGHT_SEARCH_TIE_BREAK");
    env_override!(
        config,
        search.randomize_minimax,
        "FORESIGHT_SEARCH_RANDOMIZE_MINIMAX",
        parse
    );
    env_override!(
        config,
        search.time_budget_ms,
        "FORESIGHT_SEARCH_TIME_BUDGET_MS",
        parse
    );
    env_override!(
        config,
        search.parallel_rounds,
        "FORESIGHT_SEARCH_PARALLEL_ROUNDS",
        parse
    );

    // Player
    env_override!(config, player.bot_one, "FORESIGHT_PLAYER_BOT_ONE");
    env_override!(config, player.bot_two, "FORESIGHT_PLAYER_BOT_TWO");

    config
}
