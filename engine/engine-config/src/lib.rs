//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across all Foresight components.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`FORESIGHT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! FORESIGHT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     FORESIGHT_COMMON_SEED=7
//!     FORESIGHT_COMMON_LOG_LEVEL=debug
//!     FORESIGHT_SEARCH_DETERMINIZATIONS=50
//!     FORESIGHT_SEARCH_TIME_BUDGET_MS=1000
//!     FORESIGHT_PLAYER_BOT_TWO=search
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
