//! Core traits and types for the Foresight search engine
//!
//! This crate defines the contract between a game and the search:
//! - `GameState`: positions, moves, terminal results, phase and determinization
//! - `Player`, `Phase`, `Outcome`: the vocabulary shared by every game
//! - `game_utils`: helpers built on top of the contract

pub mod game_state;
pub mod game_utils;

// Re-export main types for convenience
pub use game_state::{GameError, GameState, Outcome, Phase, Player};
pub use game_utils::{difference_points, random_move, ratio_points};
