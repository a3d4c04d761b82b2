//! Rollout policies used to score a freshly expanded node.
//!
//! A rollout plays from a state to the end of the game and reports the
//! outcome. The default [`RandomRollout`] picks uniformly among legal moves.

use engine_core::{random_move, GameState, Outcome};
use rand_chacha::ChaCha20Rng;

use crate::search::SearchError;

/// Trait for rollout policies.
///
/// Implementations must not mutate `state`; they play on their own copy.
pub trait RolloutPolicy<S: GameState>: Send + Sync {
    /// Play `state` out to a finished position and return its outcome.
    fn rollout(&self, state: &S, rng: &mut ChaCha20Rng) -> Result<Outcome, SearchError>;
}

/// Plays uniformly random legal moves until the game ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl RandomRollout {
    pub fn new() -> Self {
        Self
    }
}

impl<S: GameState> RolloutPolicy<S> for RandomRollout {
    fn rollout(&self, state: &S, rng: &mut ChaCha20Rng) -> Result<Outcome, SearchError> {
        let mut current = state.clone();
        while !current.is_finished() {
            let mv = random_move(&current, rng).ok_or(SearchError::NoLegalMoves)?;
            current = current.apply(&mv).map_err(|err| {
                SearchError::ContractViolation(format!("rollout move {mv:?} was rejected: {err}"))
            })?;
        }
        current.winner().ok_or_else(|| {
            SearchError::ContractViolation("finished state reported no outcome".to_string())
        })
    }
}
