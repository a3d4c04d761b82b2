//! Move selection entry point.
//!
//! Chooses between the determinized search and the alpha-beta solver
//! depending on whether the position still hides information.

use std::time::Instant;

use engine_core::{GameState, Phase};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::driver::{stream_rng, DeterminizedMcts, SearchResult};
use crate::minimax::AlphaBeta;
use crate::search::SearchError;

/// How a move was chosen.
#[derive(Debug, Clone)]
pub enum Decision<M> {
    /// The game is over; there is nothing to play.
    GameOver,
    /// Only one move was legal.
    Forced(M),
    /// Chosen by determinized MCTS.
    Searched(SearchResult<M>),
    /// Chosen by alpha-beta with the given value for player one.
    Solved { best_move: M, value: f64 },
}

impl<M> Decision<M> {
    pub fn best_move(&self) -> Option<&M> {
        match self {
            Decision::GameOver => None,
            Decision::Forced(mv) => Some(mv),
            Decision::Searched(result) => Some(&result.best_move),
            Decision::Solved { best_move, .. } => Some(best_move),
        }
    }

    pub fn into_move(self) -> Option<M> {
        match self {
            Decision::GameOver => None,
            Decision::Forced(mv) => Some(mv),
            Decision::Searched(result) => Some(result.best_move),
            Decision::Solved { best_move, .. } => Some(best_move),
        }
    }
}

/// Choose a move for the mover of `state`, keeping the details of how.
///
/// The config is validated before anything else.
pub fn decide<S: GameState>(
    state: &S,
    config: &SearchConfig,
) -> Result<Decision<S::Move>, SearchError> {
    config.validate()?;

    if state.is_finished() {
        debug!("game finished, no move to select");
        return Ok(Decision::GameOver);
    }

    let mut moves = state.legal_moves();
    match moves.len() {
        0 => return Err(SearchError::NoLegalMoves),
        1 => return Ok(Decision::Forced(moves.swap_remove(0))),
        _ => {}
    }

    let start = Instant::now();
    let decision = match state.phase() {
        Phase::Imperfect => {
            let result = DeterminizedMcts::new(config.clone())?.search(state)?;
            Decision::Searched(result)
        }
        Phase::Perfect => {
            let mut rng = stream_rng(config.seed, 0);
            let solver = AlphaBeta::from_config(config);
            let (value, best_move) = solver.search(state, &mut rng)?;
            debug!(value, depth = solver.max_depth(), "alpha-beta solved position");
            let best_move = best_move.ok_or(SearchError::NoLegalMoves)?;
            Decision::Solved { best_move, value }
        }
    };

    info!(
        mover = %state.mover(),
        phase = ?state.phase(),
        best_move = ?decision.best_move(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "move selected"
    );
    Ok(decision)
}

/// Choose a move for the mover of `state`.
///
/// Returns `Ok(None)` when the game is already finished.
pub fn select_move<S: GameState>(
    state: &S,
    config: &SearchConfig,
) -> Result<Option<S::Move>, SearchError> {
    decide(state, config).map(Decision::into_move)
}
