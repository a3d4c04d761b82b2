//! Depth-limited alpha-beta search for positions without hidden information.
//!
//! Values are always from player one's perspective: player one maximizes,
//! player two minimizes. Finished positions score [`Outcome::signed_score`];
//! positions at the depth limit score the point-ratio heuristic.

use engine_core::{ratio_points, GameState, Player};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::config::SearchConfig;
use crate::search::SearchError;

/// Heuristic value of an unfinished position, in `[-1, 1]`.
///
/// `+1` when player one holds every point scored so far, 0 when even.
pub fn heuristic<S: GameState>(state: &S) -> f64 {
    ratio_points(state, Player::One) * 2.0 - 1.0
}

fn terminal_value<S: GameState>(state: &S) -> Result<f64, SearchError> {
    state.winner().map(|outcome| outcome.signed_score()).ok_or_else(|| {
        SearchError::ContractViolation("finished state reported no outcome".to_string())
    })
}

fn child<S: GameState>(state: &S, mv: &S::Move) -> Result<S, SearchError> {
    state.apply(mv).map_err(|err| {
        SearchError::ContractViolation(format!("legal move {mv:?} was rejected: {err}"))
    })
}

/// Alpha-beta solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaBeta {
    max_depth: u32,
    randomize: bool,
}

impl AlphaBeta {
    pub fn new(max_depth: u32, randomize: bool) -> Self {
        Self {
            max_depth,
            randomize,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.max_depth, config.randomize_minimax)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Value of `state` and the move achieving it.
    ///
    /// The move is None for finished positions and at depth 0. The rng is
    /// only used when move shuffling is enabled.
    pub fn search<S: GameState>(
        &self,
        state: &S,
        rng: &mut ChaCha20Rng,
    ) -> Result<(f64, Option<S::Move>), SearchError> {
        let result = self.value(state, f64::NEG_INFINITY, f64::INFINITY, 0, rng)?;
        trace!(value = result.0, depth = self.max_depth, "alpha-beta complete");
        Ok(result)
    }

    fn value<S: GameState>(
        &self,
        state: &S,
        mut alpha: f64,
        mut beta: f64,
        depth: u32,
        rng: &mut ChaCha20Rng,
    ) -> Result<(f64, Option<S::Move>), SearchError> {
        if state.is_finished() {
            return Ok((terminal_value(state)?, None));
        }
        if depth >= self.max_depth {
            return Ok((heuristic(state), None));
        }

        let mut moves = state.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if self.randomize {
            moves.shuffle(rng);
        }

        let maximizing = state.mover() == Player::One;
        let mut best_value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            let next = child(state, &mv)?;
            let (value, _) = self.value(&next, alpha, beta, depth + 1, rng)?;

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                beta = beta.min(best_value);
            }

            if alpha >= beta {
                break;
            }
        }

        Ok((best_value, best_move))
    }
}

/// Plain depth-limited minimax, without pruning or shuffling.
///
/// Slow; exists to check [`AlphaBeta`] against.
pub fn minimax<S: GameState>(
    state: &S,
    max_depth: u32,
) -> Result<(f64, Option<S::Move>), SearchError> {
    minimax_at(state, max_depth, 0)
}

fn minimax_at<S: GameState>(
    state: &S,
    max_depth: u32,
    depth: u32,
) -> Result<(f64, Option<S::Move>), SearchError> {
    if state.is_finished() {
        return Ok((terminal_value(state)?, None));
    }
    if depth >= max_depth {
        return Ok((heuristic(state), None));
    }

    let moves = state.legal_moves();
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let maximizing = state.mover() == Player::One;
    let mut best: Option<(f64, S::Move)> = None;
    for mv in moves {
        let (value, _) = minimax_at(&child(state, &mv)?, max_depth, depth + 1)?;
        let better = match &best {
            None => true,
            Some((best_value, _)) if maximizing => value > *best_value,
            Some((best_value, _)) => value < *best_value,
        };
        if better {
            best = Some((value, mv));
        }
    }

    Ok(match best {
        Some((value, mv)) => (value, Some(mv)),
        None => (heuristic(state), None),
    })
}
