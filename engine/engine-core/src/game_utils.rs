//! Shared helpers for two-player games
//!
//! Small functions built purely on top of [`GameState`] that several
//! consumers (search, heuristics, bots) need.

use crate::game_state::{GameState, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Share of all points scored so far that belongs to `player`.
///
/// Returns `0.5` when nobody has scored yet.
///
/// # Example
/// ```
/// # use engine_core::game_utils::ratio_from_points;
/// assert_eq!(ratio_from_points(30, 10), 0.75);
/// assert_eq!(ratio_from_points(0, 0), 0.5);
/// ```
pub fn ratio_points<S: GameState>(state: &S, player: Player) -> f64 {
    ratio_from_points(state.points(player), state.points(player.other()))
}

/// Ratio computation behind [`ratio_points`].
#[inline]
pub fn ratio_from_points(own: u32, opponent: u32) -> f64 {
    let total = own + opponent;
    if total == 0 {
        0.5
    } else {
        f64::from(own) / f64::from(total)
    }
}

/// Point lead of `player` over the opponent (negative when behind).
pub fn difference_points<S: GameState>(state: &S, player: Player) -> i64 {
    i64::from(state.points(player)) - i64::from(state.points(player.other()))
}

/// Uniformly random legal move, or `None` if there is none.
pub fn random_move<S: GameState>(state: &S, rng: &mut ChaCha20Rng) -> Option<S::Move> {
    let mut moves = state.legal_moves();
    if moves.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..moves.len());
    Some(moves.swap_remove(idx))
}
