//! Plays one game between two bots

use anyhow::{anyhow, bail, Context, Result};
use engine_core::{GameState, Outcome};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::bot::Bot;

/// Hard cap on plies so a misbehaving game cannot loop forever.
pub const MAX_PLIES: u32 = 1_000;

/// Result of a completed match.
#[derive(Debug, Clone)]
pub struct MatchReport<S> {
    pub outcome: Outcome,
    pub plies: u32,
    pub final_state: S,
    pub elapsed: Duration,
}

/// Play `state` to the end, seat `i` moving with `bots[i]`.
pub fn play_match<S: GameState>(
    bots: &mut [Box<dyn Bot<S>>; 2],
    mut state: S,
) -> Result<MatchReport<S>> {
    let start = Instant::now();
    let mut plies = 0u32;

    while !state.is_finished() {
        if plies >= MAX_PLIES {
            bail!("match exceeded {} plies without finishing", MAX_PLIES);
        }

        let seat = state.mover();
        let bot = &mut bots[seat.index()];
        let mv = bot
            .get_move(&state)?
            .ok_or_else(|| anyhow!("{} returned no move for an unfinished game", bot.name()))?;

        if !state.legal_moves().contains(&mv) {
            bail!("{} played illegal move {:?}", bot.name(), mv);
        }

        debug!(ply = plies, %seat, bot = bot.name(), mv = ?mv, "move played");
        state = state
            .apply(&mv)
            .with_context(|| format!("applying {:?} for {}", mv, bot.name()))?;
        plies += 1;
    }

    let outcome = state
        .winner()
        .ok_or_else(|| anyhow!("finished game reported no outcome"))?;
    let elapsed = start.elapsed();

    info!(
        plies,
        elapsed_ms = elapsed.as_millis() as u64,
        outcome = ?outcome,
        "match finished"
    );

    Ok(MatchReport {
        outcome,
        plies,
        final_state: state,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{RandomBot, SearchBot};
    use games_schnapsen::State;
    use mcts::SearchConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    struct Stubborn(Option<games_schnapsen::Card>);

    impl Bot<State> for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn get_move(&mut self, _state: &State) -> Result<Option<games_schnapsen::Card>> {
            Ok(self.0)
        }
    }

    fn deal(seed: u64) -> State {
        State::deal(&mut ChaCha20Rng::seed_from_u64(seed))
    }

    fn randoms(seed: u64) -> [Box<dyn Bot<State>>; 2] {
        [
            Box::new(RandomBot::with_seed("a", seed)),
            Box::new(RandomBot::with_seed("b", seed + 1)),
        ]
    }

    #[test]
    fn test_random_match_finishes() {
        let mut bots = randoms(1);
        let report = play_match(&mut bots, deal(2)).unwrap();
        assert!(report.final_state.is_finished());
        assert_eq!(Some(report.outcome), report.final_state.winner());
        assert!(report.plies > 0);
    }

    #[test]
    fn test_match_is_reproducible() {
        let a = play_match(&mut randoms(3), deal(4)).unwrap();
        let b = play_match(&mut randoms(3), deal(4)).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.plies, b.plies);
    }

    #[test]
    fn test_search_bot_plays_full_match() {
        let config = SearchConfig::for_testing()
            .with_determinizations(2)
            .with_rollouts_per_round(16)
            .with_max_depth(4);
        let mut bots: [Box<dyn Bot<State>>; 2] = [
            Box::new(SearchBot::new("search", config)),
            Box::new(RandomBot::with_seed("random", 9)),
        ];
        let report = play_match(&mut bots, deal(5)).unwrap();
        assert!(report.final_state.is_finished());
    }

    #[test]
    fn test_missing_move_is_an_error() {
        let mut bots: [Box<dyn Bot<State>>; 2] =
            [Box::new(Stubborn(None)), Box::new(Stubborn(None))];
        let err = play_match(&mut bots, deal(6)).unwrap_err();
        assert!(err.to_string().contains("no move"));
    }

    #[test]
    fn test_illegal_move_is_an_error() {
        let state = deal(7);
        let mover = state.mover();
        // A card held by the opponent is never legal for the mover.
        let foreign = state.hand(mover.other())[0];
        let mut bots: [Box<dyn Bot<State>>; 2] =
            [Box::new(Stubborn(Some(foreign))), Box::new(Stubborn(Some(foreign)))];
        let err = play_match(&mut bots, state).unwrap_err();
        assert!(err.to_string().contains("illegal move"));
    }
}
