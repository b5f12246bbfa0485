//! One-ply reflex agent with random tie-breaking.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::contract::GameState;

/// Scores each of agent 0's legal actions and picks among the best.
///
/// Ties are broken uniformly at random with the RNG passed to
/// [`choose`](Self::choose); the agent holds no random state of its own.
pub struct ReflexAgent<F> {
    score: F,
}

impl<F> ReflexAgent<F> {
    pub fn new(score: F) -> Self {
        Self { score }
    }

    /// All legal actions of agent 0 whose score equals the maximum, in
    /// generator order.
    ///
    /// Scores are ranked by `f64::total_cmp`, so NaN scores still yield a
    /// choice when legal actions exist.
    #[allow(clippy::float_cmp)]
    pub fn best_actions<G>(&self, state: &G) -> Vec<G::Action>
    where
        G: GameState,
        F: Fn(&G, &G::Action) -> f64,
    {
        let scored: Vec<(G::Action, f64)> = state
            .legal_actions(0)
            .into_iter()
            .map(|action| {
                let score = (self.score)(state, &action);
                (action, score)
            })
            .collect();
        let Some(best) = scored.iter().map(|(_, score)| *score).max_by(f64::total_cmp) else {
            return Vec::new();
        };
        scored
            .into_iter()
            .filter(|(_, score)| *score == best || score.total_cmp(&best).is_eq())
            .map(|(action, _)| action)
            .collect()
    }

    /// One of the equal-best actions, or `None` without legal actions.
    pub fn choose<G, R>(&self, state: &G, rng: &mut R) -> Option<G::Action>
    where
        G: GameState,
        F: Fn(&G, &G::Action) -> f64,
        R: Rng + ?Sized,
    {
        self.best_actions(state).choose(rng).cloned()
    }
}

impl<F> std::fmt::Debug for ReflexAgent<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflexAgent").finish_non_exhaustive()
    }
}
