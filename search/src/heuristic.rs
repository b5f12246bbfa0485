//! Heuristic estimates for informed search.

use crate::contract::{Cost, Problem};

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// Implementations must return non-negative values. A* is optimal when the
/// estimate is admissible (never overestimates) and consistent
/// (`h(s) <= cost(s, s') + h(s')` for every transition).
pub trait Heuristic<P: Problem + ?Sized> {
    fn estimate(&self, state: &P::State, problem: &P) -> Cost;
}

/// The trivial heuristic: always 0. A* with it behaves exactly like
/// uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHeuristic;

impl<P: Problem + ?Sized> Heuristic<P> for NullHeuristic {
    fn estimate(&self, _state: &P::State, _problem: &P) -> Cost {
        0
    }
}

impl<P, F> Heuristic<P> for F
where
    P: Problem + ?Sized,
    F: Fn(&P::State, &P) -> Cost,
{
    fn estimate(&self, state: &P::State, problem: &P) -> Cost {
        self(state, problem)
    }
}
