//! Search problem contract trait.

use std::hash::Hash;

/// Step costs, path costs, and heuristic estimates.
///
/// Integer-valued so that frontier ordering is a total order and audit
/// artifacts stay canonicalizable.
pub type Cost = i64;

/// One outgoing transition produced by [`Problem::successors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor<S, A> {
    /// The state reached.
    pub state: S,
    /// The action that reaches it.
    pub action: A,
    /// Incremental cost of taking `action`. Must be non-negative.
    pub step_cost: Cost,
}

impl<S, A> Successor<S, A> {
    #[must_use]
    pub fn new(state: S, action: A, step_cost: Cost) -> Self {
        Self {
            state,
            action,
            step_cost,
        }
    }
}

/// Trait for problems that support search.
///
/// # Contract
///
/// - `successors` must be deterministic: same state → same successors in the
///   same order. Depth-first and breadth-first results depend on that order.
/// - Step costs must be non-negative. A negative cost terminates the search
///   with [`TerminationReason::NegativeStepCost`](crate::graph::TerminationReason).
/// - `path_cost` must agree with the sum of step costs along any sequence of
///   legal actions from the start state.
pub trait Problem {
    /// World configuration. Hashed for visited-set deduplication.
    type State: Clone + Eq + Hash;
    /// Transition label.
    type Action: Clone;

    /// Identifier recorded in the audit graph.
    fn problem_id(&self) -> &str {
        "problem"
    }

    /// The state the search starts from.
    fn start_state(&self) -> Self::State;

    /// Test whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Enumerate transitions out of `state`.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Total cost of a sequence of legal actions from the start state.
    fn path_cost(&self, actions: &[Self::Action]) -> Cost;
}
