//! Search entry points and the expansion loop.
//!
//! One loop serves all four strategies; only the frontier discipline and the
//! use of the heuristic differ.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::contract::{Cost, Problem};
use crate::error::SearchError;
use crate::frontier::{Frontier, PriorityFrontier, QueueFrontier, StackFrontier};
use crate::graph::{
    ExpandEvent, PanicStage, SearchCounters, SearchGraph, SearchGraphMetadata, SuccessorOutcome,
    SuccessorRecord, TerminationReason,
};
use crate::heuristic::{Heuristic, NullHeuristic};
use crate::node::{NodeLinks, SearchNode};
use crate::policy::{SearchPolicy, Strategy};

/// Result of a search execution.
///
/// Every termination, including contract violations, produces a result with
/// its counters (and graph, if recorded) intact. Check
/// [`SearchResult::is_goal_reached`] or convert with
/// [`SearchResult::into_plan`].
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Actions from the start state to the goal. Empty unless a goal was
    /// reached (and also empty when the start state is itself a goal).
    pub actions: Vec<A>,
    /// Accumulated step cost of `actions`. Zero unless a goal was reached.
    pub cost: Cost,
    pub termination_reason: TerminationReason,
    pub counters: SearchCounters,
    /// Audit trail, present when [`SearchPolicy::record_graph`] is set.
    pub graph: Option<SearchGraph>,
}

impl<A> SearchResult<A> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.termination_reason,
            TerminationReason::GoalReached { .. }
        )
    }

    /// Convert into a plan.
    ///
    /// Reaching a goal yields its actions; exhausting the frontier or the
    /// expansion budget yields an empty plan.
    ///
    /// # Errors
    ///
    /// Returns the [`SearchError`] matching a contract-violation termination
    /// (negative step cost, negative heuristic, callback panic).
    pub fn into_plan(self) -> Result<Vec<A>, SearchError> {
        match self.termination_reason {
            TerminationReason::GoalReached { .. } => Ok(self.actions),
            TerminationReason::FrontierExhausted | TerminationReason::ExpansionBudgetExceeded => {
                Ok(Vec::new())
            }
            TerminationReason::NegativeStepCost { node_id, step_cost } => {
                Err(SearchError::NegativeStepCost { node_id, step_cost })
            }
            TerminationReason::NegativeHeuristic { node_id, estimate } => {
                Err(SearchError::NegativeHeuristic { node_id, estimate })
            }
            TerminationReason::InternalPanic { stage } => {
                Err(SearchError::CallbackPanicked { stage })
            }
        }
    }
}

/// Run `strategy` over `problem`.
///
/// The heuristic is consulted only by [`Strategy::AStar`]; pass
/// [`NullHeuristic`] otherwise.
pub fn search<P, H>(
    problem: &P,
    strategy: Strategy,
    heuristic: &H,
    policy: &SearchPolicy,
) -> SearchResult<P::Action>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    match strategy {
        Strategy::DepthFirst => run(problem, StackFrontier::new(), strategy, heuristic, policy),
        Strategy::BreadthFirst => run(problem, QueueFrontier::new(), strategy, heuristic, policy),
        Strategy::UniformCost | Strategy::AStar => {
            run(problem, PriorityFrontier::new(), strategy, heuristic, policy)
        }
    }
}

/// Run `strategy` with an unbounded policy and return the plan only.
///
/// # Errors
///
/// Returns [`SearchError`] on a collaborator contract violation. An
/// unreachable goal is `Ok(vec![])`.
pub fn solve<P, H>(
    problem: &P,
    strategy: Strategy,
    heuristic: &H,
) -> Result<Vec<P::Action>, SearchError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    let policy = SearchPolicy {
        record_graph: false,
        ..SearchPolicy::default()
    };
    search(problem, strategy, heuristic, &policy).into_plan()
}

/// Depth-first graph search.
///
/// # Errors
///
/// See [`solve`].
pub fn depth_first_search<P: Problem + ?Sized>(problem: &P) -> Result<Vec<P::Action>, SearchError> {
    solve(problem, Strategy::DepthFirst, &NullHeuristic)
}

/// Breadth-first graph search.
///
/// # Errors
///
/// See [`solve`].
pub fn breadth_first_search<P: Problem + ?Sized>(
    problem: &P,
) -> Result<Vec<P::Action>, SearchError> {
    solve(problem, Strategy::BreadthFirst, &NullHeuristic)
}

/// Uniform-cost graph search.
///
/// # Errors
///
/// See [`solve`].
pub fn uniform_cost_search<P: Problem + ?Sized>(
    problem: &P,
) -> Result<Vec<P::Action>, SearchError> {
    solve(problem, Strategy::UniformCost, &NullHeuristic)
}

/// A* graph search.
///
/// # Errors
///
/// See [`solve`].
pub fn a_star_search<P, H>(problem: &P, heuristic: &H) -> Result<Vec<P::Action>, SearchError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    solve(problem, Strategy::AStar, heuristic)
}

/// Run a problem callback, converting a panic into a termination reason.
fn guarded<T>(stage: PanicStage, f: impl FnOnce() -> T) -> Result<T, TerminationReason> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|_| TerminationReason::InternalPanic { stage })
}

/// Heuristic estimate for a node about to be created, checked for sign.
fn estimate_for<P, H>(
    problem: &P,
    heuristic: &H,
    strategy: Strategy,
    state: &P::State,
    node_id: u64,
) -> Result<Cost, TerminationReason>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    if !strategy.uses_heuristic() {
        return Ok(0);
    }
    let estimate = guarded(PanicStage::Heuristic, || heuristic.estimate(state, problem))?;
    if estimate < 0 {
        return Err(TerminationReason::NegativeHeuristic { node_id, estimate });
    }
    Ok(estimate)
}

#[allow(clippy::too_many_lines)]
fn run<P, H, F>(
    problem: &P,
    mut frontier: F,
    strategy: Strategy,
    heuristic: &H,
    policy: &SearchPolicy,
) -> SearchResult<P::Action>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
    F: Frontier<P::State>,
{
    let mut links: NodeLinks<P::Action> = NodeLinks::new();
    // State → g_cost at which it was finalized.
    let mut finalized: HashMap<P::State, Cost> = HashMap::new();
    let mut counters = SearchCounters::default();
    let mut expansions: Vec<ExpandEvent> = Vec::new();
    let mut goal: Option<SearchNode<P::State>> = None;

    let start = problem.start_state();
    let root_id = links.record(None, None);
    let termination_reason = match estimate_for(problem, heuristic, strategy, &start, root_id) {
        Err(reason) => reason,
        Ok(h_cost) => {
            frontier.push(SearchNode {
                node_id: root_id,
                parent_id: None,
                state: start,
                depth: 0,
                g_cost: 0,
                h_cost,
            });

            loop {
                let Some(current) = frontier.pop() else {
                    break TerminationReason::FrontierExhausted;
                };

                match guarded(PanicStage::GoalTest, || problem.is_goal(&current.state)) {
                    Err(reason) => break reason,
                    Ok(true) => {
                        let node_id = current.node_id;
                        goal = Some(current);
                        break TerminationReason::GoalReached { node_id };
                    }
                    Ok(false) => {}
                }

                if finalized.contains_key(&current.state) {
                    counters.stale_pops += 1;
                    continue;
                }

                if policy.expansion_budget_spent(counters.expansions) {
                    break TerminationReason::ExpansionBudgetExceeded;
                }

                let successors =
                    match guarded(PanicStage::Successors, || problem.successors(&current.state)) {
                        Ok(successors) => successors,
                        Err(reason) => break reason,
                    };

                finalized.insert(current.state.clone(), current.g_cost);
                counters.expansions += 1;

                let child_depth = current.depth.saturating_add(1);
                let mut records = Vec::new();
                let mut violation = None;

                for (index, successor) in successors.into_iter().enumerate() {
                    if successor.step_cost < 0 {
                        violation = Some(TerminationReason::NegativeStepCost {
                            node_id: current.node_id,
                            step_cost: successor.step_cost,
                        });
                        break;
                    }
                    counters.generated += 1;

                    let outcome = if finalized.contains_key(&successor.state) {
                        counters.duplicates_suppressed += 1;
                        SuccessorOutcome::AlreadyFinalized
                    } else if policy.exceeds_depth(child_depth) {
                        counters.depth_skipped += 1;
                        SuccessorOutcome::SkippedByDepthLimit
                    } else {
                        let child_id = links.record(Some(current.node_id), Some(successor.action));
                        let h_cost = match estimate_for(
                            problem,
                            heuristic,
                            strategy,
                            &successor.state,
                            child_id,
                        ) {
                            Ok(h_cost) => h_cost,
                            Err(reason) => {
                                violation = Some(reason);
                                break;
                            }
                        };
                        frontier.push(SearchNode {
                            node_id: child_id,
                            parent_id: Some(current.node_id),
                            state: successor.state,
                            depth: child_depth,
                            g_cost: current.g_cost.saturating_add(successor.step_cost),
                            h_cost,
                        });
                        SuccessorOutcome::Pushed { to_node: child_id }
                    };

                    if policy.record_graph {
                        records.push(SuccessorRecord {
                            index: index as u64,
                            step_cost: successor.step_cost,
                            outcome,
                        });
                    }
                }

                if policy.record_graph {
                    expansions.push(ExpandEvent {
                        expansion_order: counters.expansions - 1,
                        node_id: current.node_id,
                        parent_id: current.parent_id,
                        depth: current.depth,
                        pop_key: current.key(),
                        successors: records,
                    });
                }

                if let Some(reason) = violation {
                    break reason;
                }
            }
        }
    };

    counters.frontier_high_water = frontier.high_water();

    let (actions, cost) = match &goal {
        Some(node) => (links.path_to(node.node_id), node.g_cost),
        None => (Vec::new(), 0),
    };

    let graph = policy.record_graph.then(|| SearchGraph {
        expansions,
        metadata: SearchGraphMetadata {
            problem_id: problem.problem_id().to_string(),
            strategy,
            counters,
            termination_reason,
            solution: goal.as_ref().map(|_| (cost, actions.len() as u64)),
        },
    });

    SearchResult {
        actions,
        cost,
        termination_reason,
        counters,
        graph,
    }
}
