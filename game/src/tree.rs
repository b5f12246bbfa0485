//! Bounded-depth game-tree recursion.
//!
//! `value(state, depth, agent)` scores a node. Cut-off happens when `depth`
//! reaches the limit or the state is terminal; the evaluator then supplies the
//! value. Agent 0 takes the maximum over its actions, keeping the first action
//! that achieves it. Opponents take the minimum (minimax, alpha-beta) or the
//! mean (expectimax). Depth increments each time the turn wraps to agent 0.

use crate::contract::GameState;
use crate::evaluation::Evaluator;
use crate::mode::SearchMode;

/// Work done by one [`decide`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Interior nodes whose actions were enumerated and explored.
    pub expanded: u64,
    /// Nodes scored by the evaluator.
    pub leaves: u64,
    /// Times alpha-beta stopped exploring siblings.
    pub cutoffs: u64,
}

/// Root decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    /// Best action for agent 0, or `None` when no ply was expanded (depth
    /// limit 0, terminal root, or no legal actions).
    pub action: Option<A>,
    /// Value of the root under the chosen mode.
    pub value: f64,
    pub stats: TreeStats,
}

/// Pick agent 0's action at `state`, looking `depth_limit` full agent cycles
/// ahead.
pub fn decide<G, E>(
    state: &G,
    depth_limit: u32,
    evaluator: &E,
    mode: SearchMode,
) -> Decision<G::Action>
where
    G: GameState,
    E: Evaluator<G> + ?Sized,
{
    let mut walker = Walker {
        evaluator,
        depth_limit,
        mode,
        num_agents: state.num_agents().max(1),
        stats: TreeStats::default(),
    };
    let (action, value) = walker.root(state);
    Decision {
        action,
        value,
        stats: walker.stats,
    }
}

struct Walker<'e, E: ?Sized> {
    evaluator: &'e E,
    depth_limit: u32,
    mode: SearchMode,
    num_agents: usize,
    stats: TreeStats,
}

impl<E: ?Sized> Walker<'_, E> {
    fn leaf<G>(&mut self, state: &G) -> f64
    where
        E: Evaluator<G>,
    {
        self.stats.leaves += 1;
        self.evaluator.evaluate(state)
    }

    /// A cutoff only counts when siblings are actually skipped.
    fn count_cutoff(&mut self, index: usize, len: usize) {
        if index + 1 < len {
            self.stats.cutoffs += 1;
        }
    }

    /// Turn order: the agent after `agent`, and the depth it plays at.
    fn advance(&self, depth: u32, agent: usize) -> (u32, usize) {
        let next = agent + 1;
        if next >= self.num_agents {
            (depth + 1, 0)
        } else {
            (depth, next)
        }
    }

    fn root<G>(&mut self, state: &G) -> (Option<G::Action>, f64)
    where
        G: GameState,
        E: Evaluator<G>,
    {
        if self.depth_limit == 0 || state.is_terminal() {
            return (None, self.leaf(state));
        }
        let actions = state.legal_actions(0);
        if actions.is_empty() {
            return (None, self.leaf(state));
        }
        self.stats.expanded += 1;

        let (next_depth, next_agent) = self.advance(0, 0);
        let mut alpha = f64::NEG_INFINITY;
        let mut best: Option<(G::Action, f64)> = None;
        for action in actions {
            let child = state.successor(0, &action);
            let value = self.value(&child, next_depth, next_agent, alpha, f64::INFINITY);
            let improves = match &best {
                None => true,
                Some((_, b)) => value > *b,
            };
            if improves {
                best = Some((action, value));
            }
            alpha = alpha.max(value);
        }
        match best {
            Some((action, value)) => (Some(action), value),
            None => (None, self.leaf(state)),
        }
    }

    fn value<G>(&mut self, state: &G, depth: u32, agent: usize, alpha: f64, beta: f64) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        if depth >= self.depth_limit || state.is_terminal() {
            return self.leaf(state);
        }
        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return self.leaf(state);
        }
        self.stats.expanded += 1;

        let (next_depth, next_agent) = self.advance(depth, agent);
        if agent == 0 {
            self.max_value(state, &actions, (next_depth, next_agent), alpha, beta)
        } else if self.mode == SearchMode::Expectimax {
            self.mean_value(state, agent, &actions, next_depth, next_agent)
        } else {
            self.min_value(state, agent, &actions, (next_depth, next_agent), alpha, beta)
        }
    }

    fn max_value<G>(
        &mut self,
        state: &G,
        actions: &[G::Action],
        (next_depth, next_agent): (u32, usize),
        mut alpha: f64,
        beta: f64,
    ) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let mut best = f64::NEG_INFINITY;
        for (i, action) in actions.iter().enumerate() {
            let child = state.successor(0, action);
            let value = self.value(&child, next_depth, next_agent, alpha, beta);
            if value > best {
                best = value;
            }
            if self.mode.prunes() {
                if best >= beta {
                    self.count_cutoff(i, actions.len());
                    return best;
                }
                alpha = alpha.max(best);
            }
        }
        best
    }

    fn min_value<G>(
        &mut self,
        state: &G,
        agent: usize,
        actions: &[G::Action],
        (next_depth, next_agent): (u32, usize),
        alpha: f64,
        mut beta: f64,
    ) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let mut best = f64::INFINITY;
        for (i, action) in actions.iter().enumerate() {
            let child = state.successor(agent, action);
            let value = self.value(&child, next_depth, next_agent, alpha, beta);
            if value < best {
                best = value;
            }
            if self.mode.prunes() {
                if best <= alpha {
                    self.count_cutoff(i, actions.len());
                    return best;
                }
                beta = beta.min(best);
            }
        }
        best
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_value<G>(
        &mut self,
        state: &G,
        agent: usize,
        actions: &[G::Action],
        next_depth: u32,
        next_agent: usize,
    ) -> f64
    where
        G: GameState,
        E: Evaluator<G>,
    {
        let mut total = 0.0;
        for action in actions {
            let child = state.successor(agent, action);
            total += self.value(
                &child,
                next_depth,
                next_agent,
                f64::NEG_INFINITY,
                f64::INFINITY,
            );
        }
        total / actions.len() as f64
    }
}
