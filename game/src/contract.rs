//! The game abstraction consumed by the game-tree engine.

/// A position in a turn-based game with `num_agents()` agents.
///
/// Agent 0 is the maximizer. Agents act in index order; after agent
/// `num_agents() - 1` the turn returns to agent 0. Implementations must
/// report at least one agent.
pub trait GameState: Sized {
    type Action: Clone;

    /// Number of agents taking turns, including agent 0.
    fn num_agents(&self) -> usize;

    /// Actions available to `agent` here, in generator order.
    ///
    /// An empty list at a non-terminal state is allowed; the engine then
    /// scores the state statically.
    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    /// The state after `agent` plays `action`.
    fn successor(&self, agent: usize, action: &Self::Action) -> Self;

    /// Win or loss: no further play.
    fn is_terminal(&self) -> bool;
}
