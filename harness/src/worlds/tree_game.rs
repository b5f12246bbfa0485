//! `TreeGame`: an explicit game tree for exercising the game-tree engine.
//!
//! Leaves are terminal and carry their payoff. Interior nodes carry a static
//! value used when the depth limit cuts them off; an interior node with no
//! children is a non-terminal position where the mover has no legal action.

use std::sync::Arc;

use lodestar_game::contract::GameState;

/// Nested description of a game tree.
#[derive(Debug, Clone, PartialEq)]
pub enum GameTree {
    Leaf(f64),
    Node { value: f64, children: Vec<GameTree> },
}

impl GameTree {
    /// Interior node with static value 0.
    #[must_use]
    pub fn node(children: Vec<GameTree>) -> Self {
        Self::Node {
            value: 0.0,
            children,
        }
    }

    /// Leaves `values`, one level below a fresh root.
    #[must_use]
    pub fn fan(values: &[f64]) -> Self {
        Self::node(values.iter().copied().map(GameTree::Leaf).collect())
    }

    /// Number of nodes including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node { children, .. } => 1 + children.iter().map(GameTree::size).sum::<usize>(),
        }
    }
}

#[derive(Debug)]
struct Arena {
    values: Vec<f64>,
    terminal: Vec<bool>,
    children: Vec<Vec<usize>>,
}

impl Arena {
    fn push(&mut self, tree: &GameTree) -> usize {
        let index = self.values.len();
        match tree {
            GameTree::Leaf(value) => {
                self.values.push(*value);
                self.terminal.push(true);
                self.children.push(Vec::new());
            }
            GameTree::Node { value, children } => {
                self.values.push(*value);
                self.terminal.push(false);
                self.children.push(Vec::new());
                let ids: Vec<usize> = children.iter().map(|c| self.push(c)).collect();
                self.children[index] = ids;
            }
        }
        index
    }
}

/// A position in a [`GameTree`] shared by all of its positions.
#[derive(Debug, Clone)]
pub struct TreeGame {
    arena: Arc<Arena>,
    node: usize,
    num_agents: usize,
}

impl TreeGame {
    /// Root position of `tree`, played by `num_agents` agents (at least 1).
    #[must_use]
    pub fn new(tree: &GameTree, num_agents: usize) -> Self {
        let mut arena = Arena {
            values: Vec::new(),
            terminal: Vec::new(),
            children: Vec::new(),
        };
        arena.push(tree);
        Self {
            arena: Arc::new(arena),
            node: 0,
            num_agents: num_agents.max(1),
        }
    }

    /// Leaf payoff or interior static value of this position.
    #[must_use]
    pub fn static_value(&self) -> f64 {
        self.arena.values[self.node]
    }

    /// Arena index of this position; the root is 0, children follow in
    /// pre-order.
    #[must_use]
    pub fn node_index(&self) -> usize {
        self.node
    }
}

impl GameState for TreeGame {
    type Action = usize;

    fn num_agents(&self) -> usize {
        self.num_agents
    }

    fn legal_actions(&self, _agent: usize) -> Vec<usize> {
        (0..self.arena.children[self.node].len()).collect()
    }

    /// An out-of-range action leaves the position unchanged.
    fn successor(&self, _agent: usize, action: &usize) -> Self {
        let node = self.arena.children[self.node]
            .get(*action)
            .copied()
            .unwrap_or(self.node);
        Self {
            arena: Arc::clone(&self.arena),
            node,
            num_agents: self.num_agents,
        }
    }

    fn is_terminal(&self) -> bool {
        self.arena.terminal[self.node]
    }
}

/// Evaluator reading [`TreeGame::static_value`].
#[must_use]
pub fn tree_value(state: &TreeGame) -> f64 {
    state.static_value()
}
