//! Search nodes, parent links, and the frontier ordering key.

use crate::contract::Cost;

/// An immutable node waiting in (or popped from) a frontier.
///
/// The action path is not stored on the node; it is recovered from
/// [`NodeLinks`] by following `parent_id` back to the root.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    /// Monotonic identifier; also the creation order used for tie-breaking.
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    /// The state this node represents.
    pub state: S,
    /// Number of actions from the root.
    pub depth: u32,
    /// Accumulated path cost from the root.
    pub g_cost: Cost,
    /// Heuristic estimate (0 unless the strategy consults a heuristic).
    pub h_cost: Cost,
}

impl<S> SearchNode<S> {
    /// Compute `f_cost = g_cost + h_cost`.
    #[must_use]
    pub fn f_cost(&self) -> Cost {
        self.g_cost.saturating_add(self.h_cost)
    }

    /// The key this node is ordered by in a priority frontier.
    #[must_use]
    pub fn key(&self) -> FrontierKey {
        FrontierKey {
            f_cost: self.f_cost(),
            creation_order: self.node_id,
        }
    }
}

/// The priority-frontier ordering key: `(f_cost, creation_order)`.
///
/// Lower `f_cost` first; equal priorities pop in creation order (FIFO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub f_cost: Cost,
    pub creation_order: u64,
}

/// Parent links for every node created during one search, indexed by `node_id`.
///
/// Node ids are dense (`0..len`), so a `Vec` is the whole index.
#[derive(Debug)]
pub struct NodeLinks<A> {
    links: Vec<(Option<u64>, Option<A>)>,
}

impl<A: Clone> NodeLinks<A> {
    #[must_use]
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Record a node and return its freshly assigned id.
    pub fn record(&mut self, parent_id: Option<u64>, action: Option<A>) -> u64 {
        let id = self.links.len() as u64;
        self.links.push((parent_id, action));
        id
    }

    /// Number of nodes recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Parent of `node_id`, if any.
    #[must_use]
    pub fn parent_of(&self, node_id: u64) -> Option<u64> {
        usize::try_from(node_id)
            .ok()
            .and_then(|i| self.links.get(i))
            .and_then(|(parent, _)| *parent)
    }

    /// Reconstruct the action sequence from the root to `node_id`.
    ///
    /// Unknown ids yield an empty path.
    #[must_use]
    pub fn path_to(&self, node_id: u64) -> Vec<A> {
        let mut actions = Vec::new();
        let mut current = usize::try_from(node_id).ok();
        while let Some((parent, action)) = current.and_then(|i| self.links.get(i)) {
            if let Some(action) = action {
                actions.push(action.clone());
            }
            current = parent.and_then(|p| usize::try_from(p).ok());
        }
        actions.reverse();
        actions
    }
}

impl<A: Clone> Default for NodeLinks<A> {
    fn default() -> Self {
        Self::new()
    }
}
