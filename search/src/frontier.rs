//! Frontier disciplines: stack (depth-first), queue (breadth-first), and
//! min-priority (uniform-cost and A*).
//!
//! Frontiers never deduplicate. A state may sit in the frontier several times
//! via different paths; the search loop discards stale copies at pop time.
//! Re-insertion plus stale-pop elimination stands in for decrease-key.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::node::{FrontierKey, SearchNode};

/// Common interface over the three frontier disciplines.
pub trait Frontier<S> {
    /// Add a node.
    fn push(&mut self, node: SearchNode<S>);

    /// Remove the next node per discipline.
    fn pop(&mut self) -> Option<SearchNode<S>>;

    /// Current number of pending nodes.
    fn len(&self) -> usize;

    /// Whether no nodes are pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size the frontier has reached.
    fn high_water(&self) -> u64;
}

fn bump_high_water(high_water: &mut u64, len: usize) {
    let size = len as u64;
    if size > *high_water {
        *high_water = size;
    }
}

/// Last-in-first-out frontier.
#[derive(Debug)]
pub struct StackFrontier<S> {
    nodes: Vec<SearchNode<S>>,
    high_water: u64,
}

impl<S> StackFrontier<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            high_water: 0,
        }
    }
}

impl<S> Default for StackFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Frontier<S> for StackFrontier<S> {
    fn push(&mut self, node: SearchNode<S>) {
        self.nodes.push(node);
        bump_high_water(&mut self.high_water, self.nodes.len());
    }

    fn pop(&mut self) -> Option<SearchNode<S>> {
        self.nodes.pop()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// First-in-first-out frontier.
#[derive(Debug)]
pub struct QueueFrontier<S> {
    nodes: VecDeque<SearchNode<S>>,
    high_water: u64,
}

impl<S> QueueFrontier<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: VecDeque::new(),
            high_water: 0,
        }
    }
}

impl<S> Default for QueueFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Frontier<S> for QueueFrontier<S> {
    fn push(&mut self, node: SearchNode<S>) {
        self.nodes.push_back(node);
        bump_high_water(&mut self.high_water, self.nodes.len());
    }

    fn pop(&mut self) -> Option<SearchNode<S>> {
        self.nodes.pop_front()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// A heap entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// lowest `(f_cost, creation_order)` first.
#[derive(Debug)]
struct PriorityEntry<S> {
    key: Reverse<FrontierKey>,
    node: SearchNode<S>,
}

impl<S> PartialEq for PriorityEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for PriorityEntry<S> {}

impl<S> PartialOrd for PriorityEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for PriorityEntry<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority frontier keyed by [`FrontierKey`].
#[derive(Debug)]
pub struct PriorityFrontier<S> {
    heap: BinaryHeap<PriorityEntry<S>>,
    high_water: u64,
}

impl<S> PriorityFrontier<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }

    /// The key of the node that would pop next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }
}

impl<S> Default for PriorityFrontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Frontier<S> for PriorityFrontier<S> {
    fn push(&mut self, node: SearchNode<S>) {
        self.heap.push(PriorityEntry {
            key: Reverse(node.key()),
            node,
        });
        bump_high_water(&mut self.high_water, self.heap.len());
    }

    fn pop(&mut self) -> Option<SearchNode<S>> {
        self.heap.pop().map(|e| e.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}
