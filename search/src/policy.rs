//! Search strategies and budgets.

use std::str::FromStr;

use crate::error::SearchError;

/// Frontier discipline used by [`crate::search::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Stack frontier. Complete only on finite graphs; not optimal.
    DepthFirst,
    /// Queue frontier. Optimal when all step costs are equal.
    BreadthFirst,
    /// Priority frontier keyed by accumulated cost.
    UniformCost,
    /// Priority frontier keyed by accumulated cost plus heuristic.
    AStar,
}

impl Strategy {
    /// All strategies in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::UniformCost,
        Strategy::AStar,
    ];

    /// Short identifier, as recorded in the audit graph.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DepthFirst => "dfs",
            Self::BreadthFirst => "bfs",
            Self::UniformCost => "ucs",
            Self::AStar => "astar",
        }
    }

    /// Whether the heuristic contributes to the frontier key.
    #[must_use]
    pub const fn uses_heuristic(self) -> bool {
        matches!(self, Self::AStar)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth_first" | "depthfirstsearch" => Ok(Self::DepthFirst),
            "bfs" | "breadth_first" | "breadthfirstsearch" => Ok(Self::BreadthFirst),
            "ucs" | "uniform_cost" | "uniformcostsearch" => Ok(Self::UniformCost),
            "astar" | "a_star" | "astarsearch" => Ok(Self::AStar),
            _ => Err(SearchError::UnknownStrategy { name: s.to_string() }),
        }
    }
}

/// Search budgets and recording options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions (`None` = unbounded).
    pub max_expansions: Option<u64>,
    /// Successors deeper than this are not pushed (`None` = unbounded).
    pub max_depth: Option<u32>,
    /// Keep the expansion-event audit graph.
    pub record_graph: bool,
}

impl SearchPolicy {
    /// Default policy with an expansion cap.
    #[must_use]
    pub fn with_max_expansions(max_expansions: u64) -> Self {
        Self {
            max_expansions: Some(max_expansions),
            ..Self::default()
        }
    }

    /// Default policy with a depth cutoff.
    #[must_use]
    pub fn with_max_depth(max_depth: u32) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }

    /// Whether `expansions` has reached the expansion cap.
    #[must_use]
    pub fn expansion_budget_spent(&self, expansions: u64) -> bool {
        self.max_expansions.is_some_and(|cap| expansions >= cap)
    }

    /// Whether a child at `depth` is beyond the depth cutoff.
    #[must_use]
    pub fn exceeds_depth(&self, depth: u32) -> bool {
        self.max_depth.is_some_and(|cap| depth > cap)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: None,
            max_depth: None,
            record_graph: true,
        }
    }
}
