//! `SearchGraph`: expansion-event audit log.
//!
//! The ordered list of [`ExpandEvent`] entries is the full decision record of
//! a search: every frontier pop that led to an expansion, and what happened to
//! every successor it generated. Stale pops (states already finalized) are
//! counted in the metadata but produce no event.

use lodestar_kernel::proof::canon::{canonical_json_bytes, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::contract::Cost;
use crate::node::FrontierKey;
use crate::policy::Strategy;

/// The complete search audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGraph {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEvent>,
    /// Aggregate metadata.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier pop followed by successor generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEvent {
    /// Total order of expansions, starting at 0.
    pub expansion_order: u64,
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub depth: u32,
    /// The frontier key at time of pop.
    pub pop_key: FrontierKey,
    /// Successors in generator order.
    pub successors: Vec<SuccessorRecord>,
}

/// A generated successor and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorRecord {
    /// Position in the generator's output.
    pub index: u64,
    pub step_cost: Cost,
    pub outcome: SuccessorOutcome,
}

/// What happened to a generated successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessorOutcome {
    /// Pushed onto the frontier as a new node.
    Pushed { to_node: u64 },
    /// The state was already finalized; not pushed.
    AlreadyFinalized,
    /// The child would exceed `max_depth`; not pushed.
    SkippedByDepthLimit,
}

/// Counters maintained for every search, recorded or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounters {
    /// Nodes whose successors were generated.
    pub expansions: u64,
    /// Successors returned by the problem.
    pub generated: u64,
    /// Successors dropped because their state was already finalized.
    pub duplicates_suppressed: u64,
    /// Successors dropped by the depth cutoff.
    pub depth_skipped: u64,
    /// Pops discarded because their state was finalized after they were pushed.
    pub stale_pops: u64,
    /// Largest frontier size reached.
    pub frontier_high_water: u64,
}

/// Aggregate metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGraphMetadata {
    pub problem_id: String,
    pub strategy: Strategy,
    pub counters: SearchCounters,
    pub termination_reason: TerminationReason,
    /// `(cost, action count)` of the returned plan when a goal was reached.
    pub solution: Option<(Cost, u64)>,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A popped node satisfied the goal.
    GoalReached { node_id: u64 },
    /// Frontier emptied without reaching a goal.
    FrontierExhausted,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
    /// The problem produced a negative step cost.
    NegativeStepCost { node_id: u64, step_cost: Cost },
    /// The heuristic produced a negative estimate.
    NegativeHeuristic { node_id: u64, estimate: Cost },
    /// A problem or heuristic callback panicked.
    InternalPanic { stage: PanicStage },
}

impl TerminationReason {
    /// Stable identifier used in canonical JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::NegativeStepCost { .. } => "negative_step_cost",
            Self::NegativeHeuristic { .. } => "negative_heuristic",
            Self::InternalPanic { .. } => "internal_panic",
        }
    }

    /// Whether this termination is a collaborator contract violation.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::NegativeStepCost { .. }
                | Self::NegativeHeuristic { .. }
                | Self::InternalPanic { .. }
        )
    }
}

/// Callback during which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStage {
    /// `Problem::is_goal()`.
    GoalTest,
    /// `Problem::successors()`.
    Successors,
    /// `Heuristic::estimate()`.
    Heuristic,
}

impl PanicStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoalTest => "goal_test",
            Self::Successors => "successors",
            Self::Heuristic => "heuristic",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraph {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical JSON bytes under the search-graph domain.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchGraph, &bytes))
    }

    fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "depth": e.depth,
        "expansion_order": e.expansion_order,
        "node_id": e.node_id,
        "parent_id": e.parent_id,
        "pop_key": {
            "creation_order": e.pop_key.creation_order,
            "f_cost": e.pop_key.f_cost,
        },
        "successors": e.successors.iter().map(successor_to_json).collect::<Vec<_>>(),
    })
}

fn successor_to_json(r: &SuccessorRecord) -> serde_json::Value {
    serde_json::json!({
        "index": r.index,
        "outcome": outcome_to_json(r.outcome),
        "step_cost": r.step_cost,
    })
}

fn outcome_to_json(o: SuccessorOutcome) -> serde_json::Value {
    match o {
        SuccessorOutcome::Pushed { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "pushed"})
        }
        SuccessorOutcome::AlreadyFinalized => serde_json::json!({"type": "already_finalized"}),
        SuccessorOutcome::SkippedByDepthLimit => {
            serde_json::json!({"type": "skipped_by_depth_limit"})
        }
    }
}

fn counters_to_json(c: &SearchCounters) -> serde_json::Value {
    serde_json::json!({
        "depth_skipped": c.depth_skipped,
        "duplicates_suppressed": c.duplicates_suppressed,
        "expansions": c.expansions,
        "frontier_high_water": c.frontier_high_water,
        "generated": c.generated,
        "stale_pops": c.stale_pops,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    let solution = match m.solution {
        Some((cost, length)) => serde_json::json!({"cost": cost, "length": length}),
        None => serde_json::Value::Null,
    };
    serde_json::json!({
        "counters": counters_to_json(&m.counters),
        "problem_id": m.problem_id,
        "solution": solution,
        "strategy": m.strategy.as_str(),
        "termination_reason": termination_reason_to_json(&m.termination_reason),
    })
}

/// JSON projection of a termination reason: `{"type": ..., <fields>}`.
#[must_use]
pub fn termination_reason_to_json(r: &TerminationReason) -> serde_json::Value {
    let ty = r.as_str();
    match r {
        TerminationReason::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": ty})
        }
        TerminationReason::FrontierExhausted | TerminationReason::ExpansionBudgetExceeded => {
            serde_json::json!({"type": ty})
        }
        TerminationReason::NegativeStepCost { node_id, step_cost } => {
            serde_json::json!({"node_id": node_id, "step_cost": step_cost, "type": ty})
        }
        TerminationReason::NegativeHeuristic { node_id, estimate } => {
            serde_json::json!({"estimate": estimate, "node_id": node_id, "type": ty})
        }
        TerminationReason::InternalPanic { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": ty})
        }
    }
}
