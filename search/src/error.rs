//! Typed search errors.
//!
//! Runtime terminations are first expressed via
//! [`crate::graph::TerminationReason`] so the audit trail survives. A
//! `SearchError` is what a caller sees once a termination is converted into a
//! plan ([`crate::search::SearchResult::into_plan`]), plus configuration
//! failures that occur before any search step.
//!
//! Running out of frontier or budget is never an error.

use crate::contract::Cost;
use crate::graph::PanicStage;

/// Typed failure for search configuration and collaborator contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A strategy identifier did not name a known strategy.
    UnknownStrategy { name: String },
    /// The problem produced a negative step cost.
    NegativeStepCost { node_id: u64, step_cost: Cost },
    /// The heuristic produced a negative estimate.
    NegativeHeuristic { node_id: u64, estimate: Cost },
    /// A problem or heuristic callback panicked.
    CallbackPanicked { stage: PanicStage },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStrategy { name } => write!(f, "unknown search strategy: {name:?}"),
            Self::NegativeStepCost { node_id, step_cost } => write!(
                f,
                "negative step cost {step_cost} generated while expanding node {node_id}"
            ),
            Self::NegativeHeuristic { node_id, estimate } => {
                write!(f, "negative heuristic estimate {estimate} for node {node_id}")
            }
            Self::CallbackPanicked { stage } => {
                write!(f, "problem callback panicked during {}", stage.as_str())
            }
        }
    }
}

impl std::error::Error for SearchError {}
