//! Search runner: executes a search and packages the audit trail.
//!
//! The runner does NOT implement search logic; it delegates to
//! `lodestar_search::search` and owns only artifact assembly.

use lodestar_kernel::proof::canon::canonical_json_bytes;
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use lodestar_search::contract::Problem;
use lodestar_search::error::SearchError;
use lodestar_search::graph::termination_reason_to_json;
use lodestar_search::heuristic::Heuristic;
use lodestar_search::policy::{SearchPolicy, Strategy};
use lodestar_search::search::{search, SearchResult};

use crate::bundle::{
    build_bundle, ArtifactBundle, BundleBuildError, SEARCH_GRAPH_ARTIFACT, SEARCH_REPORT_ARTIFACT,
};

/// Error running a search through the harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Strategy identifier not recognized.
    Config(SearchError),
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
    /// Bundle assembly failed.
    BundleFailed(BundleBuildError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "search configuration: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonicalization failed: {detail}"),
            Self::BundleFailed(e) => write!(f, "bundle assembly failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::BundleFailed(e) => Some(e),
            Self::CanonFailed { .. } => None,
        }
    }
}

/// A finished search plus its artifact bundle.
#[derive(Debug, Clone)]
pub struct SearchRun<A> {
    pub result: SearchResult<A>,
    pub bundle: ArtifactBundle,
    /// `canonical_hash(HashDomain::SearchReport, search_report.json)`.
    pub report_digest: ContentHash,
}

/// Run `strategy` over `problem` and bundle `search_graph.json` and
/// `search_report.json`.
///
/// Graph recording is forced on. Contract-violation terminations are not
/// errors here: the bundle records them, and `result.into_plan()` surfaces
/// them to the caller.
///
/// # Errors
///
/// Returns [`RunError`] if the graph or report cannot be canonicalized or
/// the bundle cannot be assembled.
pub fn run_search<P, H>(
    problem: &P,
    strategy: Strategy,
    heuristic: &H,
    policy: &SearchPolicy,
) -> Result<SearchRun<P::Action>, RunError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    let policy = SearchPolicy {
        record_graph: true,
        ..policy.clone()
    };
    let mut result = search(problem, strategy, heuristic, &policy);
    let Some(graph) = result.graph.take() else {
        return Err(RunError::CanonFailed {
            detail: "search graph was not recorded".into(),
        });
    };

    let graph_bytes = graph
        .to_canonical_json_bytes()
        .map_err(|e| RunError::CanonFailed {
            detail: e.to_string(),
        })?;
    let graph_digest = graph.digest().map_err(|e| RunError::CanonFailed {
        detail: e.to_string(),
    })?;

    let plan_cost = if result.is_goal_reached() {
        serde_json::json!(result.cost)
    } else {
        serde_json::Value::Null
    };
    let report = serde_json::json!({
        "counters": {
            "expansions": result.counters.expansions,
            "generated": result.counters.generated,
        },
        "plan_cost": plan_cost,
        "plan_length": result.actions.len(),
        "policy": search_policy_to_json(&policy),
        "problem_id": problem.problem_id(),
        "schema_version": "lodestar.search_report.v1",
        "search_graph_digest": graph_digest.as_str(),
        "strategy": strategy.as_str(),
        "termination_reason": termination_reason_to_json(&result.termination_reason),
    });
    let report_bytes = canonical_json_bytes(&report).map_err(|e| RunError::CanonFailed {
        detail: e.to_string(),
    })?;

    let report_digest = canonical_hash(HashDomain::SearchReport, &report_bytes);
    let bundle = build_bundle(vec![
        (SEARCH_GRAPH_ARTIFACT.to_string(), graph_bytes, true),
        (SEARCH_REPORT_ARTIFACT.to_string(), report_bytes, true),
    ])
    .map_err(RunError::BundleFailed)?;

    result.graph = Some(graph);
    Ok(SearchRun {
        result,
        bundle,
        report_digest,
    })
}

/// [`run_search`] with the strategy given by identifier (`"bfs"`, `"astar"`, ...).
///
/// # Errors
///
/// Returns [`RunError::Config`] for an unknown identifier, otherwise as
/// [`run_search`].
pub fn run_search_named<P, H>(
    problem: &P,
    strategy: &str,
    heuristic: &H,
    policy: &SearchPolicy,
) -> Result<SearchRun<P::Action>, RunError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    let strategy: Strategy = strategy.parse().map_err(RunError::Config)?;
    run_search(problem, strategy, heuristic, policy)
}

fn search_policy_to_json(policy: &SearchPolicy) -> serde_json::Value {
    serde_json::json!({
        "max_depth": policy.max_depth,
        "max_expansions": policy.max_expansions,
    })
}
