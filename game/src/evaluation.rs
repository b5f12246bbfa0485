//! Static evaluation and the named evaluator registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::GameError;

/// Scores a state from agent 0's point of view; higher is better.
pub trait Evaluator<G> {
    fn evaluate(&self, state: &G) -> f64;
}

impl<G, F> Evaluator<G> for F
where
    F: Fn(&G) -> f64,
{
    fn evaluate(&self, state: &G) -> f64 {
        self(state)
    }
}

/// A shareable evaluator handle.
pub type SharedEvaluator<G> = Arc<dyn Evaluator<G> + Send + Sync>;

/// Evaluators addressable by name.
///
/// Agents are configured with an evaluator name; the registry resolves it.
/// Names iterate in sorted order. Registries and the handles they hand out
/// may be shared across threads.
pub struct EvaluatorRegistry<G> {
    entries: BTreeMap<String, SharedEvaluator<G>>,
}

impl<G> EvaluatorRegistry<G> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register `evaluator` under `name`, replacing any previous entry.
    pub fn register<E>(&mut self, name: impl Into<String>, evaluator: E)
    where
        E: Evaluator<G> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(evaluator));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with<E>(mut self, name: impl Into<String>, evaluator: E) -> Self
    where
        E: Evaluator<G> + Send + Sync + 'static,
    {
        self.register(name, evaluator);
        self
    }

    /// Resolve `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownEvaluator`] if nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<SharedEvaluator<G>, GameError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::UnknownEvaluator {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<G> Default for EvaluatorRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> std::fmt::Debug for EvaluatorRegistry<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}
