//! Configured adversarial agents.

use crate::contract::GameState;
use crate::error::GameError;
use crate::evaluation::{EvaluatorRegistry, SharedEvaluator};
use crate::mode::SearchMode;
use crate::tree::{decide, Decision};

/// Evaluator name, look-ahead depth, and opponent model for an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub evaluator: String,
    /// Full agent cycles to look ahead.
    pub depth: u32,
    pub mode: SearchMode,
}

impl AgentConfig {
    /// Build a config from textual settings.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidDepth`] if `depth` is not a non-negative integer,
    /// [`GameError::UnknownMode`] if `mode` is not a known identifier.
    pub fn parse(evaluator: &str, depth: &str, mode: &str) -> Result<Self, GameError> {
        let depth = depth
            .trim()
            .parse::<u32>()
            .map_err(|_| GameError::InvalidDepth {
                raw: depth.to_string(),
            })?;
        Ok(Self {
            evaluator: evaluator.to_string(),
            depth,
            mode: mode.parse()?,
        })
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            evaluator: "score".to_string(),
            depth: 2,
            mode: SearchMode::Minimax,
        }
    }
}

/// An agent 0 player that runs [`decide`] with a fixed configuration.
pub struct AdversarialAgent<G> {
    config: AgentConfig,
    evaluator: SharedEvaluator<G>,
}

impl<G: GameState> AdversarialAgent<G> {
    /// Resolve the configured evaluator in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownEvaluator`] if the evaluator name is not
    /// registered.
    pub fn new(config: AgentConfig, registry: &EvaluatorRegistry<G>) -> Result<Self, GameError> {
        let evaluator = registry.get(&config.evaluator)?;
        Ok(Self { config, evaluator })
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Full decision with root value and tree statistics.
    pub fn decide(&self, state: &G) -> Decision<G::Action> {
        decide(state, self.config.depth, self.evaluator.as_ref(), self.config.mode)
    }

    /// The chosen action only.
    pub fn get_action(&self, state: &G) -> Option<G::Action> {
        self.decide(state).action
    }
}

impl<G> std::fmt::Debug for AdversarialAgent<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdversarialAgent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
