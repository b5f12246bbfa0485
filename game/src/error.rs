//! Game-tree configuration errors.

/// Errors raised while configuring game-tree evaluation.
///
/// The recursion itself is infallible; every variant is a configuration
/// problem surfaced before any tree is searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Mode identifier not recognized.
    UnknownMode { name: String },
    /// No evaluator registered under this name.
    UnknownEvaluator { name: String },
    /// Depth setting is not a non-negative integer.
    InvalidDepth { raw: String },
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMode { name } => write!(f, "unknown game-tree mode: {name:?}"),
            Self::UnknownEvaluator { name } => {
                write!(f, "no evaluator registered under {name:?}")
            }
            Self::InvalidDepth { raw } => write!(f, "invalid search depth: {raw:?}"),
        }
    }
}

impl std::error::Error for GameError {}
