//! Opponent models.

use std::str::FromStr;

use crate::error::GameError;

/// How opponent nodes combine their children's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Opponents minimize.
    #[default]
    Minimax,
    /// Opponents minimize; subtrees that cannot change the result are pruned.
    AlphaBeta,
    /// Opponents pick uniformly at random; their value is the mean.
    Expectimax,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [
        SearchMode::Minimax,
        SearchMode::AlphaBeta,
        SearchMode::Expectimax,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimax => "minimax",
            Self::AlphaBeta => "alpha_beta",
            Self::Expectimax => "expectimax",
        }
    }

    /// Whether the mode may skip siblings.
    #[must_use]
    pub const fn prunes(self) -> bool {
        matches!(self, Self::AlphaBeta)
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Self::Minimax),
            "alphabeta" | "alpha_beta" | "alpha-beta" => Ok(Self::AlphaBeta),
            "expectimax" => Ok(Self::Expectimax),
            _ => Err(GameError::UnknownMode { name: s.to_string() }),
        }
    }
}
