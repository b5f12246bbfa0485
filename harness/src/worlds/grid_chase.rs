//! `GridChase`: a pellet-eating chase game on an ASCII grid.
//!
//! Agent 0 is the eater (`P`); agents `1..` are ghosts (`G`), in layout
//! order. `.` is food and `o` a capsule that scares every ghost. The eater
//! wins by clearing all food and loses by meeting an unscared ghost.
//!
//! The engine sees only [`GameState`]; the evaluators below own every
//! scoring constant beyond the game's own rules.

use std::collections::BTreeSet;
use std::sync::Arc;

use lodestar_game::contract::GameState;
use lodestar_game::evaluation::EvaluatorRegistry;

use super::grid::{manhattan, parse_layout, unique_marker, Direction, LayoutError, Pos, Walls};

/// A small board with one ghost and one capsule.
pub const SMALL_CHASE: &str = "
%%%%%%%%%%
%o....G..%
%.%%.%%%.%
%P.......%
%%%%%%%%%%
";

/// Score lost on each eater move.
pub const TIME_PENALTY: i64 = 1;
/// Score gained per food pellet.
pub const FOOD_SCORE: i64 = 10;
/// Score gained for clearing the board.
pub const WIN_BONUS: i64 = 500;
/// Score lost when caught.
pub const LOSE_PENALTY: i64 = 500;
/// Score gained for catching a scared ghost.
pub const GHOST_SCORE: i64 = 200;
/// Ghost moves a capsule keeps ghosts scared.
pub const SCARED_MOVES: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ghost {
    pub pos: Pos,
    /// Where the ghost respawns after being caught.
    pub home: Pos,
    /// Remaining scared moves; 0 when dangerous.
    pub scared: u32,
}

#[derive(Debug, Clone)]
pub struct GridChase {
    walls: Arc<Walls>,
    eater: Pos,
    ghosts: Vec<Ghost>,
    food: BTreeSet<Pos>,
    capsules: BTreeSet<Pos>,
    score: i64,
    outcome: Option<Outcome>,
}

impl GridChase {
    /// Parse a layout with one `P`, any number of `G`, `.` and `o`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for malformed layouts or a missing eater.
    pub fn parse(layout: &str) -> Result<Self, LayoutError> {
        let (walls, found) = parse_layout(layout, &['P', 'G', '.', 'o'])?;
        let eater = unique_marker(&found, 'P')?;
        let cells = |marker: char| {
            found
                .iter()
                .filter(move |(_, ch)| *ch == marker)
                .map(|(pos, _)| *pos)
        };
        Ok(Self {
            walls: Arc::new(walls),
            eater,
            ghosts: cells('G')
                .map(|pos| Ghost {
                    pos,
                    home: pos,
                    scared: 0,
                })
                .collect(),
            food: cells('.').collect(),
            capsules: cells('o').collect(),
            score: 0,
            outcome: None,
        })
    }

    /// [`SMALL_CHASE`].
    ///
    /// # Errors
    ///
    /// Never in practice; the layout is fixed.
    pub fn small() -> Result<Self, LayoutError> {
        Self::parse(SMALL_CHASE)
    }

    #[must_use]
    pub fn eater(&self) -> Pos {
        self.eater
    }

    #[must_use]
    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    #[must_use]
    pub fn food(&self) -> &BTreeSet<Pos> {
        &self.food
    }

    #[must_use]
    pub fn capsules(&self) -> &BTreeSet<Pos> {
        &self.capsules
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn move_eater(&mut self, dir: Direction) {
        if let Some(to) = dir.step(self.eater).filter(|to| !self.walls.is_wall(*to)) {
            self.eater = to;
        }
        self.score -= TIME_PENALTY;

        if self.food.remove(&self.eater) {
            self.score += FOOD_SCORE;
            if self.food.is_empty() {
                self.score += WIN_BONUS;
                self.outcome = Some(Outcome::Win);
                return;
            }
        }
        if self.capsules.remove(&self.eater) {
            for ghost in &mut self.ghosts {
                ghost.scared = SCARED_MOVES;
            }
        }
        for index in 0..self.ghosts.len() {
            self.collide(index);
        }
    }

    fn move_ghost(&mut self, index: usize, dir: Direction) {
        let walls = Arc::clone(&self.walls);
        let Some(ghost) = self.ghosts.get_mut(index) else {
            return;
        };
        if let Some(to) = dir.step(ghost.pos).filter(|to| !walls.is_wall(*to)) {
            ghost.pos = to;
        }
        ghost.scared = ghost.scared.saturating_sub(1);
        self.collide(index);
    }

    fn collide(&mut self, index: usize) {
        if self.outcome.is_some() {
            return;
        }
        let Some(ghost) = self.ghosts.get_mut(index) else {
            return;
        };
        if ghost.pos != self.eater {
            return;
        }
        if ghost.scared > 0 {
            self.score += GHOST_SCORE;
            ghost.pos = ghost.home;
            ghost.scared = 0;
        } else {
            self.score -= LOSE_PENALTY;
            self.outcome = Some(Outcome::Lose);
        }
    }
}

impl GameState for GridChase {
    type Action = Direction;

    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }

    /// Eater: open moves plus `Stop`. Ghost: open moves, or `Stop` when boxed in.
    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        let (pos, may_stop) = match agent {
            0 => (self.eater, true),
            n => match self.ghosts.get(n - 1) {
                Some(ghost) => (ghost.pos, false),
                None => return Vec::new(),
            },
        };
        let mut moves: Vec<Direction> = self
            .walls
            .open_moves(pos)
            .into_iter()
            .map(|(dir, _)| dir)
            .collect();
        if may_stop || moves.is_empty() {
            moves.push(Direction::Stop);
        }
        moves
    }

    fn successor(&self, agent: usize, action: &Direction) -> Self {
        let mut next = self.clone();
        if next.outcome.is_none() {
            match agent {
                0 => next.move_eater(*action),
                n => next.move_ghost(n - 1, *action),
            }
        }
        next
    }

    fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

impl std::fmt::Display for GridChase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.walls.rows() {
            for col in 0..self.walls.cols() {
                let pos = (row, col);
                let ch = if self.walls.is_wall(pos) {
                    '%'
                } else if self.ghosts.iter().any(|g| g.pos == pos) {
                    'G'
                } else if pos == self.eater {
                    'P'
                } else if self.food.contains(&pos) {
                    '.'
                } else if self.capsules.contains(&pos) {
                    'o'
                } else {
                    ' '
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "score: {}", self.score)
    }
}

// ---------------------------------------------------------------------------
// Evaluators
// ---------------------------------------------------------------------------

fn nearest(from: Pos, cells: impl Iterator<Item = Pos>) -> Option<usize> {
    cells.map(|cell| manhattan(from, cell)).min()
}

/// Ghost term shared by the evaluators: chase scared ghosts, shy away from
/// dangerous ones.
#[allow(clippy::cast_precision_loss)]
fn ghost_pressure(state: &GridChase, chase_weight: f64, flee_weight: f64) -> f64 {
    state
        .ghosts
        .iter()
        .map(|ghost| {
            let distance = manhattan(state.eater, ghost.pos);
            match (distance, ghost.scared) {
                (0, _) => 0.0,
                (d, scared) if scared > 0 => chase_weight / d as f64,
                (d, _) => -flee_weight / d as f64,
            }
        })
        .sum()
}

/// The game score.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_evaluation(state: &GridChase) -> f64 {
    state.score as f64
}

/// Score plus pull toward food and capsules and ghost pressure.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn better_evaluation(state: &GridChase) -> f64 {
    let mut value = state.score as f64;
    if let Some(d) = nearest(state.eater, state.food.iter().copied()) {
        value += 10.0 / d.max(1) as f64;
    }
    value -= 4.0 * state.food.len() as f64;
    value -= 20.0 * state.capsules.len() as f64;
    value + ghost_pressure(state, 200.0, 10.0)
}

/// One-ply action score for a reflex eater: the successor's score, pulled
/// toward food, with ghost pressure and a penalty for standing still.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reflex_action_score(state: &GridChase, action: &Direction) -> f64 {
    let next = state.successor(0, action);
    let mut value = next.score as f64;
    if let Some(d) = nearest(next.eater, next.food.iter().copied()) {
        value += 10.0 / d.max(1) as f64;
    }
    value += ghost_pressure(&next, 200.0, 10.0);
    if *action == Direction::Stop {
        value -= 50.0;
    }
    value
}

/// `"score"` and `"better"`.
#[must_use]
pub fn chase_evaluators() -> EvaluatorRegistry<GridChase> {
    EvaluatorRegistry::new()
        .with("score", score_evaluation)
        .with("better", better_evaluation)
}
