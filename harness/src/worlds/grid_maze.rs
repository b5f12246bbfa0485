//! `GridMaze`: single-agent path finding on an ASCII maze.
//!
//! `P` marks the start and `.` the goal. Each move into an open cell costs
//! the step-cost function of the destination cell (1 by default).

use lodestar_search::contract::{Cost, Problem, Successor};

use super::grid::{manhattan, parse_layout, unique_marker, Direction, LayoutError, Pos, Walls};
use super::ILLEGAL_PATH_COST;

/// Small maze with a dead end and two routes to the goal.
pub const TINY_MAZE: &str = "
%%%%%%%
%    P%
% %%% %
%  %  %
%% %% %
%.    %
%%%%%%%
";

#[derive(Debug, Clone)]
pub struct GridMaze {
    id: String,
    walls: Walls,
    start: Pos,
    goal: Pos,
    step_cost: fn(Pos) -> Cost,
}

fn unit_cost(_: Pos) -> Cost {
    1
}

impl GridMaze {
    /// Parse a layout with exactly one `P` and one `.`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for malformed layouts or missing markers.
    pub fn parse(id: impl Into<String>, layout: &str) -> Result<Self, LayoutError> {
        let (walls, found) = parse_layout(layout, &['P', '.'])?;
        Ok(Self {
            id: id.into(),
            start: unique_marker(&found, 'P')?,
            goal: unique_marker(&found, '.')?,
            walls,
            step_cost: unit_cost,
        })
    }

    /// [`TINY_MAZE`].
    ///
    /// # Errors
    ///
    /// Never in practice; the layout is fixed.
    pub fn tiny() -> Result<Self, LayoutError> {
        Self::parse("tiny_maze", TINY_MAZE)
    }

    /// Replace the cost of entering a cell.
    #[must_use]
    pub fn with_step_cost(mut self, step_cost: fn(Pos) -> Cost) -> Self {
        self.step_cost = step_cost;
        self
    }

    #[must_use]
    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    #[must_use]
    pub fn goal(&self) -> Pos {
        self.goal
    }
}

impl Problem for GridMaze {
    type State = Pos;
    type Action = Direction;

    fn problem_id(&self) -> &str {
        &self.id
    }

    fn start_state(&self) -> Pos {
        self.start
    }

    fn is_goal(&self, state: &Pos) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Pos) -> Vec<Successor<Pos, Direction>> {
        self.walls
            .open_moves(*state)
            .into_iter()
            .map(|(dir, to)| Successor::new(to, dir, (self.step_cost)(to)))
            .collect()
    }

    /// [`ILLEGAL_PATH_COST`] if any move walks into a wall.
    fn path_cost(&self, actions: &[Direction]) -> Cost {
        let mut at = self.start;
        let mut total: Cost = 0;
        for dir in actions {
            match dir.step(at) {
                Some(to) if !self.walls.is_wall(to) => {
                    total = total.saturating_add((self.step_cost)(to));
                    at = to;
                }
                _ => return ILLEGAL_PATH_COST,
            }
        }
        total
    }
}

/// Manhattan distance to the goal. Admissible while every step costs at
/// least 1.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn manhattan_heuristic(state: &Pos, maze: &GridMaze) -> Cost {
    manhattan(*state, maze.goal) as Cost
}
