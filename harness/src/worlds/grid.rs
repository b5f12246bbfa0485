//! Grid geometry shared by the maze and chase worlds.
//!
//! Layouts are ASCII: `%` is a wall, space is open floor, and any other
//! character is a world-specific marker on open floor. Positions are
//! `(row, col)` with row 0 at the top.

/// Cell coordinates, `(row, col)`.
pub type Pos = (usize, usize);

/// A compass move, or staying put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four moves that change position, in generator order.
    pub const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Stop => "stop",
        }
    }

    /// The cell one step away, or `None` off the top or left edge.
    #[must_use]
    pub fn step(self, (row, col): Pos) -> Option<Pos> {
        match self {
            Self::North => Some((row.checked_sub(1)?, col)),
            Self::South => Some((row + 1, col)),
            Self::East => Some((row, col + 1)),
            Self::West => Some((row, col.checked_sub(1)?)),
            Self::Stop => Some((row, col)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Manhattan distance between two cells.
#[must_use]
pub fn manhattan(a: Pos, b: Pos) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Wall map of a rectangular layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walls {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Walls {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Out-of-bounds cells count as walls.
    #[must_use]
    pub fn is_wall(&self, (row, col): Pos) -> bool {
        row >= self.rows || col >= self.cols || self.cells[row * self.cols + col]
    }

    /// Moves from `pos` that land on open floor, in [`Direction::MOVES`] order.
    #[must_use]
    pub fn open_moves(&self, pos: Pos) -> Vec<(Direction, Pos)> {
        Direction::MOVES
            .into_iter()
            .filter_map(|dir| dir.step(pos).map(|to| (dir, to)))
            .filter(|&(_, to)| !self.is_wall(to))
            .collect()
    }

    /// All open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&pos| !self.is_wall(pos))
    }
}

/// Error parsing an ASCII layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No rows.
    Empty,
    /// Row `row` has a different width than row 0.
    Ragged { row: usize },
    /// Character not allowed by the world.
    UnknownCell { ch: char, row: usize, col: usize },
    /// A required marker does not appear.
    MissingMarker { marker: char },
    /// A marker that must be unique appears more than once.
    DuplicateMarker { marker: char },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("layout has no rows"),
            Self::Ragged { row } => write!(f, "layout row {row} has a different width"),
            Self::UnknownCell { ch, row, col } => {
                write!(f, "unexpected cell {ch:?} at ({row}, {col})")
            }
            Self::MissingMarker { marker } => write!(f, "layout has no {marker:?} cell"),
            Self::DuplicateMarker { marker } => {
                write!(f, "layout has more than one {marker:?} cell")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Split a layout into walls and markers.
///
/// Every character other than `%` and space must be in `markers`. Leading
/// and trailing blank lines are ignored; rows must all have the same width.
///
/// # Errors
///
/// Returns [`LayoutError`] for empty, ragged, or unknown-character layouts.
pub fn parse_layout(
    text: &str,
    markers: &[char],
) -> Result<(Walls, Vec<(Pos, char)>), LayoutError> {
    let all: Vec<&str> = text.lines().collect();
    let first_row = all.iter().position(|l| !l.trim().is_empty());
    let last_row = all.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first_row), Some(last_row)) = (first_row, last_row) else {
        return Err(LayoutError::Empty);
    };
    let lines = &all[first_row..=last_row];
    let cols = lines[0].chars().count();

    let mut cells = Vec::with_capacity(lines.len() * cols);
    let mut found = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        if line.chars().count() != cols {
            return Err(LayoutError::Ragged { row });
        }
        for (col, ch) in line.chars().enumerate() {
            match ch {
                '%' => cells.push(true),
                ' ' => cells.push(false),
                _ if markers.contains(&ch) => {
                    cells.push(false);
                    found.push(((row, col), ch));
                }
                _ => return Err(LayoutError::UnknownCell { ch, row, col }),
            }
        }
    }

    Ok((
        Walls {
            rows: lines.len(),
            cols,
            cells,
        },
        found,
    ))
}

/// The single position of `marker`.
///
/// # Errors
///
/// [`LayoutError::MissingMarker`] or [`LayoutError::DuplicateMarker`].
pub fn unique_marker(found: &[(Pos, char)], marker: char) -> Result<Pos, LayoutError> {
    let mut hits = found.iter().filter(|(_, ch)| *ch == marker).map(|(pos, _)| *pos);
    let pos = hits.next().ok_or(LayoutError::MissingMarker { marker })?;
    if hits.next().is_some() {
        return Err(LayoutError::DuplicateMarker { marker });
    }
    Ok(pos)
}
