use std::fmt;

use super::stone::Stone;
use crate::error::MoveError;

/// Stones in an unbroken line needed to win.
pub const WIN_LENGTH: usize = 5;

/// Horizontal, vertical, and the two diagonals.
const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// The stone occupying this cell, if any
    pub fn stone(self) -> Option<Stone> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Stone::Black),
            Cell::White => Some(Stone::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// An in-bounds board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Point { x, y }
    }
}

/// A placed stone. Never rewritten once recorded in the board history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub x: usize,
    pub y: usize,
    pub stone: Stone,
}

/// Verdict of [`Board::judge`] after the latest placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    Continue,
    Draw,
    Win(Stone),
}

/// Square N x N board stored row-major (`index = y * N + x`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    scale: usize,
    cells: Vec<Cell>,
    history: Vec<Move>,
}

impl Board {
    /// Create a new empty board of the given scale
    pub fn new(scale: usize) -> Self {
        assert!(scale > 0, "board scale must be positive");
        Board {
            scale,
            cells: vec![Cell::Empty; scale * scale],
            history: Vec::with_capacity(scale * scale),
        }
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Number of cells (N²), which is also the size of the action space
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Placed stones in order
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn stone_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_full(&self) -> bool {
        self.history.len() >= self.cells.len()
    }

    /// Get the cell at a point, or `None` if the point is off the board.
    pub fn get(&self, point: Point) -> Option<Cell> {
        self.point_to_index(point).map(|index| self.cells[index])
    }

    /// Clear every cell and forget the history
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.history.clear();
    }

    /// Place a stone at (x, y).
    pub fn put(&mut self, x: i64, y: i64, stone: Stone) -> Result<(), MoveError> {
        let index = self.index_of(x, y).ok_or(MoveError::OutOfBounds {
            x,
            y,
            scale: self.scale,
        })?;
        if !self.cells[index].is_empty() {
            let point = self.point_at(index);
            return Err(MoveError::Occupied {
                x: point.x,
                y: point.y,
            });
        }

        let point = self.point_at(index);
        self.cells[index] = stone.to_cell();
        self.history.push(Move {
            x: point.x,
            y: point.y,
            stone,
        });
        Ok(())
    }

    /// Place a stone at a point produced by a player
    pub fn put_point(&mut self, point: Point, stone: Stone) -> Result<(), MoveError> {
        self.put(to_signed(point.x), to_signed(point.y), stone)
    }

    /// Check whether (x, y) is on the board and empty
    pub fn can_put(&self, x: i64, y: i64) -> bool {
        self.index_of(x, y)
            .is_some_and(|index| self.cells[index].is_empty())
    }

    pub fn can_put_point(&self, point: Point) -> bool {
        self.can_put(to_signed(point.x), to_signed(point.y))
    }

    /// Indices of every empty cell, ascending
    pub fn legal_moves(&self) -> Vec<usize> {
        legal_indices(&self.cells)
    }

    /// Judge the game from the lines through the most recent stone.
    ///
    /// A completed line wins even when the same move fills the board.
    pub fn judge(&self) -> Judgement {
        let Some(last) = self.history.last() else {
            return Judgement::Continue;
        };

        for (dx, dy) in DIRECTIONS {
            let line = 1 + self.run_length(last, dx, dy) + self.run_length(last, -dx, -dy);
            if line >= WIN_LENGTH {
                return Judgement::Win(last.stone);
            }
        }

        if self.is_full() {
            Judgement::Draw
        } else {
            Judgement::Continue
        }
    }

    /// Count same-color stones walking away from `from` (exclusive)
    fn run_length(&self, from: &Move, dx: i64, dy: i64) -> usize {
        let cell = from.stone.to_cell();
        let mut count = 0;
        let mut x = to_signed(from.x) + dx;
        let mut y = to_signed(from.y) + dy;
        while let Some(index) = self.index_of(x, y) {
            if self.cells[index] != cell {
                break;
            }
            count += 1;
            x += dx;
            y += dy;
        }
        count
    }

    pub fn index_to_point(&self, index: usize) -> Option<Point> {
        (index < self.cells.len()).then(|| self.point_at(index))
    }

    pub fn point_to_index(&self, point: Point) -> Option<usize> {
        self.index_of(to_signed(point.x), to_signed(point.y))
    }

    fn point_at(&self, index: usize) -> Point {
        Point {
            x: index % self.scale,
            y: index / self.scale,
        }
    }

    fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.scale && y < self.scale).then_some(y * self.scale + x)
    }
}

/// Indices of the empty cells in a row-major state vector
pub fn legal_indices(cells: &[Cell]) -> Vec<usize> {
    cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(index, _)| index)
        .collect()
}

fn to_signed(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Diagnostic grid dump, one glyph per cell. Not a stable format.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.scale * 4 + 1);
        writeln!(f, "{separator}")?;
        for row in self.cells.chunks(self.scale) {
            write!(f, "|")?;
            for cell in row {
                let glyph = match cell {
                    Cell::Empty => "   ",
                    Cell::Black => " o ",
                    Cell::White => " * ",
                };
                write!(f, "{glyph}|")?;
            }
            writeln!(f)?;
            writeln!(f, "{separator}")?;
        }
        Ok(())
    }
}
