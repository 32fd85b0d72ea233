//! Integer grid observation
//!
//! Each cell holds one of:
//! - 0: empty
//! - 1: snake head
//! - 2: snake body (between head and tail)
//! - 3: snake tail
//! - 4: food
//!
//! Cells are painted food, body, tail, head, so a later layer wins. A
//! length-1 snake therefore reads as head (1), and after a self-collision
//! the overlapped cell reads as head too. Off-grid segments are skipped.

use serde::{Deserialize, Serialize};

use crate::game::{Cell, GameState, GridSize};

pub const EMPTY: u8 = 0;
pub const HEAD: u8 = 1;
pub const BODY: u8 = 2;
pub const TAIL: u8 = 3;
pub const FOOD: u8 = 4;

/// Row-major grid of cell codes with shape `(rows, cols)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Observation {
    fn empty(grid: GridSize) -> Self {
        let rows = grid.rows.max(0) as usize;
        let cols = grid.cols.max(0) as usize;
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let col = usize::try_from(cell.col).ok()?;
        let row = usize::try_from(cell.row).ok()?;
        (col < self.cols && row < self.rows).then_some(row * self.cols + col)
    }

    fn paint(&mut self, cell: Cell, value: u8) {
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = value;
        }
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, cell: Cell) -> Option<u8> {
        self.index(cell).map(|idx| self.cells[idx])
    }

    /// One row of the grid, or `None` past the last row
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols..(row + 1) * self.cols)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Nested rows, for callers that want `Vec<Vec<_>>`
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols.max(1)).map(<[u8]>::to_vec).collect()
    }

    pub fn count(&self, value: u8) -> usize {
        self.cells.iter().filter(|&&v| v == value).count()
    }
}

/// Encode the state as an integer grid
pub fn encode_grid(state: &GameState) -> Observation {
    let mut obs = Observation::empty(state.grid);

    if let Some(food) = state.food {
        obs.paint(food, FOOD);
    }

    let segments = state.snake.segments();
    if segments.len() > 2 {
        for segment in &segments[1..segments.len() - 1] {
            obs.paint(segment.cell, BODY);
        }
    }
    obs.paint(state.snake.tail().cell, TAIL);
    obs.paint(state.snake.head().cell, HEAD);

    obs
}
