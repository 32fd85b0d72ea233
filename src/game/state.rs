use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::action::Direction;
use super::clock::MovementClock;
use super::score::Score;

/// A cell on the game grid
///
/// Signed so a head that has left the grid can still be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.moved_by(dcol, drow)
    }
}

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: i32,
    pub rows: i32,
}

impl GridSize {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.col < self.cols && cell.row >= 0 && cell.row < self.rows
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.cols / 2, self.rows / 2)
    }

    pub fn cell_count(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    /// Every cell, column by column
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cols).flat_map(move |col| (0..self.rows).map(move |row| Cell::new(col, row)))
    }
}

/// One body segment: its cell and the direction it was moving when created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub cell: Cell,
    pub direction: Direction,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0; never empty
    segments: Vec<Segment>,
    /// Direction the head takes on the next logical move
    next_direction: Direction,
    clock: MovementClock,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Cell, direction: Direction, clock: MovementClock) -> Self {
        Self {
            segments: vec![Segment {
                cell: head,
                direction,
            }],
            next_direction: direction,
            clock,
        }
    }

    pub fn head(&self) -> Segment {
        self.segments[0]
    }

    pub fn tail(&self) -> Segment {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(|segment| segment.cell)
    }

    /// Current direction of the head
    pub fn direction(&self) -> Direction {
        self.head().direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn move_interval(&self) -> Duration {
        self.clock.interval()
    }

    pub fn clock(&self) -> &MovementClock {
        &self.clock
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Buffer a turn for the next move, ignoring exact reversals of the head
    pub fn change_direction(&mut self, requested: Direction) {
        if !self.direction().is_opposite(requested) {
            self.next_direction = requested;
        }
    }

    /// Feed elapsed time to the clock and advance if a move triggers
    pub fn update(&mut self, delta: Duration) -> bool {
        let triggered = self.clock.accumulate(delta);
        if triggered {
            self.advance();
        }
        triggered
    }

    /// Translate one cell along the buffered direction; length is unchanged
    pub fn advance(&mut self) {
        let direction = self.next_direction;
        let new_head = Segment {
            cell: self.head().cell.moved_in_direction(direction),
            direction,
        };
        self.segments.insert(0, new_head);
        self.segments.pop();
    }

    /// Add a segment behind the tail and speed the clock up
    pub fn grow(&mut self) {
        let tail = self.tail();
        let back = tail.direction.opposite();
        self.segments.push(Segment {
            cell: tail.cell.moved_in_direction(back),
            direction: tail.direction,
        });
        self.clock.speed_up();
    }

    pub fn eats(&self, food: Cell) -> bool {
        self.head().cell == food
    }

    pub fn collision(&self, grid: GridSize) -> Option<CollisionType> {
        let head = self.head().cell;
        if self.segments[1..].iter().any(|segment| segment.cell == head) {
            return Some(CollisionType::SelfCollision);
        }
        if !grid.contains(head) {
            return Some(CollisionType::Wall);
        }
        None
    }

    pub fn collides(&self, grid: GridSize) -> bool {
        self.collision(grid).is_some()
    }

    /// Check if a cell is occupied by any segment
    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// Back to a single segment with a fresh clock
    pub fn reset(&mut self, head: Cell, direction: Direction) {
        self.segments.clear();
        self.segments.push(Segment {
            cell: head,
            direction,
        });
        self.next_direction = direction;
        self.clock.reset();
    }
}

/// Where an episode stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeStatus {
    Running,
    Collided(CollisionType),
    /// Every cell is snake; nothing left to eat
    BoardFull,
}

impl EpisodeStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EpisodeStatus::Running)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the board is full
    pub food: Option<Cell>,
    pub grid: GridSize,
    pub score: Score,
    pub steps: u32,
    pub status: EpisodeStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Cell, grid: GridSize) -> Self {
        Self {
            snake,
            food: Some(food),
            grid,
            score: Score::new(),
            steps: 0,
            status: EpisodeStatus::Running,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }
}
