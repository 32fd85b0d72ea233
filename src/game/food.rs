use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::error::GameError;
use super::state::{Cell, GridSize};

/// Places food on a uniformly chosen free cell
#[derive(Debug, Clone, Copy)]
pub struct FoodSpawner {
    grid: GridSize,
}

impl FoodSpawner {
    pub fn new(grid: GridSize) -> Self {
        Self { grid }
    }

    /// Pick a cell not in `occupied`, or `BoardFull` if there is none
    pub fn spawn<R, I>(&self, rng: &mut R, occupied: I) -> Result<Cell, GameError>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = Cell>,
    {
        let occupied: HashSet<Cell> = occupied.into_iter().collect();
        let free: Vec<Cell> = self
            .grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .collect();

        free.choose(rng).copied().ok_or(GameError::BoardFull)
    }
}
