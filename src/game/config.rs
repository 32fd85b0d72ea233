use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::clock::{MovementClock, OvershootPolicy};
use super::error::GameError;
use super::state::GridSize;

pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 600;
pub const CELL_SIZE: u32 = 40;
pub const NUM_COLS: usize = (SCREEN_WIDTH / CELL_SIZE) as usize;
pub const NUM_ROWS: usize = (SCREEN_HEIGHT / CELL_SIZE) as usize;

pub const FRAME_RATE: u64 = 60;

pub const SNAKE_INIT_MOVE_INTERVAL_MS: u64 = 300;
pub const SNAKE_MIN_MOVE_INTERVAL_MS: u64 = 50;
pub const SNAKE_SPEED_FACTOR: f64 = 0.95;

pub const STEP_PENALTY: f32 = -0.01;
pub const EAT_REWARD: f32 = 1.0;
pub const COLLISION_PENALTY: f32 = -10.0;

/// Upper bound on `grid_width * grid_height`
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid columns
    pub grid_width: usize,
    /// Number of grid rows
    pub grid_height: usize,

    /// Move interval at the start of an episode, in milliseconds
    pub initial_move_interval_ms: u64,
    /// Floor for the move interval, in milliseconds
    pub min_move_interval_ms: u64,
    /// Multiplier applied to the interval on every growth
    pub speed_factor: f64,
    /// Elapsed time fed to the clock by `SnakeEnvironment::step`
    pub frame_delta_ms: u64,
    pub overshoot: OvershootPolicy,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f32,
    /// Penalty for each step
    pub step_penalty: f32,
    /// Penalty for colliding
    pub death_penalty: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: NUM_COLS,
            grid_height: NUM_ROWS,
            initial_move_interval_ms: SNAKE_INIT_MOVE_INTERVAL_MS,
            min_move_interval_ms: SNAKE_MIN_MOVE_INTERVAL_MS,
            speed_factor: SNAKE_SPEED_FACTOR,
            frame_delta_ms: 1000 / FRAME_RATE,
            overshoot: OvershootPolicy::Discard,
            food_reward: EAT_REWARD,
            step_penalty: STEP_PENALTY,
            death_penalty: COLLISION_PENALTY,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Derive the grid from a pixel screen and square cell size
    pub fn from_screen(screen_width: u32, screen_height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        Self::new(
            (screen_width / cell_size) as usize,
            (screen_height / cell_size) as usize,
        )
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON config file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err(GameError::InvalidConfig("grid is too large".to_string()));
        }
        match self.grid_width.checked_mul(self.grid_height) {
            Some(cells) if cells > MAX_GRID_CELLS => {
                return Err(GameError::InvalidConfig(format!(
                    "grid has {cells} cells, at most {MAX_GRID_CELLS} allowed"
                )));
            }
            Some(cells) if cells < 2 => {
                return Err(GameError::InvalidConfig(
                    "grid needs room for the snake and one food cell".to_string(),
                ));
            }
            Some(_) => {}
            None => return Err(GameError::InvalidConfig("grid is too large".to_string())),
        }
        if self.frame_delta_ms == 0 {
            return Err(GameError::InvalidConfig(
                "frame delta must be positive".to_string(),
            ));
        }
        if self.min_move_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "minimum move interval must be positive".to_string(),
            ));
        }
        if self.min_move_interval_ms > self.initial_move_interval_ms {
            return Err(GameError::InvalidConfig(format!(
                "minimum move interval {}ms exceeds initial interval {}ms",
                self.min_move_interval_ms, self.initial_move_interval_ms
            )));
        }
        if !(self.speed_factor > 0.0 && self.speed_factor <= 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "speed factor must be in (0, 1], got {}",
                self.speed_factor
            )));
        }
        Ok(())
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_width as i32, self.grid_height as i32)
    }

    pub fn frame_delta(&self) -> Duration {
        Duration::from_millis(self.frame_delta_ms)
    }

    /// A fresh clock for a new snake
    pub fn movement_clock(&self) -> MovementClock {
        MovementClock::new(
            Duration::from_millis(self.initial_move_interval_ms),
            Duration::from_millis(self.min_move_interval_ms),
            self.speed_factor,
        )
        .with_overshoot(self.overshoot)
    }
}
