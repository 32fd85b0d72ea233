//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Both the interactive mode and the RL environment drive the same `GameEngine`.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod score;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use clock::{MovementClock, OvershootPolicy};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use food::FoodSpawner;
pub use score::Score;
pub use state::{Cell, CollisionType, EpisodeStatus, GameState, GridSize, Segment, Snake};
