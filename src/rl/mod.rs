//! Reinforcement learning environment for Snake game
//!
//! Provides:
//! - Integer grid observations (empty, head, body, tail, food)
//! - Gym-style environment interface over the shared game engine
//! - A step-limit wrapper for external time-limit truncation

pub mod environment;
pub mod observation;
pub mod time_limit;

pub use environment::{Info, SnakeEnvironment, Transition, ACTION_COUNT};
pub use observation::{encode_grid, Observation};
pub use time_limit::TimeLimit;
