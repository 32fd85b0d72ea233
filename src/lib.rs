//! Snake simulation core with two front ends
//!
//! This library provides:
//! - Core game logic shared by every front end (game module)
//! - A gym-style RL environment over that core (rl module)
//! - Terminal rendering and keyboard mapping (render, input modules)
//! - Interactive and rollout execution modes (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
