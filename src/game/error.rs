use thiserror::Error;

/// Error conditions raised by the simulation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// Action index outside the discrete action space
    #[error("invalid action {0}, expected a value in 0..=3")]
    InvalidAction(i64),

    /// No free cell is left to place food on
    #[error("board is full, no free cell for food")]
    BoardFull,

    /// `step` or an accessor was called before `reset`
    #[error("environment has not been reset")]
    UninitializedState,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
