//! Error types

use thiserror::Error;

/// Errors raised by the arena, its decision sources and the control loop
#[derive(Error, Debug)]
pub enum ArenaError {
    /// A decision tag outside the action set
    #[error("invalid decision {:?}, choose from: {}", .value, .choices.join(", "))]
    InvalidAction {
        value: String,
        choices: Vec<&'static str>,
    },

    /// Construction or play parameters that would break the arena invariants
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Failure reported by a render or input backend
    #[error("backend error: {0}")]
    Backend(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
