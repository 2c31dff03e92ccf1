//! Paddle Boi - A paddle-and-ball arena for humans and policies
//!
//! Core modules:
//! - `sim`: Arena state, actions, physics step and reward
//! - `decision`: Human input and policy decision sources
//! - `session`: Fixed-rate control loop
//! - `platform`: Render/input/clock backend traits and native backends
//! - `renderer`: Draws the arena through a render backend
//! - `settings`: Arena and play configuration

pub mod decision;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use decision::{DecisionSource, HumanInput, Policy, PolicyFn, TagPolicy};
pub use error::{ArenaError, Result};
pub use session::{ControlLoop, LoopPhase, PlayReport};
pub use settings::{PlaySettings, Settings};
pub use sim::{Action, ArenaConfig, ArenaState, Observation};

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (position units)
    pub const DEFAULT_WIDTH: u32 = 500;
    pub const DEFAULT_HEIGHT: u32 = 500;

    /// Paddle defaults
    pub const DEFAULT_PADDLE_SIZE: u32 = 60;
    pub const DEFAULT_PADDLE_SPEED: u32 = 5;

    /// Ball defaults
    pub const DEFAULT_BALL_SIZE: u32 = 15;
    pub const DEFAULT_BALL_SPEED: u32 = 5;

    /// Default updates (and frames) per second of real time
    pub const DEFAULT_RATE: u32 = 60;

    /// Score decay constant for the paddle/ball color ramp
    pub const COLOR_HALF_LIFE: f64 = 20.0;
}
