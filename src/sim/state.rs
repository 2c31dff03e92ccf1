//! Arena state and configuration
//!
//! The arena is the only mutable entity in the game. Geometry is fixed at
//! construction; paddle, ball and score change every tick.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ArenaError, Result};

/// Numeric state vector handed to policies:
/// `[paddle_x, ball_x, ball_y, ball heading in radians]`
pub type Observation = [f64; 4];

/// Geometric and kinematic parameters, fixed for the life of an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Extent of the x dimension
    pub width: u32,
    /// Extent of the y dimension
    pub height: u32,
    /// Length of the paddle's x-aligned hitbox
    pub paddle_size: u32,
    /// Max distance covered by the paddle per step
    pub paddle_speed: u32,
    /// Radius of the ball's hitbox
    pub ball_size: u32,
    /// Max distance covered by the ball per step
    pub ball_speed: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            paddle_size: DEFAULT_PADDLE_SIZE,
            paddle_speed: DEFAULT_PADDLE_SPEED,
            ball_size: DEFAULT_BALL_SIZE,
            ball_speed: DEFAULT_BALL_SPEED,
        }
    }
}

impl ArenaConfig {
    /// Reject parameters that would make the position invariants unsatisfiable
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_size", self.paddle_size),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| *v == 0) {
            return Err(invalid(format!("{name} must be positive")));
        }
        // Positions are i32; keep every extent comfortably inside that range
        if let Some((name, v)) = fields.iter().find(|(_, v)| *v > i32::MAX as u32 / 2) {
            return Err(invalid(format!("{name} is too large ({v})")));
        }
        if self.paddle_size > self.width {
            return Err(invalid(format!(
                "paddle_size ({}) exceeds width ({})",
                self.paddle_size, self.width
            )));
        }
        if 2 * self.ball_size >= self.width {
            return Err(invalid(format!(
                "ball of size {} does not fit in width {}",
                self.ball_size, self.width
            )));
        }
        if 2 * self.ball_size >= self.height {
            return Err(invalid(format!(
                "ball of size {} does not fit in height {}",
                self.ball_size, self.height
            )));
        }
        Ok(())
    }

    /// Rightmost legal paddle position
    pub fn paddle_max_x(&self) -> i32 {
        (self.width - self.paddle_size) as i32
    }

    /// Legal ball centre range along x
    pub fn ball_x_range(&self) -> (i32, i32) {
        (self.ball_size as i32, (self.width - self.ball_size) as i32)
    }

    /// Legal ball centre range along y
    pub fn ball_y_range(&self) -> (i32, i32) {
        (self.ball_size as i32, (self.height - self.ball_size) as i32)
    }
}

fn invalid(reason: String) -> ArenaError {
    ArenaError::InvalidConfiguration(reason)
}

/// Per-tick values of the arena, comparable across runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub paddle_x: i32,
    pub ball_x: i32,
    pub ball_y: i32,
    pub ball_dx: f64,
    pub ball_dy: f64,
    pub score: i64,
}

/// Complete arena state (paddle, ball, score and the reset RNG)
#[derive(Debug, Clone)]
pub struct ArenaState {
    config: ArenaConfig,
    /// Paddle left edge
    pub paddle_x: i32,
    paddle_y: i32,
    /// Ball centre
    pub ball_x: i32,
    pub ball_y: i32,
    /// Ball direction
    pub ball_dx: f64,
    pub ball_dy: f64,
    /// Life-improvement score
    pub score: i64,
    /// Seed the arena was built with
    seed: u64,
    rng: Pcg32,
}

impl ArenaState {
    /// Build an arena with an OS-drawn seed
    pub fn new(config: ArenaConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// Build an arena whose resets are reproducible from `seed`
    pub fn with_seed(config: ArenaConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut state = Self {
            config,
            paddle_x: 0,
            paddle_y: 0,
            ball_x: 0,
            ball_y: 0,
            ball_dx: 0.0,
            ball_dy: 0.0,
            score: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        Ok(state)
    }

    /// Center the paddle, throw the ball somewhere random and zero the score
    pub fn reset(&mut self) {
        let cfg = self.config;
        self.paddle_x = (cfg.width - cfg.paddle_size) as i32 / 2;
        self.paddle_y = cfg.height as i32 / 2;

        let (x_lo, x_hi) = cfg.ball_x_range();
        let (y_lo, y_hi) = cfg.ball_y_range();
        self.ball_x = self.rng.random_range(x_lo as f64..x_hi as f64) as i32;
        self.ball_y = self.rng.random_range(y_lo as f64..y_hi as f64) as i32;

        // NOTE: dy is 1 - dx^2 rather than sin(theta). This is not a unit
        // vector and dy always starts non-negative; kept as-is because it
        // shapes the ball-speed distribution players are used to.
        let theta = self.rng.random_range(0.0..TAU);
        self.ball_dx = theta.cos();
        self.ball_dy = 1.0 - self.ball_dx * self.ball_dx;

        self.score = 0;
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn paddle_size(&self) -> u32 {
        self.config.paddle_size
    }

    pub fn paddle_speed(&self) -> u32 {
        self.config.paddle_speed
    }

    pub fn ball_size(&self) -> u32 {
        self.config.ball_size
    }

    pub fn ball_speed(&self) -> u32 {
        self.config.ball_speed
    }

    /// Paddle row, fixed at half the arena height
    pub fn paddle_y(&self) -> i32 {
        self.paddle_y
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// State vector for policies
    pub fn observation(&self) -> Observation {
        [
            self.paddle_x as f64,
            self.ball_x as f64,
            self.ball_y as f64,
            self.ball_dy.atan2(self.ball_dx),
        ]
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            paddle_x: self.paddle_x,
            ball_x: self.ball_x,
            ball_y: self.ball_y,
            ball_dx: self.ball_dx,
            ball_dy: self.ball_dy,
            score: self.score,
        }
    }

    /// True when paddle and ball are inside their legal ranges
    pub fn in_bounds(&self) -> bool {
        let (x_lo, x_hi) = self.config.ball_x_range();
        let (y_lo, y_hi) = self.config.ball_y_range();
        (0..=self.config.paddle_max_x()).contains(&self.paddle_x)
            && (x_lo..=x_hi).contains(&self.ball_x)
            && (y_lo..=y_hi).contains(&self.ball_y)
    }
}
