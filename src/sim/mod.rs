//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (resets)
//! - One discrete action per step
//! - No rendering or platform dependencies

pub mod action;
pub mod state;
pub mod step;

pub use action::Action;
pub use state::{ArenaConfig, ArenaState, Kinematics, Observation};
pub use step::{ConsequenceHook, NoConsequence, advance, advance_with, reward, update};
