//! Discrete paddle actions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// One decision per tick: which way the paddle moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    #[default]
    Stall,
    Right,
}

impl Action {
    /// Every action, in effect order
    pub const ALL: [Action; 3] = [Action::Left, Action::Stall, Action::Right];

    /// Signed paddle direction for this action
    pub fn effect(self) -> i32 {
        match self {
            Action::Left => -1,
            Action::Stall => 0,
            Action::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Stall => "stall",
            Action::Right => "right",
        }
    }

    /// Tags accepted by [`Action::from_str`]
    pub fn choices() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.as_str()).collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ArenaError::InvalidAction {
                value: s.to_string(),
                choices: Self::choices(),
            })
    }
}
