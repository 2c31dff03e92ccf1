//! Decision sources
//!
//! Every tick the control loop asks one [`DecisionSource`] for an action.
//! Humans decide through the keyboard, policies through the observation vector.

use crate::error::Result;
use crate::platform::KeyState;
use crate::sim::{Action, ArenaState, Observation};

/// Supplies one action per tick
pub trait DecisionSource {
    /// `keys` is the latest key state reported by the input backend
    fn decide(&mut self, state: &ArenaState, keys: &KeyState) -> Result<Action>;

    /// Short label for logs
    fn name(&self) -> &str;
}

/// Keyboard control: right/D moves right, left/A moves left
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanInput;

impl HumanInput {
    pub fn action_for(keys: &KeyState) -> Action {
        if keys.right || keys.d {
            Action::Right
        } else if keys.left || keys.a {
            Action::Left
        } else {
            Action::Stall
        }
    }
}

impl DecisionSource for HumanInput {
    fn decide(&mut self, _state: &ArenaState, keys: &KeyState) -> Result<Action> {
        Ok(Self::action_for(keys))
    }

    fn name(&self) -> &str {
        "human"
    }
}

/// A strategy mapping observations to actions.
///
/// May hold state (a learned value table, an RNG...). Closures
/// `FnMut(&Observation) -> Action` implement it directly.
pub trait Policy {
    fn act(&mut self, obs: &Observation) -> Action;
}

impl<F: FnMut(&Observation) -> Action> Policy for F {
    fn act(&mut self, obs: &Observation) -> Action {
        self(obs)
    }
}

/// Drives the paddle with a [`Policy`]
#[derive(Debug, Clone)]
pub struct PolicyFn<P>(pub P);

impl<P: Policy> DecisionSource for PolicyFn<P> {
    fn decide(&mut self, state: &ArenaState, _keys: &KeyState) -> Result<Action> {
        Ok(self.0.act(&state.observation()))
    }

    fn name(&self) -> &str {
        "policy"
    }
}

/// Drives the paddle with a strategy that answers in tags (`"left"`, `"stall"`, `"right"`).
///
/// An unknown tag ends the session with `InvalidAction`.
#[derive(Debug, Clone)]
pub struct TagPolicy<F>(pub F);

impl<F, S> DecisionSource for TagPolicy<F>
where
    F: FnMut(&Observation) -> S,
    S: AsRef<str>,
{
    fn decide(&mut self, state: &ArenaState, _keys: &KeyState) -> Result<Action> {
        (self.0)(&state.observation()).as_ref().parse()
    }

    fn name(&self) -> &str {
        "tag-policy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArenaError;
    use crate::sim::ArenaConfig;

    fn arena() -> ArenaState {
        ArenaState::with_seed(ArenaConfig::default(), 11).unwrap()
    }

    #[test]
    fn test_human_key_mapping() {
        let none = KeyState::default();
        assert_eq!(HumanInput::action_for(&none), Action::Stall);

        let right = KeyState { right: true, ..none };
        let d = KeyState { d: true, ..none };
        let left = KeyState { left: true, ..none };
        let a = KeyState { a: true, ..none };
        assert_eq!(HumanInput::action_for(&right), Action::Right);
        assert_eq!(HumanInput::action_for(&d), Action::Right);
        assert_eq!(HumanInput::action_for(&left), Action::Left);
        assert_eq!(HumanInput::action_for(&a), Action::Left);

        // Right wins when both directions are held
        let both = KeyState { left: true, d: true, ..none };
        assert_eq!(HumanInput::action_for(&both), Action::Right);
    }

    #[test]
    fn test_policy_sees_observation() {
        let state = arena();
        let expected = state.observation();
        let mut seen = None;
        let mut source = PolicyFn(|obs: &Observation| {
            seen = Some(*obs);
            Action::Left
        });
        let keys = KeyState { right: true, ..Default::default() };
        assert_eq!(source.decide(&state, &keys).unwrap(), Action::Left);
        drop(source);
        assert_eq!(seen, Some(expected));
    }

    #[test]
    fn test_stateful_policy() {
        struct Alternate(bool);
        impl Policy for Alternate {
            fn act(&mut self, _obs: &Observation) -> Action {
                self.0 = !self.0;
                if self.0 { Action::Right } else { Action::Left }
            }
        }

        let state = arena();
        let mut source = PolicyFn(Alternate(false));
        let keys = KeyState::default();
        assert_eq!(source.decide(&state, &keys).unwrap(), Action::Right);
        assert_eq!(source.decide(&state, &keys).unwrap(), Action::Left);
        assert_eq!(source.name(), "policy");
    }

    #[test]
    fn test_tag_policy() {
        let state = arena();
        let keys = KeyState::default();

        let mut ok = TagPolicy(|_: &Observation| "right");
        assert_eq!(ok.decide(&state, &keys).unwrap(), Action::Right);

        let mut bad = TagPolicy(|_: &Observation| String::from("sideways"));
        let err = bad.decide(&state, &keys).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidAction { ref value, .. } if value == "sideways"));
    }
}
