//! Physics step and reward
//!
//! Advances the arena by one discrete action. Order matters: paddle first,
//! then ball motion and clamping, then bounce checks on the clamped position,
//! then consequences.

use super::action::Action;
use super::state::ArenaState;
use crate::error::Result;

/// Extension point run at the end of every step.
///
/// This is where ball/paddle interaction would turn into score. The stock
/// game ships without any zone logic, see [`NoConsequence`].
pub trait ConsequenceHook {
    fn apply(&mut self, state: &mut ArenaState);
}

/// Leaves the score untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConsequence;

impl ConsequenceHook for NoConsequence {
    fn apply(&mut self, _state: &mut ArenaState) {}
}

impl<F: FnMut(&mut ArenaState)> ConsequenceHook for F {
    fn apply(&mut self, state: &mut ArenaState) {
        self(state)
    }
}

/// Advance the arena by one step with the stock (no-op) consequences
pub fn advance(state: &mut ArenaState, action: Action) {
    advance_with(state, action, &mut NoConsequence);
}

/// Advance the arena by one step, then run `hook`
pub fn advance_with<H: ConsequenceHook + ?Sized>(state: &mut ArenaState, action: Action, hook: &mut H) {
    let cfg = *state.config();

    // Paddle
    let paddle_velocity = action.effect() * cfg.paddle_speed as i32;
    state.paddle_x = (state.paddle_x + paddle_velocity).clamp(0, cfg.paddle_max_x());

    // Ball
    let (x_lo, x_hi) = cfg.ball_x_range();
    let (y_lo, y_hi) = cfg.ball_y_range();
    let speed = cfg.ball_speed as f64;
    state.ball_x = (state.ball_x as f64 + speed * state.ball_dx).clamp(x_lo as f64, x_hi as f64) as i32;
    state.ball_y = (state.ball_y as f64 + speed * state.ball_dy).clamp(y_lo as f64, y_hi as f64) as i32;

    // Walls (both axes every tick so corners bounce on both)
    if state.ball_x <= x_lo || state.ball_x >= x_hi {
        state.ball_dx = -state.ball_dx;
    }
    if state.ball_y <= y_lo || state.ball_y >= y_hi {
        state.ball_dy = -state.ball_dy;
    }

    hook.apply(state);
}

/// Parse a textual decision and advance.
///
/// An unknown tag fails with `InvalidAction` before anything moves.
pub fn update(state: &mut ArenaState, decision: &str) -> Result<()> {
    let action = decision.parse::<Action>()?;
    advance(state, action);
    Ok(())
}

/// Scalar reward for the current state
pub fn reward(state: &ArenaState) -> f64 {
    state.score as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArenaError;
    use crate::sim::state::ArenaConfig;
    use proptest::prelude::*;

    fn arena(seed: u64) -> ArenaState {
        ArenaState::with_seed(ArenaConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_paddle_moves_by_speed() {
        let mut state = arena(1);
        state.paddle_x = 220;
        advance(&mut state, Action::Right);
        assert_eq!(state.paddle_x, 225);
        advance(&mut state, Action::Left);
        advance(&mut state, Action::Left);
        assert_eq!(state.paddle_x, 215);
        advance(&mut state, Action::Stall);
        assert_eq!(state.paddle_x, 215);
    }

    #[test]
    fn test_paddle_clamps_at_edges() {
        let mut state = arena(1);
        state.paddle_x = 220;
        for _ in 0..100 {
            advance(&mut state, Action::Right);
        }
        assert_eq!(state.paddle_x, 440);

        for _ in 0..100 {
            advance(&mut state, Action::Left);
        }
        assert_eq!(state.paddle_x, 0);
    }

    #[test]
    fn test_left_wall_flip() {
        let mut state = arena(2);
        state.ball_x = 15;
        state.ball_dx = -1.0;
        state.ball_y = 250;
        state.ball_dy = 0.0;
        advance(&mut state, Action::Stall);
        assert_eq!(state.ball_dx, 1.0);
        assert!(state.ball_x >= 15);
        assert_eq!(state.ball_y, 250);
        assert_eq!(state.ball_dy, 0.0);
    }

    #[test]
    fn test_wall_flip_any_paddle_action() {
        for action in Action::ALL {
            let mut state = arena(2);
            state.ball_x = 15;
            state.ball_dx = -1.0;
            state.ball_y = 250;
            state.ball_dy = 0.0;
            advance(&mut state, action);
            assert_eq!(state.ball_dx, 1.0);
            assert_eq!(state.ball_x, 15);
        }
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let mut state = arena(3);
        state.ball_x = 484;
        state.ball_y = 484;
        state.ball_dx = 0.6;
        state.ball_dy = 0.8;
        advance(&mut state, Action::Stall);
        assert_eq!((state.ball_x, state.ball_y), (485, 485));
        assert_eq!(state.ball_dx, -0.6);
        assert_eq!(state.ball_dy, -0.8);
    }

    #[test]
    fn test_ball_position_truncates() {
        let mut state = arena(4);
        state.ball_x = 100;
        state.ball_y = 100;
        state.ball_dx = 0.5;
        state.ball_dy = 0.3;
        advance(&mut state, Action::Stall);
        // 100 + 2.5 and 100 + 1.5
        assert_eq!((state.ball_x, state.ball_y), (102, 101));
        assert_eq!((state.ball_dx, state.ball_dy), (0.5, 0.3));
    }

    #[test]
    fn test_update_rejects_unknown_tag_without_moving() {
        let mut state = arena(5);
        let before = state.kinematics();
        let err = update(&mut state, "up").unwrap_err();
        assert!(matches!(err, ArenaError::InvalidAction { ref value, .. } if value == "up"));
        assert_eq!(state.kinematics(), before);
    }

    #[test]
    fn test_update_accepts_tags() {
        let mut state = arena(5);
        state.paddle_x = 100;
        update(&mut state, "left").unwrap();
        assert_eq!(state.paddle_x, 95);
    }

    #[test]
    fn test_default_step_never_scores() {
        let mut state = arena(6);
        for i in 0..1000 {
            advance(&mut state, Action::ALL[i % 3]);
        }
        assert_eq!(state.score, 0);
        assert_eq!(reward(&state), 0.0);
    }

    #[test]
    fn test_consequence_hook_runs_after_motion() {
        let mut state = arena(7);
        state.ball_x = 15;
        state.ball_dx = -1.0;
        let mut hook = |s: &mut ArenaState| {
            // Wall contact already flipped the direction
            if s.ball_dx > 0.0 {
                s.score += 1;
            }
        };
        advance_with(&mut state, Action::Stall, &mut hook);
        assert_eq!(state.score, 1);
        assert_eq!(reward(&state), 1.0);
    }

    #[test]
    fn test_determinism() {
        let actions = [Action::Left, Action::Right, Action::Right, Action::Stall];
        let mut a = arena(99999);
        let mut b = arena(99999);
        for i in 0..500 {
            let action = actions[i % actions.len()];
            advance(&mut a, action);
            advance(&mut b, action);
            assert_eq!(a.kinematics(), b.kinematics());
            if i == 250 {
                a.reset();
                b.reset();
            }
        }
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![Just(Action::Left), Just(Action::Stall), Just(Action::Right)]
    }

    proptest! {
        #[test]
        fn prop_bounds_hold_every_tick(
            seed in any::<u64>(),
            width in 40u32..800,
            height in 40u32..800,
            paddle_size in 1u32..40,
            paddle_speed in 1u32..50,
            ball_size in 1u32..20,
            ball_speed in 1u32..60,
            actions in prop::collection::vec(any_action(), 1..200),
        ) {
            let cfg = ArenaConfig { width, height, paddle_size, paddle_speed, ball_size, ball_speed };
            let mut state = ArenaState::with_seed(cfg, seed).unwrap();
            prop_assert!(state.in_bounds());
            for action in actions {
                advance(&mut state, action);
                prop_assert!(state.in_bounds(), "out of bounds: {:?}", state.kinematics());
            }
        }

        #[test]
        fn prop_flips_preserve_magnitude(
            seed in any::<u64>(),
            steps in 1usize..300,
        ) {
            let mut state = arena(seed);
            let (dx, dy) = (state.ball_dx.abs(), state.ball_dy.abs());
            for _ in 0..steps {
                advance(&mut state, Action::Stall);
            }
            prop_assert_eq!(state.ball_dx.abs(), dx);
            prop_assert_eq!(state.ball_dy.abs(), dy);
        }
    }
}
