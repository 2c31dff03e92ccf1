//! Arena display routine
//!
//! Draws one frame of the arena through any [`RenderBackend`]: title with the
//! score, black background, paddle bar and ball, both tinted by score.

use glam::IVec2;

use crate::consts::COLOR_HALF_LIFE;
use crate::platform::{Rect, RenderBackend, Rgb};
use crate::sim::ArenaState;

/// Window title for a given score
pub fn title(score: i64) -> String {
    format!("PADDLE BOI - {}", score)
}

/// Red at zero score, fading to green as the score grows
pub fn score_color(score: i64) -> Rgb {
    let fade = 2f64.powf(-(score as f64) / COLOR_HALF_LIFE);
    // Float-to-int casts saturate, so negative scores stay pure red
    Rgb::new((255.0 * fade) as u8, (255.0 * (1.0 - fade)) as u8, 0)
}

/// Paddle bar: a quarter of its length tall, centred on the paddle row
pub fn paddle_rect(state: &ArenaState) -> Rect {
    let size = state.paddle_size() as i32;
    Rect::new(state.paddle_x, state.paddle_y() - size / 8, size, size / 4)
}

/// Draw and present the current state
pub fn draw_arena<R: RenderBackend>(
    backend: &mut R,
    surface: &mut R::Surface,
    state: &ArenaState,
) -> std::io::Result<()> {
    backend.set_title(&title(state.score))?;
    backend.clear(surface, Rgb::BLACK);

    let color = score_color(state.score);
    backend.draw_rect(surface, paddle_rect(state), color);
    backend.draw_circle(
        surface,
        IVec2::new(state.ball_x, state.ball_y),
        state.ball_size() as i32,
        color,
    );

    backend.present(surface)
}
