//! Platform abstraction layer
//!
//! The simulation never touches a display, a keyboard or a timer directly.
//! It goes through these traits:
//! - `RenderBackend`: drawing primitives on a session-scoped surface
//! - `InputBackend`: quit/reset signals and movement key state
//! - `Clock`: monotonic milliseconds and a blocking wait

pub mod clock;
pub mod terminal;

use glam::IVec2;
use serde::{Deserialize, Serialize};

pub use clock::StdClock;
pub use terminal::{TerminalDisplay, TerminalKeyboard};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle: top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    /// Whether a point lies inside (right/bottom edges exclusive)
    pub fn contains(&self, p: IVec2) -> bool {
        let end = self.pos + self.size;
        p.x >= self.pos.x && p.y >= self.pos.y && p.x < end.x && p.y < end.y
    }
}

/// Drawing collaborator. The arena draws through this once per tick.
pub trait RenderBackend {
    /// Drawable handle; released when dropped at the end of the session
    type Surface;

    /// Acquire a surface sized to the arena
    fn begin_frame(&mut self, width: u32, height: u32) -> std::io::Result<Self::Surface>;

    fn clear(&mut self, surface: &mut Self::Surface, color: Rgb);

    fn draw_rect(&mut self, surface: &mut Self::Surface, rect: Rect, color: Rgb);

    fn draw_circle(&mut self, surface: &mut Self::Surface, center: IVec2, radius: i32, color: Rgb);

    /// Push the finished frame to the display
    fn present(&mut self, surface: &mut Self::Surface) -> std::io::Result<()>;

    fn set_title(&mut self, text: &str) -> std::io::Result<()>;
}

/// Pressed state of the four movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    /// Alternate left
    pub a: bool,
    /// Alternate right
    pub d: bool,
}

impl KeyState {
    pub fn any(&self) -> bool {
        self.left || self.right || self.a || self.d
    }
}

/// Signals produced by the input backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Stop the session
    Quit,
    /// Restart the arena
    Reset,
    /// Current movement key state
    Keys(KeyState),
}

/// Input collaborator
pub trait InputBackend {
    /// Drain every event pending since the previous call
    fn poll_events(&mut self) -> std::io::Result<Vec<InputEvent>>;
}

/// Monotonic timer and blocking sleep
pub trait Clock {
    fn now_millis(&self) -> u64;

    fn wait_millis(&mut self, millis: u64);
}
