//! Terminal render/input backend (crossterm)
//!
//! Arena pixels are sampled onto character cells: each cell shows the color
//! of the pixel at its centre. Movement keys are reported as held while
//! press/repeat events keep arriving, or, once the terminal has shown that it
//! reports releases (keyboard enhancement protocol), until the release.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::{cursor, execute, queue};
use glam::IVec2;

use super::{InputBackend, InputEvent, KeyState, Rect, RenderBackend, Rgb};

/// How long a key counts as held after its last press/repeat
const KEY_HOLD: Duration = Duration::from_millis(150);

/// Upper bound on the cell grid, regardless of terminal size
const MAX_COLS: u16 = 120;
const MAX_ROWS: u16 = 60;

/// Cell grid covering the arena
#[derive(Debug, Clone)]
pub struct Raster {
    cols: usize,
    rows: usize,
    /// Arena pixels per cell
    cell: IVec2,
    cells: Vec<Rgb>,
}

impl Raster {
    /// Fit a `width` x `height` arena into at most `max_cols` x `max_rows` cells
    pub fn fit(width: u32, height: u32, max_cols: u16, max_rows: u16) -> Self {
        let cell_w = width.div_ceil(max_cols.max(1) as u32).max(1);
        let cell_h = height.div_ceil(max_rows.max(1) as u32).max(1);
        let cols = width.div_ceil(cell_w) as usize;
        let rows = height.div_ceil(cell_h) as usize;
        Self {
            cols,
            rows,
            cell: IVec2::new(cell_w as i32, cell_h as i32),
            cells: vec![Rgb::BLACK; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> Rgb {
        self.cells[row * self.cols + col]
    }

    pub fn fill(&mut self, color: Rgb) {
        self.cells.fill(color);
    }

    /// Paint every cell whose centre pixel satisfies `inside`
    fn paint(&mut self, color: Rgb, inside: impl Fn(IVec2) -> bool) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let centre = IVec2::new(col as i32, row as i32) * self.cell + self.cell / 2;
                if inside(centre) {
                    self.cells[row * self.cols + col] = color;
                }
            }
        }
    }

    pub fn rect(&mut self, rect: Rect, color: Rgb) {
        self.paint(color, |p| rect.contains(p));
    }

    pub fn circle(&mut self, center: IVec2, radius: i32, color: Rgb) {
        let r2 = radius * radius;
        self.paint(color, |p| (p - center).length_squared() <= r2);
    }
}

/// Restores the terminal when the session's surface is dropped
struct ScreenGuard {
    enhanced: bool,
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, ResetColor, cursor::Show, LeaveAlternateScreen);
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {}", e);
        }
    }
}

/// Session-scoped drawing surface for [`TerminalDisplay`]
pub struct TerminalSurface {
    raster: Raster,
    _guard: ScreenGuard,
}

impl TerminalSurface {
    pub fn raster(&self) -> &Raster {
        &self.raster
    }
}

/// Last press/repeat instant of each movement key
#[derive(Debug, Default)]
struct HeldKeys {
    left: Option<Instant>,
    right: Option<Instant>,
    a: Option<Instant>,
    d: Option<Instant>,
}

impl HeldKeys {
    fn slot(&mut self, code: KeyCode) -> Option<&mut Option<Instant>> {
        match code {
            KeyCode::Left => Some(&mut self.left),
            KeyCode::Right => Some(&mut self.right),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(&mut self.a),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(&mut self.d),
            _ => None,
        }
    }

    fn state(&self, now: Instant, hold: Option<Duration>) -> KeyState {
        let held = |t: Option<Instant>| match (t, hold) {
            (Some(_), None) => true,
            (Some(at), Some(hold)) => now.duration_since(at) < hold,
            (None, _) => false,
        };
        KeyState {
            left: held(self.left),
            right: held(self.right),
            a: held(self.a),
            d: held(self.d),
        }
    }
}

/// Renders into the terminal's alternate screen
pub struct TerminalDisplay {
    out: Stdout,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads movement, reset and quit keys from the terminal
#[derive(Debug, Default)]
pub struct TerminalKeyboard {
    keys: HeldKeys,
    /// Set once the terminal has reported a key release
    releases: bool,
}

impl TerminalKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_key(&mut self, key: KeyEvent, events: &mut Vec<InputEvent>) {
        if key.kind == KeyEventKind::Release {
            self.releases = true;
        } else {
            let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
            match key.code {
                _ if ctrl_c => return events.push(InputEvent::Quit),
                KeyCode::Esc | KeyCode::Char('q') => return events.push(InputEvent::Quit),
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    if key.kind == KeyEventKind::Press {
                        events.push(InputEvent::Reset);
                    }
                    return;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if let Some(slot) = self.keys.slot(key.code) {
            *slot = match key.kind {
                KeyEventKind::Release => None,
                _ => Some(now),
            };
        }
    }
}

impl RenderBackend for TerminalDisplay {
    type Surface = TerminalSurface;

    fn begin_frame(&mut self, width: u32, height: u32) -> io::Result<TerminalSurface> {
        terminal::enable_raw_mode()?;
        let mut guard = ScreenGuard { enhanced: false };
        execute!(self.out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.enhanced = true;
        }

        let (cols, rows) = terminal::size()?;
        // Terminal cells are roughly twice as tall as they are wide
        let max_cols = cols.min(MAX_COLS);
        let max_rows = rows.saturating_sub(1).min(MAX_ROWS).min(max_cols / 2).max(1);
        let raster = Raster::fit(width, height, max_cols, max_rows);
        log::info!(
            "Terminal surface {}x{} cells for {}x{} arena (enhanced keyboard: {})",
            raster.cols(),
            raster.rows(),
            width,
            height,
            guard.enhanced
        );

        Ok(TerminalSurface {
            raster,
            _guard: guard,
        })
    }

    fn clear(&mut self, surface: &mut TerminalSurface, color: Rgb) {
        surface.raster.fill(color);
    }

    fn draw_rect(&mut self, surface: &mut TerminalSurface, rect: Rect, color: Rgb) {
        surface.raster.rect(rect, color);
    }

    fn draw_circle(&mut self, surface: &mut TerminalSurface, center: IVec2, radius: i32, color: Rgb) {
        surface.raster.circle(center, radius, color);
    }

    fn present(&mut self, surface: &mut TerminalSurface) -> io::Result<()> {
        let raster = &surface.raster;
        let mut current: Option<Rgb> = None;
        for row in 0..raster.rows() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for col in 0..raster.cols() {
                let c = raster.get(col, row);
                if current != Some(c) {
                    queue!(self.out, SetForegroundColor(Color::Rgb { r: c.r, g: c.g, b: c.b }))?;
                    current = Some(c);
                }
                queue!(self.out, Print('█'))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    fn set_title(&mut self, text: &str) -> io::Result<()> {
        execute!(self.out, SetTitle(text))
    }
}

impl InputBackend for TerminalKeyboard {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, &mut events);
            }
        }
        let hold = if self.releases { None } else { Some(KEY_HOLD) };
        events.push(InputEvent::Keys(self.keys.state(Instant::now(), hold)));
        Ok(events)
    }
}
