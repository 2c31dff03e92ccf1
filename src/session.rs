//! Fixed-rate control loop
//!
//! One session owns the arena, the render and input backends and the clock.
//! Each tick: render, decide, advance, drain signals, then sleep off whatever
//! is left of the tick budget. Overruns are not caught up.

use crate::decision::DecisionSource;
use crate::error::{ArenaError, Result};
use crate::platform::{Clock, InputBackend, InputEvent, KeyState, RenderBackend};
use crate::renderer;
use crate::sim::{ArenaState, ConsequenceHook, NoConsequence, advance_with};

/// Control loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Ticking
    Playing,
    /// Quit received; terminal
    Stopped,
}

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayReport {
    /// Ticks run, including the one that received the quit
    pub ticks: u64,
    /// Resets performed mid-session
    pub resets: u64,
    /// Ticks that took longer than their budget
    pub overruns: u64,
}

/// Signals gathered from one drain of the input backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signals {
    pub quit: bool,
    pub resets: u32,
    /// Most recent key state, if any was reported
    pub keys: Option<KeyState>,
}

impl Signals {
    pub fn collect(events: impl IntoIterator<Item = InputEvent>) -> Self {
        let mut signals = Self::default();
        for event in events {
            match event {
                InputEvent::Quit => signals.quit = true,
                InputEvent::Reset => signals.resets += 1,
                InputEvent::Keys(keys) => signals.keys = Some(keys),
            }
        }
        signals
    }
}

/// Per-tick sleep budget in milliseconds
pub fn tick_budget(rate: u32) -> Result<u64> {
    if rate == 0 {
        return Err(ArenaError::InvalidConfiguration(
            "rate must be positive".to_string(),
        ));
    }
    Ok(1000 / rate as u64)
}

/// Drives an arena with a decision source at a fixed rate
pub struct ControlLoop<R, I, C> {
    arena: ArenaState,
    render: R,
    input: I,
    clock: C,
    consequences: Box<dyn ConsequenceHook>,
    phase: LoopPhase,
}

impl<R, I, C> ControlLoop<R, I, C>
where
    R: RenderBackend,
    I: InputBackend,
    C: Clock,
{
    pub fn new(arena: ArenaState, render: R, input: I, clock: C) -> Self {
        Self {
            arena,
            render,
            input,
            clock,
            consequences: Box::new(NoConsequence),
            phase: LoopPhase::Stopped,
        }
    }

    /// Replace the (no-op) consequence step run after every advance
    pub fn with_consequences(mut self, hook: impl ConsequenceHook + 'static) -> Self {
        self.consequences = Box::new(hook);
        self
    }

    pub fn arena(&self) -> &ArenaState {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut ArenaState {
        &mut self.arena
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn render_backend(&self) -> &R {
        &self.render
    }

    pub fn input_backend(&self) -> &I {
        &self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Hand back the arena once the session is over
    pub fn into_arena(self) -> ArenaState {
        self.arena
    }

    /// Run until the input backend signals quit.
    ///
    /// `rate` is the maximum number of ticks (and frames) per second. The
    /// render surface lives exactly as long as this call.
    pub fn play(&mut self, source: &mut dyn DecisionSource, rate: u32) -> Result<PlayReport> {
        let budget = tick_budget(rate)?;
        let mut surface = self
            .render
            .begin_frame(self.arena.width(), self.arena.height())?;

        log::info!(
            "Session started: {} input, {} ticks/s, seed {}",
            source.name(),
            rate,
            self.arena.seed()
        );

        self.phase = LoopPhase::Playing;
        let mut report = PlayReport::default();
        let mut keys = KeyState::default();

        while self.phase == LoopPhase::Playing {
            let outcome = self.tick(&mut surface, source, &mut keys, budget, &mut report);
            if let Err(e) = outcome {
                self.phase = LoopPhase::Stopped;
                log::error!("Session aborted after {} ticks: {}", report.ticks, e);
                return Err(e);
            }
        }

        log::info!(
            "Session stopped after {} ticks ({} resets, {} overruns)",
            report.ticks,
            report.resets,
            report.overruns
        );
        Ok(report)
    }

    fn tick(
        &mut self,
        surface: &mut R::Surface,
        source: &mut dyn DecisionSource,
        keys: &mut KeyState,
        budget: u64,
        report: &mut PlayReport,
    ) -> Result<()> {
        let start = self.clock.now_millis();

        // The player sees the frame before the step it decides on
        renderer::draw_arena(&mut self.render, surface, &self.arena)?;

        let action = source.decide(&self.arena, keys)?;
        advance_with(&mut self.arena, action, self.consequences.as_mut());
        report.ticks += 1;
        log::trace!("tick {} {}: {:?}", report.ticks, action, self.arena.kinematics());

        let signals = Signals::collect(self.input.poll_events()?);
        if let Some(latest) = signals.keys {
            *keys = latest;
        }
        if signals.quit {
            // Quit wins over any reset queued alongside it
            self.phase = LoopPhase::Stopped;
            return Ok(());
        }
        for _ in 0..signals.resets {
            self.arena.reset();
            report.resets += 1;
            log::debug!("Arena reset at tick {}", report.ticks);
        }

        let elapsed = self.clock.now_millis().saturating_sub(start);
        if elapsed < budget {
            self.clock.wait_millis(budget - elapsed);
        } else if elapsed > budget {
            report.overruns += 1;
            log::debug!("Tick {} overran budget: {}ms > {}ms", report.ticks, elapsed, budget);
        }
        Ok(())
    }
}
