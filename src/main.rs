//! Paddle Boi entry point
//!
//! Builds the arena from defaults, an optional settings file and flags, then
//! plays it from the keyboard in the terminal.
//!
//! Controls: arrows or A/D move, R resets, Q/Esc/Ctrl-C quits.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use paddle_boi::platform::{StdClock, TerminalDisplay, TerminalKeyboard};
use paddle_boi::{ArenaState, ControlLoop, HumanInput, Result, Settings};

#[derive(Debug, Parser)]
#[command(name = "paddle-boi", version, about = "Slide your paddle boi left and right")]
struct Cli {
    /// JSON settings file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extent of the arena's x dimension
    #[arg(long)]
    width: Option<u32>,

    /// Extent of the arena's y dimension
    #[arg(long)]
    height: Option<u32>,

    /// Paddle hitbox length
    #[arg(long)]
    paddle_size: Option<u32>,

    /// Max paddle distance per tick
    #[arg(long)]
    paddle_speed: Option<u32>,

    /// Ball hitbox radius
    #[arg(long)]
    ball_size: Option<u32>,

    /// Max ball distance per tick
    #[arg(long)]
    ball_speed: Option<u32>,

    /// Max ticks (and frames) per second
    #[arg(long)]
    rate: Option<u32>,

    /// Seed for reproducible resets
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };

        let arena = &mut settings.arena;
        let overrides = [
            (&mut arena.width, self.width),
            (&mut arena.height, self.height),
            (&mut arena.paddle_size, self.paddle_size),
            (&mut arena.paddle_speed, self.paddle_speed),
            (&mut arena.ball_size, self.ball_size),
            (&mut arena.ball_speed, self.ball_speed),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(rate) = self.rate {
            settings.play.rate = rate;
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings()?;
    let arena = match cli.seed {
        Some(seed) => ArenaState::with_seed(settings.arena, seed)?,
        None => ArenaState::new(settings.arena)?,
    };

    let mut session = ControlLoop::new(arena, TerminalDisplay::new(), TerminalKeyboard::new(), StdClock::new());
    session.play(&mut HumanInput, settings.play.rate)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Paddle Boi starting...");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("paddle-boi: {e}");
            ExitCode::FAILURE
        }
    }
}
