//! Flappy Can entry point
//!
//! On the web this wires the game to the page. Natively it runs a headless
//! session with manual frame stepping and prints the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use flappy_can::audio::LogNotifier;
    use flappy_can::platform::ManualScheduler;
    use flappy_can::renderer::LastFrame;
    use flappy_can::sim::{SeededGaps, SessionState};
    use flappy_can::{GameLoop, Settings, autopilot};

    /// Run one headless session of Flappy Can
    #[derive(Parser, Debug)]
    #[command(name = "flappy-can", version, about)]
    pub struct Args {
        /// Seed for gap placement (overrides the settings file)
        #[arg(long)]
        pub seed: Option<u64>,

        /// Stop after this many frames even if still playing
        #[arg(long, default_value_t = 10_000)]
        pub max_frames: u64,

        /// Let the demo controller jump
        #[arg(long)]
        pub autopilot: bool,

        /// JSON settings file
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        pub json: bool,
    }

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        state: SessionState,
        score: u32,
        ticks: u64,
        frames: u64,
    }

    fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Settings::from_json(&json).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn run(args: Args) -> Result<()> {
        let settings = load_settings(args.settings.as_ref())?;
        let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
        let use_autopilot = args.autopilot || settings.autopilot;
        log::info!("Flappy Can (native) starting with seed {}", seed);

        let mut game = GameLoop::new(ManualScheduler::new(), SeededGaps::new(seed))
            .with_notifier(LogNotifier::new(settings.muted))
            .with_canvas(LastFrame::default());
        game.start();

        let frames = if use_autopilot {
            game.run_with(args.max_frames, autopilot::wants_jump)
        } else {
            game.run_until_idle(args.max_frames)
        };
        game.stop();

        let summary = Summary {
            seed,
            state: game.state(),
            score: game.score(),
            ticks: game.session().tick_count,
            frames,
        };

        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!(
                "{:?} after {} ticks - score {} (seed {})",
                summary.state, summary.ticks, summary.score, summary.seed
            );
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    flappy_can::platform::web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    native::run(native::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
