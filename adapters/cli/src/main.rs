#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Chase experience.

mod config;
mod session;

use std::{path::PathBuf, sync::mpsc};

use anyhow::Result;
use clap::Parser;
use maze_chase_rendering::{Presentation, RenderingBackend};
use maze_chase_rendering_macroquad::MacroquadBackend;
use maze_chase_world::query;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::{
    config::{GameConfig, Overrides},
    session::Session,
};

const WINDOW_TITLE: &str = "Maze Chase";

/// Command-line arguments for the Maze Chase binary.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version, about = "Chase pellets, dodge pursuers.")]
struct CliArgs {
    /// TOML file with game settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Milliseconds between simulation ticks.
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,
    /// Seed for pursuer decisions, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,
    /// Lives granted at the start.
    #[arg(long)]
    lives: Option<u32>,
    /// Runs this many ticks without a window and prints the outcome.
    #[arg(long, value_name = "TICKS")]
    headless_ticks: Option<u64>,
}

impl CliArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            tick_ms: self.tick_ms,
            seed: self.seed,
            lives: self.lives,
        }
    }
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = GameConfig::load(args.config.as_deref())?.with_overrides(args.overrides());
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, tick_ms = config.tick_ms, lives = config.lives, "starting session");

    let mut session = Session::new(&config, seed)?;
    println!("{}", session.welcome_banner());

    match args.headless_ticks {
        Some(ticks) => {
            session.run_headless(ticks)?;
            let world = session.world();
            info!(
                score = query::score(world),
                lives = query::lives(world),
                state = ?query::state(world),
                "headless run finished"
            );
            println!("{}", session.summary());
            Ok(())
        }
        None => run_windowed(session, &config),
    }
}

fn run_windowed(mut session: Session, config: &GameConfig) -> Result<()> {
    let presentation = Presentation::new(WINDOW_TITLE, session.scene())
        .with_window_size(config.window_width, config.window_height);
    let backend = MacroquadBackend::new()
        .with_vsync(true)
        .with_tick_interval(config.tick_interval());
    let (failure_sender, failure_receiver) = mpsc::channel();

    backend.run(presentation, move |inputs| {
        if session.should_quit() {
            return None;
        }
        match session.frame(inputs) {
            Ok(scene) => scene,
            Err(error) => {
                tracing::error!("{error:#}");
                let _ = failure_sender.send(error);
                None
            }
        }
    })?;

    if let Ok(error) = failure_receiver.try_recv() {
        return Err(error);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
